//! # Driver 模块
//!
//! 动画序列驱动器：有序状态列表 + 当前索引。
//!
//! ## 不变量
//!
//! - 状态列表非空
//! - 索引只增不减，不回绕
//! - 到达最后一个状态后 `advance()` 为空操作
//!
//! 驱动器本身不计时，推进节奏由 [`crate::SequencePlayer`]（逐帧）
//! 或 [`crate::SequenceTimer`]（实时）决定。

use tracing::debug;

use crate::error::{SequenceError, SequenceResult};
use crate::state::SequenceState;

/// 动画序列驱动器
#[derive(Debug, Clone)]
pub struct SequenceDriver<S: SequenceState> {
    /// 有序状态列表
    states: Vec<S>,
    /// 当前状态索引
    index: usize,
    /// 是否已启动
    started: bool,
}

impl<S: SequenceState> SequenceDriver<S> {
    /// 创建驱动器
    ///
    /// 空状态列表返回 `InvalidConfiguration`。
    pub fn new(states: impl Into<Vec<S>>) -> SequenceResult<Self> {
        let states = states.into();
        if states.is_empty() {
            return Err(SequenceError::invalid("驱动器至少需要一个状态"));
        }

        Ok(Self {
            states,
            index: 0,
            started: false,
        })
    }

    /// 启动序列
    ///
    /// 标记为已启动并立即推进到第二个状态（单状态序列直接处于终态）。
    /// 重复调用返回 `AlreadyStarted`，驱动器保持不变。
    pub fn start(&mut self) -> SequenceResult<S> {
        if self.started {
            return Err(SequenceError::AlreadyStarted);
        }
        self.started = true;
        debug!(state = self.current_state().name(), "序列启动");
        Ok(self.advance())
    }

    /// 推进到下一个状态
    ///
    /// 终态时为空操作。返回推进后的当前状态。
    pub fn advance(&mut self) -> S {
        if self.index + 1 < self.states.len() {
            let from = self.states[self.index];
            self.index += 1;
            debug!(
                from = from.name(),
                to = self.current_state().name(),
                index = self.index,
                "序列推进"
            );
        }
        self.current_state()
    }

    /// 当前状态索引
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// 当前状态
    pub fn current_state(&self) -> S {
        self.states[self.index]
    }

    /// 当前边的起点（索引为 0 时没有边）
    pub fn previous_state(&self) -> Option<S> {
        self.index.checked_sub(1).map(|i| self.states[i])
    }

    /// 当前边 `(起点, 终点)`
    pub fn current_edge(&self) -> Option<(S, S)> {
        self.previous_state().map(|from| (from, self.current_state()))
    }

    /// 是否已到达终态
    pub fn is_terminal(&self) -> bool {
        self.index + 1 == self.states.len()
    }

    /// 是否已启动
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// 全部状态
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// 状态数量
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// 永远为 `false`（构建时保证非空）
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
