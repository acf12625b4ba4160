//! # Schedule 模块
//!
//! 由状态列表和过渡定义推导出的时间表：每条边从序列启动后的第几毫秒开始、
//! 持续多久。用于按总时间做纯函数采样，以及打印时间轴。

use std::time::Duration;

use serde::Serialize;

use crate::definition::TransitionDefinition;
use crate::error::{SequenceError, SequenceResult};
use crate::state::{AnimProperty, SequenceState};

/// 时间表中的一条边
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledEdge<S> {
    /// 起点状态
    pub from: S,
    /// 终点状态
    pub to: S,
    /// 终点状态的索引
    pub index: usize,
    /// 相对序列启动的开始时刻
    pub start: Duration,
    /// 等待时长（最长补间）
    pub wait: Duration,
}

impl<S> ScheduledEdge<S> {
    /// 结束时刻
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.wait)
    }
}

/// 序列时间表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule<S> {
    /// 初始状态
    initial: S,
    /// 依次排列的边
    edges: Vec<ScheduledEdge<S>>,
}

impl<S: SequenceState> Schedule<S> {
    /// 推导时间表
    ///
    /// 第一条边在启动时刻开始，之后每条边在上一条等待结束时开始。
    /// 空状态列表返回 `InvalidConfiguration`。
    pub fn new<P: AnimProperty>(
        states: &[S],
        definition: &TransitionDefinition<S, P>,
    ) -> SequenceResult<Self> {
        let initial = *states
            .first()
            .ok_or_else(|| SequenceError::invalid("时间表至少需要一个状态"))?;

        let mut edges = Vec::with_capacity(states.len().saturating_sub(1));
        let mut start = Duration::ZERO;
        for (i, pair) in states.windows(2).enumerate() {
            let wait = definition.edge_wait(pair[0], pair[1]);
            edges.push(ScheduledEdge {
                from: pair[0],
                to: pair[1],
                index: i + 1,
                start,
                wait,
            });
            start = start.saturating_add(wait);
        }

        Ok(Self { initial, edges })
    }

    /// 初始状态
    pub fn initial(&self) -> S {
        self.initial
    }

    /// 全部边
    pub fn edges(&self) -> &[ScheduledEdge<S>] {
        &self.edges
    }

    /// 序列总时长
    pub fn total(&self) -> Duration {
        self.edges.last().map_or(Duration::ZERO, ScheduledEdge::end)
    }

    /// 启动后 `elapsed` 时刻所在的边，以及该边内已经过的时间
    ///
    /// 同一时刻开始的多条边取最后一条（零等待的边会被立即越过）。
    pub fn edge_at(&self, elapsed: Duration) -> Option<(&ScheduledEdge<S>, Duration)> {
        self.edges
            .iter()
            .rev()
            .find(|edge| edge.start <= elapsed)
            .map(|edge| (edge, elapsed - edge.start))
    }

    /// 启动后 `elapsed` 时刻的状态索引
    pub fn index_at(&self, elapsed: Duration) -> usize {
        self.edge_at(elapsed).map_or(0, |(edge, _)| edge.index)
    }
}
