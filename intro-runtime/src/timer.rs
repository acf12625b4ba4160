//! # Timer 模块
//!
//! 基于 tokio 的实时序列计时器。
//!
//! 启动后生成一个后台任务：按每条边的等待时长休眠，然后推进驱动器，
//! 到达终态后任务退出。渲染侧随时调用 `current_value` 采样，
//! 采样只读取"上次推进的时刻"和当前时间，不修改任何状态。
//!
//! 计时器被丢弃时后台任务一并取消，不会在页面销毁后继续运行。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::definition::TransitionDefinition;
use crate::driver::SequenceDriver;
use crate::error::{SequenceError, SequenceResult};
use crate::state::{AnimProperty, SequenceState};

/// 计时器与后台任务共享的状态
#[derive(Debug)]
struct TimerState<S: SequenceState> {
    driver: SequenceDriver<S>,
    /// 当前边开始的时刻（启动前为 `None`）
    edge_started: Option<Instant>,
}

/// 实时序列计时器
#[derive(Debug)]
pub struct SequenceTimer<S: SequenceState, P: AnimProperty> {
    shared: Arc<Mutex<TimerState<S>>>,
    definition: Arc<TransitionDefinition<S, P>>,
    task: Option<JoinHandle<()>>,
}

impl<S, P> SequenceTimer<S, P>
where
    S: SequenceState + Send + Sync,
    P: AnimProperty + Send + Sync,
{
    /// 创建计时器
    ///
    /// 驱动器的状态顺序必须与定义构建时一致。
    pub fn new(
        driver: SequenceDriver<S>,
        definition: TransitionDefinition<S, P>,
    ) -> SequenceResult<Self> {
        definition.check_order(driver.states())?;

        Ok(Self {
            shared: Arc::new(Mutex::new(TimerState {
                driver,
                edge_started: None,
            })),
            definition: Arc::new(definition),
            task: None,
        })
    }

    fn lock(&self) -> MutexGuard<'_, TimerState<S>> {
        lock_state(&self.shared)
    }

    /// 启动序列并开始自动推进
    ///
    /// 必须在 tokio 运行时中调用。重复启动返回 `AlreadyStarted`。
    pub fn start(&mut self) -> SequenceResult<()> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| SequenceError::invalid("计时器需要在 tokio 运行时中启动"))?;

        {
            let mut state = self.lock();
            state.driver.start()?;
            state.edge_started = Some(Instant::now());
        }

        let shared = Arc::clone(&self.shared);
        let definition = Arc::clone(&self.definition);
        self.task = Some(runtime.spawn(run(shared, definition)));
        Ok(())
    }

    /// 停止自动推进
    ///
    /// 驱动器停留在当前状态，采样仍然可用。
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("序列计时器已停止");
        }
    }

    /// 后台任务是否仍在运行
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// 当前状态索引
    pub fn current_index(&self) -> usize {
        self.lock().driver.current_index()
    }

    /// 当前状态
    pub fn current_state(&self) -> S {
        self.lock().driver.current_state()
    }

    /// 是否已到达终态
    pub fn is_terminal(&self) -> bool {
        self.lock().driver.is_terminal()
    }

    /// 属性的当前值
    pub fn current_value(&self, property: P) -> f32 {
        let state = self.lock();
        match (state.driver.current_edge(), state.edge_started) {
            (Some((from, to)), Some(started)) => {
                let elapsed = Instant::now().saturating_duration_since(started);
                self.definition.value_of(from, to, property, elapsed)
            }
            _ => self.definition.target(property, state.driver.current_state()),
        }
    }

    /// 过渡定义
    pub fn definition(&self) -> &TransitionDefinition<S, P> {
        &self.definition
    }
}

impl<S: SequenceState, P: AnimProperty> Drop for SequenceTimer<S, P> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn lock_state<S: SequenceState>(shared: &Mutex<TimerState<S>>) -> MutexGuard<'_, TimerState<S>> {
    // 临界区内没有会 panic 的操作，中毒时直接沿用内部数据
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 后台推进循环
///
/// 每条边的截止时刻以上一条边的开始时刻为基准，避免累积漂移。
async fn run<S, P>(shared: Arc<Mutex<TimerState<S>>>, definition: Arc<TransitionDefinition<S, P>>)
where
    S: SequenceState + Send + Sync,
    P: AnimProperty + Send + Sync,
{
    loop {
        let deadline = {
            let state = lock_state(&shared);
            if state.driver.is_terminal() {
                break;
            }
            let wait = state
                .driver
                .current_edge()
                .map_or(Duration::ZERO, |(from, to)| definition.edge_wait(from, to));
            state.edge_started.unwrap_or_else(Instant::now) + wait
        };

        tokio::time::sleep_until(deadline).await;

        let mut state = lock_state(&shared);
        state.driver.advance();
        state.edge_started = Some(deadline);
    }

    debug!("序列计时器到达终态，任务退出");
}
