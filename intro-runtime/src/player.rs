//! # Player 模块
//!
//! 逐帧推进的序列播放器。
//!
//! 宿主持有自己的帧时钟，每帧调用 `update(dt)`，播放器在当前边的等待结束时
//! 推进驱动器，并把剩余时间带入下一条边。渲染侧每帧调用 `current_value`
//! 拉取属性值。
//!
//! ```rust,ignore
//! let mut player = SequencePlayer::new(driver, definition)?;
//! player.start()?;
//! loop {
//!     for event in player.update(frame_dt) { /* ... */ }
//!     let alpha = player.current_value(IntroProperty::HintAlpha);
//! }
//! ```

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::definition::TransitionDefinition;
use crate::driver::SequenceDriver;
use crate::error::SequenceResult;
use crate::schedule::Schedule;
use crate::state::{AnimProperty, SequenceState};

/// 序列事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SequenceEvent<S> {
    /// 序列启动
    Started { state: S },
    /// 推进到下一个状态
    Advanced { from: S, to: S, index: usize },
    /// 终态的补间全部结束
    Settled { state: S },
}

/// 逐帧序列播放器
#[derive(Debug, Clone)]
pub struct SequencePlayer<S: SequenceState, P: AnimProperty> {
    driver: SequenceDriver<S>,
    definition: TransitionDefinition<S, P>,
    schedule: Schedule<S>,
    /// 当前边已经过的时间
    edge_elapsed: Duration,
    /// 启动后经过的总时间
    elapsed: Duration,
    /// 是否已稳定在终态
    settled: bool,
}

impl<S: SequenceState, P: AnimProperty> SequencePlayer<S, P> {
    /// 创建播放器
    ///
    /// 驱动器的状态顺序必须与定义构建时一致。
    pub fn new(
        driver: SequenceDriver<S>,
        definition: TransitionDefinition<S, P>,
    ) -> SequenceResult<Self> {
        definition.check_order(driver.states())?;
        let schedule = Schedule::new(driver.states(), &definition)?;

        Ok(Self {
            driver,
            definition,
            schedule,
            edge_elapsed: Duration::ZERO,
            elapsed: Duration::ZERO,
            settled: false,
        })
    }

    /// 启动序列
    ///
    /// 重复启动返回 `AlreadyStarted`。
    pub fn start(&mut self) -> SequenceResult<Vec<SequenceEvent<S>>> {
        let initial = self.driver.current_state();
        self.driver.start()?;

        let mut events = vec![SequenceEvent::Started { state: initial }];
        if let Some((from, to)) = self.driver.current_edge() {
            events.push(SequenceEvent::Advanced {
                from,
                to,
                index: self.driver.current_index(),
            });
        }
        self.step(&mut events);
        Ok(events)
    }

    /// 推进时间
    ///
    /// 未启动或已稳定时不做任何事。
    pub fn update(&mut self, dt: Duration) -> Vec<SequenceEvent<S>> {
        let mut events = Vec::new();
        if !self.driver.is_started() || self.settled {
            return events;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        self.edge_elapsed = self.edge_elapsed.saturating_add(dt);
        self.step(&mut events);
        events
    }

    /// 处理所有已经到期的推进
    fn step(&mut self, events: &mut Vec<SequenceEvent<S>>) {
        loop {
            let wait = self.current_wait();
            if self.edge_elapsed < wait {
                break;
            }

            if self.driver.is_terminal() {
                self.settle(events);
                break;
            }

            self.edge_elapsed -= wait;
            let from = self.driver.current_state();
            let to = self.driver.advance();
            events.push(SequenceEvent::Advanced {
                from,
                to,
                index: self.driver.current_index(),
            });
        }
    }

    fn settle(&mut self, events: &mut Vec<SequenceEvent<S>>) {
        if self.settled {
            return;
        }
        self.settled = true;
        let state = self.driver.current_state();
        info!(state = state.name(), elapsed_ms = self.elapsed.as_millis() as u64, "序列完成");
        events.push(SequenceEvent::Settled { state });
    }

    /// 当前边的等待时长
    fn current_wait(&self) -> Duration {
        self.driver
            .current_edge()
            .map_or(Duration::ZERO, |(from, to)| self.definition.edge_wait(from, to))
    }

    /// 直接跳到终态
    ///
    /// 未启动时会先启动。
    pub fn skip_to_end(&mut self) -> Vec<SequenceEvent<S>> {
        let mut events = Vec::new();
        if !self.driver.is_started() {
            match self.start() {
                Ok(started) => events.extend(started),
                Err(e) => debug!(error = %e, "跳过时启动失败"),
            }
        }

        while !self.driver.is_terminal() {
            let from = self.driver.current_state();
            let to = self.driver.advance();
            events.push(SequenceEvent::Advanced {
                from,
                to,
                index: self.driver.current_index(),
            });
        }

        self.edge_elapsed = self.current_wait();
        self.elapsed = self.schedule.total();
        self.settle(&mut events);
        events
    }

    /// 属性的当前值
    pub fn current_value(&self, property: P) -> f32 {
        match self.driver.current_edge() {
            Some((from, to)) => self.definition.value_of(from, to, property, self.edge_elapsed),
            None => self.definition.target(property, self.driver.current_state()),
        }
    }

    /// 假设在 0 时刻启动，属性在 `elapsed` 时刻的值（纯函数）
    pub fn value_at(&self, property: P, elapsed: Duration) -> f32 {
        match self.schedule.edge_at(elapsed) {
            Some((edge, local)) => self.definition.value_of(edge.from, edge.to, property, local),
            None => self.definition.target(property, self.schedule.initial()),
        }
    }

    /// 是否已稳定在终态
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// 启动后经过的总时间
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// 驱动器
    pub fn driver(&self) -> &SequenceDriver<S> {
        &self.driver
    }

    /// 过渡定义
    pub fn definition(&self) -> &TransitionDefinition<S, P> {
        &self.definition
    }

    /// 时间表
    pub fn schedule(&self) -> &Schedule<S> {
        &self.schedule
    }
}
