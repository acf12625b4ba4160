//! # Intro Runtime
//!
//! 欢迎页开场动画的核心运行时库。
//!
//! ## 架构概述
//!
//! `intro-runtime` 是纯逻辑核心，不依赖任何渲染引擎。
//! 驱动器只负责"现在处于哪个状态"，过渡定义只负责"某时刻某属性是多少"，
//! 渲染端每帧拉取属性值：
//!
//! ```text
//! Host                              Runtime
//!   │                                  │
//!   │──── start() ───────────────────►│ 推进到第二个状态
//!   │──── update(dt) / 计时器 ────────►│ 边的等待结束时推进
//!   │◄─── current_value(property) ────│ 纯函数采样
//!   │                                  │
//! ```
//!
//! ## 核心类型
//!
//! - [`SequenceDriver`]：有序状态 + 只增不减的索引
//! - [`TransitionDefinition`]：目标值表 + 每条边的补间规格，构建时校验
//! - [`SequencePlayer`]：逐帧推进
//! - [`SequenceTimer`]：基于 tokio 的实时推进
//! - [`IntroFrame`]：把属性快照换算成页面布局
//!
//! ## 使用示例
//!
//! ```ignore
//! use intro_runtime::{IntroProperty, intro_player};
//!
//! let mut player = intro_player(screen_height)?;
//! player.start()?;
//! loop {
//!     player.update(frame_dt);
//!     let logo_height = player.current_value(IntroProperty::LogoHeight);
//!     // ...
//! }
//! ```

pub mod definition;
pub mod driver;
pub mod easing;
pub mod error;
pub mod intro;
pub mod layout;
pub mod player;
pub mod schedule;
pub mod state;
pub mod timer;
pub mod tween;

// 重导出核心类型
pub use definition::{TransitionDefinition, TransitionDefinitionBuilder};
pub use driver::SequenceDriver;
pub use easing::EasingFunction;
pub use error::{SequenceError, SequenceResult};
pub use intro::{
    INTRO_STATES, IntroProperty, IntroState, IntroValues, intro_driver, intro_player, intro_timer,
    intro_transition,
};
pub use layout::{ButtonLayout, HintLayout, IconPosition, IntroFrame, Rect, ScreenConstraints};
pub use player::{SequenceEvent, SequencePlayer};
pub use schedule::{Schedule, ScheduledEdge};
pub use state::{AnimProperty, SequenceState};
pub use timer::SequenceTimer;
pub use tween::{EdgeSpec, TweenPhase, TweenSpec};
