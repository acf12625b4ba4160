//! # Intro Host
//!
//! 开场动画的无窗口预览宿主。
//!
//! - [`config`]：预览配置（JSON 文件 + 命令行覆盖）
//! - [`preview`]：逐帧 / 按时间采样 / 实时播放

pub mod config;
pub mod preview;

pub use config::{ConfigError, OutputFormat, PreviewConfig, ScreenConfig};
pub use preview::{FrameSample, Preview, PreviewError, PreviewSummary, describe_event, run_realtime};
