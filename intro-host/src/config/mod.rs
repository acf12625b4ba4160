//! # Config 模块
//!
//! 预览配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (JSON)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;
use std::time::Duration;

use intro_runtime::ScreenConstraints;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 帧输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 人类可读的单行文本
    #[default]
    Text,
    /// 每帧一行 JSON
    Json,
}

/// 预览配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// 屏幕尺寸
    #[serde(default)]
    pub screen: ScreenConfig,

    /// 逐帧播放的帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 每隔多少帧输出一次
    #[serde(default = "default_print_every")]
    pub print_every: u32,

    /// 输出格式
    #[serde(default)]
    pub format: OutputFormat,
}

/// 屏幕配置（逻辑像素）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default = "default_screen_width")]
    pub width: f32,

    #[serde(default = "default_screen_height")]
    pub height: f32,
}

// 默认值函数
fn default_fps() -> u32 {
    60
}

fn default_print_every() -> u32 {
    6
}

fn default_screen_width() -> f32 {
    411.0
}

fn default_screen_height() -> f32 {
    731.0
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            fps: default_fps(),
            print_every: default_print_every(),
            format: OutputFormat::default(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: default_screen_width(),
            height: default_screen_height(),
        }
    }
}

impl PreviewConfig {
    /// 加载配置文件
    ///
    /// 文件不存在或解析失败时返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = ?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ScreenConfig { width, height } = self.screen;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::ValidationFailed(format!(
                "屏幕尺寸必须为正数: {}x{}",
                width, height
            )));
        }

        if !(1..=240).contains(&self.fps) {
            return Err(ConfigError::ValidationFailed(format!(
                "帧率必须在 1 - 240 之间: {}",
                self.fps
            )));
        }

        if self.print_every == 0 {
            return Err(ConfigError::ValidationFailed(
                "print_every 必须大于 0".to_string(),
            ));
        }

        Ok(())
    }

    /// 每帧时长
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// 屏幕约束
    pub fn constraints(&self) -> ScreenConstraints {
        ScreenConstraints::new(self.screen.width, self.screen.height)
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
