//! # Error 模块
//!
//! 定义 intro-runtime 中使用的错误类型。
//!
//! 只有配置期错误：构建驱动器或过渡定义时立即返回，采样阶段不会失败。

use thiserror::Error;

/// 序列错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    /// 无效的序列配置（空状态列表、非相邻边、非有限目标值等）
    #[error("无效的序列配置：{message}")]
    InvalidConfiguration { message: String },

    /// 过渡定义缺少某个属性在某个状态下的目标值
    #[error("过渡定义不完整：属性 '{property}' 在状态 '{state}' 下没有目标值")]
    IncompleteDefinition { property: String, state: String },

    /// 驱动器已经启动过
    #[error("序列已经启动，不能重复启动")]
    AlreadyStarted,
}

impl SequenceError {
    /// 创建配置错误
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type SequenceResult<T> = Result<T, SequenceError>;
