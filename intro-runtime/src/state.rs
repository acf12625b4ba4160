//! # State 模块
//!
//! 序列状态与可动画属性的抽象。
//!
//! 驱动器和过渡定义只依赖这两个 trait，具体的状态/属性由使用方用枚举定义
//! （见 [`crate::intro`]）。

use std::fmt::Debug;
use std::hash::Hash;

/// 序列状态
///
/// 一个状态代表时间轴上的一个具名步骤。顺序由传给驱动器的列表决定，
/// 不由枚举声明顺序决定。
pub trait SequenceState: Copy + Eq + Hash + Debug + 'static {
    /// 状态名称（用于日志与错误信息）
    fn name(&self) -> &'static str;
}

/// 可动画属性
///
/// 每个属性是一个 f32 值，驱动一个视觉特征（尺寸、位置偏移、透明度、缩放）。
pub trait AnimProperty: Copy + Eq + Hash + Debug + 'static {
    /// 全部属性，过渡定义构建时据此检查完整性
    const ALL: &'static [Self];

    /// 属性名称（用于日志与错误信息）
    fn name(&self) -> &'static str;
}
