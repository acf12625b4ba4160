//! # Easing 模块
//!
//! 缓动函数，把线性时间进度映射为动画进度。
//!
//! 所有函数都把输入限制在 `[0, 1]`，并且在 `[0, 1]` 上单调不减，
//! 因此补间采样不会越过起点或终点。

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速），tween 的默认值
    #[default]
    Linear,
    /// 缓入（Cubic）
    EaseIn,
    /// 缓出（Cubic）
    EaseOut,
    /// 缓入缓出（Cubic）
    EaseInOut,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// Material 标准曲线 cubic-bezier(0.4, 0.0, 0.2, 1.0)
    FastOutSlowIn,
}

impl EasingFunction {
    /// 计算缓动后的进度
    ///
    /// # 参数
    /// - `t`: 时间进度，超出 `[0, 1]` 会被截断
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseInOutSine => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            EasingFunction::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// 二分求解 cubic-bezier 曲线在横坐标 `x` 处的纵坐标
///
/// 控制点需满足 `x1, x2 ∈ [0, 1]`，此时曲线横坐标单调，二分必然收敛。
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    let mut s = x;
    for _ in 0..32 {
        let bx = bezier_component(x1, x2, s);
        if (bx - x).abs() < 1e-6 {
            break;
        }
        if bx < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }

    bezier_component(y1, y2, s).clamp(0.0, 1.0)
}

/// 起点 0、终点 1 的三次贝塞尔分量
fn bezier_component(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}
