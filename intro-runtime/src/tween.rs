//! # Tween 模块
//!
//! 单个属性在一条边上的补间规格与纯函数采样。
//!
//! 与逐帧累加的动画实例不同，这里的采样只依赖"边开始后经过的时间"，
//! 同一时刻重复采样得到同一结果。

use std::time::Duration;

use serde::Serialize;

use crate::easing::EasingFunction;

/// 补间阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenPhase {
    /// 延迟中，保持起始值
    Pending,
    /// 插值中
    Playing,
    /// 已到达目标值
    Completed,
}

/// 补间规格：时长、延迟与缓动
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TweenSpec {
    /// 插值时长
    pub duration: Duration,
    /// 边开始后、插值开始前的等待
    pub delay: Duration,
    /// 缓动函数
    pub easing: EasingFunction,
}

impl TweenSpec {
    /// 创建线性补间（毫秒）
    pub fn tween(duration_ms: u64, delay_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            delay: Duration::from_millis(delay_ms),
            easing: EasingFunction::Linear,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 延迟 + 时长
    pub fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// 指定时刻所处的阶段
    pub fn phase_at(&self, elapsed: Duration) -> TweenPhase {
        if elapsed >= self.total() {
            TweenPhase::Completed
        } else if elapsed <= self.delay {
            TweenPhase::Pending
        } else {
            TweenPhase::Playing
        }
    }

    /// 指定时刻的缓动进度（0.0 - 1.0）
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        match self.phase_at(elapsed) {
            TweenPhase::Pending => 0.0,
            TweenPhase::Completed => 1.0,
            TweenPhase::Playing => {
                let raw = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
                self.easing.apply(raw)
            }
        }
    }

    /// 采样 `from → to` 在指定时刻的值
    ///
    /// 延迟期间返回 `from`，结束后精确返回 `to`。
    pub fn sample(&self, from: f32, to: f32, elapsed: Duration) -> f32 {
        match self.phase_at(elapsed) {
            TweenPhase::Pending => from,
            TweenPhase::Completed => to,
            TweenPhase::Playing => from + (to - from) * self.progress_at(elapsed),
        }
    }
}

/// 某属性在一条边上的行为
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeSpec {
    /// 按规格补间
    Tween(TweenSpec),
    /// 边开始时直接跳到目标值
    Snap,
}

impl EdgeSpec {
    /// 采样 `from → to` 在指定时刻的值
    pub fn sample(&self, from: f32, to: f32, elapsed: Duration) -> f32 {
        match self {
            EdgeSpec::Tween(spec) => spec.sample(from, to, elapsed),
            EdgeSpec::Snap => to,
        }
    }

    /// 是否为补间
    pub fn is_tween(&self) -> bool {
        matches!(self, EdgeSpec::Tween(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_phases() {
        let spec = TweenSpec::tween(1000, 300);
        assert_eq!(spec.phase_at(ms(0)), TweenPhase::Pending);
        assert_eq!(spec.phase_at(ms(300)), TweenPhase::Pending);
        assert_eq!(spec.phase_at(ms(301)), TweenPhase::Playing);
        assert_eq!(spec.phase_at(ms(1300)), TweenPhase::Completed);
        assert_eq!(spec.total(), ms(1300));
    }

    #[test]
    fn test_sample_boundaries() {
        let spec = TweenSpec::tween(1000, 300);
        assert_eq!(spec.sample(731.0, 30.0, ms(0)), 731.0);
        assert_eq!(spec.sample(731.0, 30.0, ms(300)), 731.0);
        assert_eq!(spec.sample(731.0, 30.0, ms(1300)), 30.0);
        assert_eq!(spec.sample(731.0, 30.0, ms(10_000)), 30.0);
    }

    #[test]
    fn test_sample_midpoint() {
        let spec = TweenSpec::tween(2000, 300);
        let v = spec.sample(0.0, 1.0, ms(1300));
        assert!((v - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_sample_is_pure() {
        let spec = TweenSpec::tween(2000, 300).with_easing(EasingFunction::FastOutSlowIn);
        let a = spec.sample(3.0, 1.0, ms(1234));
        let b = spec.sample(3.0, 1.0, ms(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_duration() {
        // 零时长：延迟结束即完成
        let spec = TweenSpec::tween(0, 300);
        assert_eq!(spec.sample(0.0, 1.0, ms(299)), 0.0);
        assert_eq!(spec.sample(0.0, 1.0, ms(300)), 1.0);
    }

    #[test]
    fn test_snap() {
        assert_eq!(EdgeSpec::Snap.sample(0.0, -0.2, ms(0)), -0.2);
        assert!(!EdgeSpec::Snap.is_tween());
    }
}
