//! # Definition 模块
//!
//! 过渡定义：每个状态下每个属性的目标值，以及相邻状态之间的补间规格。
//!
//! ## 校验
//!
//! 所有校验都在 [`TransitionDefinitionBuilder::build`] 中完成，
//! 构建成功后的采样不会失败：
//! - 状态列表非空
//! - 每个 (属性, 状态) 都有有限的目标值
//! - 每条边都连接列表中相邻的两个状态
//!
//! 构建时的状态顺序会保存在定义中，播放器和计时器要求驱动器使用同一顺序。
//!
//! ```rust,ignore
//! let definition = TransitionDefinition::builder()
//!     .state(State::A, [(Prop::Alpha, 0.0)])
//!     .state(State::B, [(Prop::Alpha, 1.0)])
//!     .transition(State::A, State::B, [(Prop::Alpha, TweenSpec::tween(300, 0))])
//!     .build(&[State::A, State::B])?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{SequenceError, SequenceResult};
use crate::state::{AnimProperty, SequenceState};
use crate::tween::{EdgeSpec, TweenSpec};

/// 过渡定义
#[derive(Debug, Clone)]
pub struct TransitionDefinition<S: SequenceState, P: AnimProperty> {
    /// 构建时校验过的状态顺序
    states: Vec<S>,
    /// (状态, 属性) -> 目标值
    targets: HashMap<(S, P), f32>,
    /// (起点, 终点) -> 属性 -> 补间
    edges: HashMap<(S, S), HashMap<P, TweenSpec>>,
}

impl<S: SequenceState, P: AnimProperty> TransitionDefinition<S, P> {
    /// 创建构建器
    pub fn builder() -> TransitionDefinitionBuilder<S, P> {
        TransitionDefinitionBuilder::new()
    }

    /// 构建时的状态顺序
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// 属性在状态下的目标值
    ///
    /// `state` 必须是 [`Self::states`] 中的状态；其他状态没有目标值，返回 0。
    pub fn target(&self, property: P, state: S) -> f32 {
        let value = self.targets.get(&(state, property)).copied();
        debug_assert!(
            value.is_some(),
            "状态 '{}' 不在过渡定义中",
            state.name()
        );
        value.unwrap_or_default()
    }

    /// 属性在边上的行为
    pub fn edge_spec(&self, from: S, to: S, property: P) -> EdgeSpec {
        self.edges
            .get(&(from, to))
            .and_then(|specs| specs.get(&property))
            .map_or(EdgeSpec::Snap, |spec| EdgeSpec::Tween(*spec))
    }

    /// 一条边的等待时长：所有补间中 `delay + duration` 的最大值
    pub fn edge_wait(&self, from: S, to: S) -> Duration {
        self.edges
            .get(&(from, to))
            .and_then(|specs| specs.values().map(TweenSpec::total).max())
            .unwrap_or_default()
    }

    /// 采样属性在边开始后 `elapsed` 时刻的值
    pub fn value_of(&self, from: S, to: S, property: P, elapsed: Duration) -> f32 {
        self.edge_spec(from, to, property).sample(
            self.target(property, from),
            self.target(property, to),
            elapsed,
        )
    }

    /// 检查状态顺序与构建时一致
    ///
    /// 顺序不同（或状态缺失、多余）时返回 `InvalidConfiguration`。
    pub fn check_order(&self, states: &[S]) -> SequenceResult<()> {
        if states == self.states.as_slice() {
            return Ok(());
        }
        Err(SequenceError::invalid(format!(
            "状态顺序 [{}] 与过渡定义 [{}] 不一致",
            state_names(states),
            state_names(&self.states)
        )))
    }

    /// 边上声明了补间的属性
    pub fn animated_properties(&self, from: S, to: S) -> Vec<P> {
        P::ALL
            .iter()
            .copied()
            .filter(|p| self.edge_spec(from, to, *p).is_tween())
            .collect()
    }
}

fn state_names<S: SequenceState>(states: &[S]) -> String {
    states.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
}

/// 每个 (属性, 状态) 都必须有有限的目标值
fn check_targets<S: SequenceState, P: AnimProperty>(
    targets: &HashMap<(S, P), f32>,
    states: &[S],
) -> SequenceResult<()> {
    for state in states {
        for property in P::ALL {
            let value = targets.get(&(*state, *property)).ok_or_else(|| {
                SequenceError::IncompleteDefinition {
                    property: property.name().to_string(),
                    state: state.name().to_string(),
                }
            })?;
            if !value.is_finite() {
                return Err(SequenceError::invalid(format!(
                    "属性 '{}' 在状态 '{}' 下的目标值不是有限数: {}",
                    property.name(),
                    state.name(),
                    value
                )));
            }
        }
    }
    Ok(())
}

/// 过渡定义构建器
#[derive(Debug, Clone)]
pub struct TransitionDefinitionBuilder<S: SequenceState, P: AnimProperty> {
    targets: HashMap<(S, P), f32>,
    edges: HashMap<(S, S), HashMap<P, TweenSpec>>,
}

impl<S: SequenceState, P: AnimProperty> Default for TransitionDefinitionBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SequenceState, P: AnimProperty> TransitionDefinitionBuilder<S, P> {
    /// 创建空构建器
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// 设置状态下的目标值（重复设置以后者为准）
    pub fn state(mut self, state: S, targets: impl IntoIterator<Item = (P, f32)>) -> Self {
        for (property, value) in targets {
            self.targets.insert((state, property), value);
        }
        self
    }

    /// 声明一条边上的补间
    pub fn transition(
        mut self,
        from: S,
        to: S,
        specs: impl IntoIterator<Item = (P, TweenSpec)>,
    ) -> Self {
        self.edges.entry((from, to)).or_default().extend(specs);
        self
    }

    /// 按给定状态顺序校验并构建
    pub fn build(self, states: &[S]) -> SequenceResult<TransitionDefinition<S, P>> {
        if states.is_empty() {
            return Err(SequenceError::invalid("状态列表为空"));
        }

        check_targets(&self.targets, states)?;

        for (from, to) in self.edges.keys() {
            let adjacent = states.windows(2).any(|w| w[0] == *from && w[1] == *to);
            if !adjacent {
                return Err(SequenceError::invalid(format!(
                    "过渡 '{}' -> '{}' 不是序列中的相邻状态",
                    from.name(),
                    to.name()
                )));
            }
        }

        Ok(TransitionDefinition {
            states: states.to_vec(),
            targets: self.targets,
            edges: self.edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Off,
        Dim,
        On,
    }

    impl SequenceState for Light {
        fn name(&self) -> &'static str {
            match self {
                Light::Off => "Off",
                Light::Dim => "Dim",
                Light::On => "On",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Lamp {
        Alpha,
        Scale,
    }

    impl AnimProperty for Lamp {
        const ALL: &'static [Self] = &[Lamp::Alpha, Lamp::Scale];

        fn name(&self) -> &'static str {
            match self {
                Lamp::Alpha => "alpha",
                Lamp::Scale => "scale",
            }
        }
    }

    const STATES: [Light; 3] = [Light::Off, Light::Dim, Light::On];

    fn builder() -> TransitionDefinitionBuilder<Light, Lamp> {
        TransitionDefinition::builder()
            .state(Light::Off, [(Lamp::Alpha, 0.0), (Lamp::Scale, 1.0)])
            .state(Light::Dim, [(Lamp::Alpha, 0.5), (Lamp::Scale, 1.0)])
            .state(Light::On, [(Lamp::Alpha, 1.0), (Lamp::Scale, 2.0)])
            .transition(Light::Off, Light::Dim, [(Lamp::Alpha, TweenSpec::tween(100, 0))])
            .transition(
                Light::Dim,
                Light::On,
                [
                    (Lamp::Alpha, TweenSpec::tween(200, 50)),
                    (Lamp::Scale, TweenSpec::tween(400, 100)),
                ],
            )
    }

    #[test]
    fn test_build_and_targets() {
        let def = builder().build(&STATES).unwrap();
        assert_eq!(def.target(Lamp::Alpha, Light::Dim), 0.5);
        assert_eq!(def.target(Lamp::Scale, Light::On), 2.0);
    }

    #[test]
    fn test_edge_wait_is_longest_tween() {
        let def = builder().build(&STATES).unwrap();
        assert_eq!(def.edge_wait(Light::Off, Light::Dim), Duration::from_millis(100));
        assert_eq!(def.edge_wait(Light::Dim, Light::On), Duration::from_millis(500));
    }

    #[test]
    fn test_unlisted_property_snaps() {
        let def = builder().build(&STATES).unwrap();
        assert_eq!(def.edge_spec(Light::Off, Light::Dim, Lamp::Scale), EdgeSpec::Snap);
        // Scale 在 Off->Dim 上没有补间，始终是目标值
        assert_eq!(def.value_of(Light::Off, Light::Dim, Lamp::Scale, Duration::ZERO), 1.0);
        assert_eq!(def.animated_properties(Light::Off, Light::Dim), vec![Lamp::Alpha]);
    }

    #[test]
    fn test_missing_target_is_incomplete() {
        let result = TransitionDefinition::<Light, Lamp>::builder()
            .state(Light::Off, [(Lamp::Alpha, 0.0), (Lamp::Scale, 1.0)])
            .state(Light::Dim, [(Lamp::Alpha, 0.5)])
            .build(&[Light::Off, Light::Dim]);

        assert_eq!(
            result.unwrap_err(),
            SequenceError::IncompleteDefinition {
                property: "scale".to_string(),
                state: "Dim".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_states() {
        let result = builder().build(&[]);
        assert!(matches!(
            result,
            Err(SequenceError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_non_adjacent_edge() {
        let result = builder()
            .transition(Light::Off, Light::On, [(Lamp::Alpha, TweenSpec::tween(100, 0))])
            .build(&STATES);
        assert!(matches!(
            result,
            Err(SequenceError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_non_finite_target() {
        let result = builder().state(Light::On, [(Lamp::Scale, f32::NAN)]).build(&STATES);
        assert!(matches!(
            result,
            Err(SequenceError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_state_order_kept() {
        let def = builder().build(&STATES).unwrap();
        assert_eq!(def.states(), &STATES);
        assert!(def.check_order(&STATES).is_ok());
    }

    #[test]
    fn test_reordered_states_rejected() {
        let def = builder().build(&STATES).unwrap();

        // 顺序不同
        assert!(matches!(
            def.check_order(&[Light::Dim, Light::Off, Light::On]),
            Err(SequenceError::InvalidConfiguration { .. })
        ));
        // 缺少状态
        assert!(matches!(
            def.check_order(&[Light::Off, Light::Dim]),
            Err(SequenceError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "不在过渡定义中")]
    fn test_target_of_unknown_state() {
        let def = TransitionDefinition::<Light, Lamp>::builder()
            .state(Light::Off, [(Lamp::Alpha, 0.0), (Lamp::Scale, 1.0)])
            .state(Light::Dim, [(Lamp::Alpha, 0.5), (Lamp::Scale, 1.0)])
            .build(&[Light::Off, Light::Dim])
            .unwrap();
        def.target(Lamp::Alpha, Light::On);
    }
}
