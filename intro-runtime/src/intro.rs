//! # Intro 模块
//!
//! 蝙蝠侠欢迎页的开场动画定义。
//!
//! ## 阶段
//!
//! 1. `LogoCoveringScreen`：标志铺满屏幕
//! 2. `LogoCentered`：标志缩小到屏幕中央
//! 3. `LogoAndHint`：标志上移，欢迎语淡入
//! 4. `Completed`：按钮淡入，人物缩回原始尺寸
//!
//! | 状态 | logoHeight | logoVerticalBias | hintAlpha | buttonsAlpha | sizeMultiplier |
//! |---|---|---|---|---|---|
//! | LogoCoveringScreen | 屏幕高度 | 0 | 0 | 0 | 3 |
//! | LogoCentered | 30 | 0 | 0 | 0 | 3 |
//! | LogoAndHint | 30 | -0.2 | 1 | 0 | 3 |
//! | Completed | 30 | -0.2 | 1 | 1 | 1 |

use serde::{Deserialize, Serialize};

use crate::definition::TransitionDefinition;
use crate::driver::SequenceDriver;
use crate::error::SequenceResult;
use crate::player::SequencePlayer;
use crate::state::{AnimProperty, SequenceState};
use crate::timer::SequenceTimer;
use crate::tween::TweenSpec;

/// 标志收缩后的高度
pub const LOGO_RESTING_HEIGHT: f32 = 30.0;

/// 标志上移后的垂直偏移
pub const LOGO_RAISED_BIAS: f32 = -0.2;

/// 人物放大倍数（开场时）
pub const CHARACTER_ZOOM: f32 = 3.0;

/// 每条边的补间延迟（毫秒）
const EDGE_DELAY_MS: u64 = 300;

/// 开场状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntroState {
    LogoCoveringScreen,
    LogoCentered,
    LogoAndHint,
    Completed,
}

impl SequenceState for IntroState {
    fn name(&self) -> &'static str {
        match self {
            IntroState::LogoCoveringScreen => "LogoCoveringScreen",
            IntroState::LogoCentered => "LogoCentered",
            IntroState::LogoAndHint => "LogoAndHint",
            IntroState::Completed => "Completed",
        }
    }
}

/// 开场状态的播放顺序
pub const INTRO_STATES: [IntroState; 4] = [
    IntroState::LogoCoveringScreen,
    IntroState::LogoCentered,
    IntroState::LogoAndHint,
    IntroState::Completed,
];

/// 开场动画属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntroProperty {
    /// 标志高度
    LogoHeight,
    /// 标志垂直偏移（-1 顶部，1 底部）
    LogoVerticalBias,
    /// 欢迎语透明度
    HintAlpha,
    /// 按钮透明度
    ButtonsAlpha,
    /// 人物宽度倍数
    SizeMultiplier,
}

impl AnimProperty for IntroProperty {
    const ALL: &'static [Self] = &[
        IntroProperty::LogoHeight,
        IntroProperty::LogoVerticalBias,
        IntroProperty::HintAlpha,
        IntroProperty::ButtonsAlpha,
        IntroProperty::SizeMultiplier,
    ];

    fn name(&self) -> &'static str {
        match self {
            IntroProperty::LogoHeight => "logoHeight",
            IntroProperty::LogoVerticalBias => "logoVerticalBias",
            IntroProperty::HintAlpha => "hintAlpha",
            IntroProperty::ButtonsAlpha => "buttonsAlpha",
            IntroProperty::SizeMultiplier => "sizeMultiplier",
        }
    }
}

/// 开场过渡定义
///
/// `max_height` 是屏幕可用高度，决定标志开场时的高度。
pub fn intro_transition(
    max_height: f32,
) -> SequenceResult<TransitionDefinition<IntroState, IntroProperty>> {
    use IntroProperty::*;
    use IntroState::*;

    TransitionDefinition::builder()
        .state(
            LogoCoveringScreen,
            [
                (LogoHeight, max_height),
                (LogoVerticalBias, 0.0),
                (HintAlpha, 0.0),
                (ButtonsAlpha, 0.0),
                (SizeMultiplier, CHARACTER_ZOOM),
            ],
        )
        .state(
            LogoCentered,
            [
                (LogoHeight, LOGO_RESTING_HEIGHT),
                (LogoVerticalBias, 0.0),
                (HintAlpha, 0.0),
                (ButtonsAlpha, 0.0),
                (SizeMultiplier, CHARACTER_ZOOM),
            ],
        )
        .state(
            LogoAndHint,
            [
                (LogoHeight, LOGO_RESTING_HEIGHT),
                (LogoVerticalBias, LOGO_RAISED_BIAS),
                (HintAlpha, 1.0),
                (ButtonsAlpha, 0.0),
                (SizeMultiplier, CHARACTER_ZOOM),
            ],
        )
        .state(
            Completed,
            [
                (LogoHeight, LOGO_RESTING_HEIGHT),
                (LogoVerticalBias, LOGO_RAISED_BIAS),
                (HintAlpha, 1.0),
                (ButtonsAlpha, 1.0),
                (SizeMultiplier, 1.0),
            ],
        )
        .transition(
            LogoCoveringScreen,
            LogoCentered,
            [(LogoHeight, TweenSpec::tween(1000, EDGE_DELAY_MS))],
        )
        .transition(
            LogoCentered,
            LogoAndHint,
            [
                (LogoVerticalBias, TweenSpec::tween(2000, EDGE_DELAY_MS)),
                (HintAlpha, TweenSpec::tween(2000, EDGE_DELAY_MS)),
            ],
        )
        .transition(
            LogoAndHint,
            Completed,
            [
                (ButtonsAlpha, TweenSpec::tween(2000, EDGE_DELAY_MS)),
                (SizeMultiplier, TweenSpec::tween(2000, EDGE_DELAY_MS)),
            ],
        )
        .build(&INTRO_STATES)
}

/// 开场驱动器
pub fn intro_driver() -> SequenceResult<SequenceDriver<IntroState>> {
    SequenceDriver::new(INTRO_STATES)
}

/// 逐帧开场播放器
pub fn intro_player(max_height: f32) -> SequenceResult<SequencePlayer<IntroState, IntroProperty>> {
    SequencePlayer::new(intro_driver()?, intro_transition(max_height)?)
}

/// 实时开场计时器（需要在 tokio 运行时中启动）
pub fn intro_timer(max_height: f32) -> SequenceResult<SequenceTimer<IntroState, IntroProperty>> {
    SequenceTimer::new(intro_driver()?, intro_transition(max_height)?)
}

/// 某一时刻五个属性的快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroValues {
    pub logo_height: f32,
    pub logo_vertical_bias: f32,
    pub hint_alpha: f32,
    pub buttons_alpha: f32,
    pub size_multiplier: f32,
}

impl IntroValues {
    /// 用采样函数收集快照
    pub fn sample(mut value_of: impl FnMut(IntroProperty) -> f32) -> Self {
        Self {
            logo_height: value_of(IntroProperty::LogoHeight),
            logo_vertical_bias: value_of(IntroProperty::LogoVerticalBias),
            hint_alpha: value_of(IntroProperty::HintAlpha),
            buttons_alpha: value_of(IntroProperty::ButtonsAlpha),
            size_multiplier: value_of(IntroProperty::SizeMultiplier),
        }
    }

    /// 读取单个属性
    pub fn get(&self, property: IntroProperty) -> f32 {
        match property {
            IntroProperty::LogoHeight => self.logo_height,
            IntroProperty::LogoVerticalBias => self.logo_vertical_bias,
            IntroProperty::HintAlpha => self.hint_alpha,
            IntroProperty::ButtonsAlpha => self.buttons_alpha,
            IntroProperty::SizeMultiplier => self.size_multiplier,
        }
    }
}
