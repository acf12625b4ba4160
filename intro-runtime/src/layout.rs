//! # Layout 模块
//!
//! 把一帧的属性快照换算成欢迎页各元素的位置与透明度，
//! 供渲染端直接使用。
//!
//! ## 元素
//!
//! - 背景图：宽度为屏幕宽度的正方形，贴顶
//! - 人物：宽 `屏宽 * sizeMultiplier`，高 `屏宽 * 1.11`，底部与背景对齐，水平居中
//! - 标志：高 `logoHeight * 2`，宽为高的两倍，按垂直偏移定位
//! - 欢迎语：垂直偏移 0.1，透明度 `hintAlpha`
//! - 按钮：两个 300x48 按钮，间距 16，底部留白 80，透明度 `buttonsAlpha`

use serde::{Deserialize, Serialize};

use crate::intro::IntroValues;

/// 人物图片高宽比
const CHARACTER_ASPECT: f32 = 1.11;
/// 欢迎语的垂直偏移
const HINT_VERTICAL_BIAS: f32 = 0.1;
/// 按钮尺寸
const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 48.0;
/// 按钮之间的间距
const BUTTON_SPACING: f32 = 16.0;
/// 按钮区距底部的留白
const BUTTONS_BOTTOM_PADDING: f32 = 80.0;

/// 屏幕可用尺寸
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConstraints {
    pub max_width: f32,
    pub max_height: f32,
}

impl ScreenConstraints {
    pub fn new(max_width: f32, max_height: f32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// 按绝对偏移在容器内放置子元素
    ///
    /// 偏移 -1 贴起始边，0 居中，1 贴末端边；超出 [-1, 1] 会放到容器外。
    fn align(container: f32, child: f32, bias: f32) -> f32 {
        (container - child) / 2.0 * (1.0 + bias)
    }
}

/// 矩形区域
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 底边位置
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// 水平中心
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// 按钮上小标志图标的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IconPosition {
    Left,
    Right,
}

/// 欢迎页按钮
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonLayout {
    pub label: &'static str,
    pub icon: IconPosition,
    pub bounds: Rect,
}

impl ButtonLayout {
    /// 点击处理（页面只展示，不做跳转）
    pub fn on_click(&self) {}
}

/// 欢迎语
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HintLayout {
    pub lines: [&'static str; 3],
    pub vertical_bias: f32,
    /// 零尺寸锚点的纵坐标（实际文字高度由渲染端决定）
    pub anchor_y: f32,
    pub alpha: f32,
}

/// 一帧的完整布局
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroFrame {
    pub background: Rect,
    pub character: Rect,
    pub logo: Rect,
    pub hint: HintLayout,
    pub buttons: Vec<ButtonLayout>,
    pub buttons_alpha: f32,
}

impl IntroFrame {
    /// 由屏幕尺寸和属性快照计算布局
    pub fn compute(screen: ScreenConstraints, values: &IntroValues) -> Self {
        let width = screen.max_width;
        let height = screen.max_height;

        let background = Rect::new(0.0, 0.0, width, width);

        let character_width = width * values.size_multiplier;
        let character_height = width * CHARACTER_ASPECT;
        let character = Rect::new(
            (width - character_width) / 2.0,
            background.bottom() - character_height,
            character_width,
            character_height,
        );

        let logo_height = values.logo_height * 2.0;
        let logo_width = logo_height * 2.0;
        let logo = Rect::new(
            ScreenConstraints::align(width, logo_width, 0.0),
            ScreenConstraints::align(height, logo_height, values.logo_vertical_bias),
            logo_width,
            logo_height,
        );

        // 第三行是占位文案，正式文案由宿主的本地化资源提供
        let hint = HintLayout {
            lines: ["WELCOME TO", "GOTHAM CITY", "You need access to enter the city"],
            vertical_bias: HINT_VERTICAL_BIAS,
            anchor_y: ScreenConstraints::align(height, 0.0, HINT_VERTICAL_BIAS),
            alpha: values.hint_alpha,
        };

        let column_height = BUTTON_HEIGHT * 2.0 + BUTTON_SPACING;
        let column_top = height - BUTTONS_BOTTOM_PADDING - column_height;
        let button_x = (width - BUTTON_WIDTH) / 2.0;
        let buttons = vec![
            ButtonLayout {
                label: "LOGIN",
                icon: IconPosition::Right,
                bounds: Rect::new(button_x, column_top, BUTTON_WIDTH, BUTTON_HEIGHT),
            },
            ButtonLayout {
                label: "SIGNUP",
                icon: IconPosition::Left,
                bounds: Rect::new(
                    button_x,
                    column_top + BUTTON_HEIGHT + BUTTON_SPACING,
                    BUTTON_WIDTH,
                    BUTTON_HEIGHT,
                ),
            },
        ];

        Self {
            background,
            character,
            logo,
            hint,
            buttons,
            buttons_alpha: values.buttons_alpha,
        }
    }
}
