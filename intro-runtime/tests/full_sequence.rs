//! # 完整开场序列集成测试
//!
//! 从启动到稳定，逐帧推进与按总时间采样两种方式都要得到相同的关键帧。

use std::time::Duration;

use intro_runtime::{
    AnimProperty, IntroFrame, IntroProperty, IntroState, IntroValues, ScreenConstraints,
    SequenceDriver, SequenceError, SequenceEvent, TransitionDefinition, TweenSpec, intro_player,
    intro_transition,
};

const MAX_HEIGHT: f32 = 731.0;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// 逐帧推进到指定总时间（每步 1ms 以命中边界）
fn play_until(target_ms: u64) -> intro_runtime::SequencePlayer<IntroState, IntroProperty> {
    let mut player = intro_player(MAX_HEIGHT).unwrap();
    player.start().unwrap();
    for _ in 0..target_ms {
        player.update(ms(1));
    }
    player
}

#[test]
fn test_keyframes_by_stepping() {
    use IntroProperty::*;

    assert_eq!(play_until(0).current_value(LogoHeight), MAX_HEIGHT);
    // 仍在延迟中
    assert_eq!(play_until(300).current_value(LogoHeight), MAX_HEIGHT);
    // 第一条边完成
    assert_eq!(play_until(1300).current_value(LogoHeight), 30.0);
    // 第二条边的延迟
    assert_eq!(play_until(1600).current_value(LogoVerticalBias), 0.0);

    let p = play_until(3600);
    assert_eq!(p.current_value(LogoVerticalBias), -0.2);
    assert_eq!(p.current_value(HintAlpha), 1.0);

    assert_eq!(play_until(3900).current_value(ButtonsAlpha), 0.0);

    let p = play_until(5900);
    assert_eq!(p.current_value(ButtonsAlpha), 1.0);
    assert_eq!(p.current_value(SizeMultiplier), 1.0);
    assert!(p.is_settled());
}

#[test]
fn test_keyframes_by_pure_sampling() {
    use IntroProperty::*;

    let player = intro_player(MAX_HEIGHT).unwrap();
    let cases = [
        (0, LogoHeight, MAX_HEIGHT),
        (300, LogoHeight, MAX_HEIGHT),
        (1300, LogoHeight, 30.0),
        (1600, LogoVerticalBias, 0.0),
        (3600, LogoVerticalBias, -0.2),
        (3600, HintAlpha, 1.0),
        (3900, ButtonsAlpha, 0.0),
        (5900, ButtonsAlpha, 1.0),
        (5900, SizeMultiplier, 1.0),
    ];

    for (at, property, expected) in cases {
        assert_eq!(
            player.value_at(property, ms(at)),
            expected,
            "{property:?} @ {at}ms"
        );
        // 重复采样结果一致
        assert_eq!(player.value_at(property, ms(at)), expected);
    }
}

#[test]
fn test_hint_alpha_monotonic() {
    let definition = intro_transition(MAX_HEIGHT).unwrap();
    let mut prev = 0.0;
    for t in (300..=2300).step_by(7) {
        let v = definition.value_of(
            IntroState::LogoCentered,
            IntroState::LogoAndHint,
            IntroProperty::HintAlpha,
            ms(t),
        );
        assert!(v >= prev, "hintAlpha 在 {t}ms 处下降");
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
}

#[test]
fn test_logo_height_no_overshoot() {
    let definition = intro_transition(MAX_HEIGHT).unwrap();
    for t in (0..=5000).step_by(13) {
        let v = definition.value_of(
            IntroState::LogoCoveringScreen,
            IntroState::LogoCentered,
            IntroProperty::LogoHeight,
            ms(t),
        );
        assert!((30.0..=MAX_HEIGHT).contains(&v));
    }
}

#[test]
fn test_terminal_advance_idempotent() {
    let mut player = play_until(6000);
    let driver = player.driver().clone();
    assert!(driver.is_terminal());
    assert!(player.update(ms(1000)).is_empty());
    assert_eq!(player.driver().current_index(), 3);

    let mut driver = driver;
    for _ in 0..5 {
        assert_eq!(driver.advance(), IntroState::Completed);
        assert_eq!(driver.current_index(), 3);
    }
}

#[test]
fn test_empty_driver_rejected() {
    assert!(matches!(
        SequenceDriver::<IntroState>::new(Vec::new()),
        Err(SequenceError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_missing_size_multiplier_rejected_at_build() {
    use IntroProperty::*;
    use IntroState::*;

    let full = |state: IntroState| {
        IntroProperty::ALL
            .iter()
            .map(move |p| (*p, if state == Completed { 1.0_f32 } else { 0.0 }))
            .collect::<Vec<_>>()
    };

    let result = TransitionDefinition::builder()
        .state(LogoCoveringScreen, full(LogoCoveringScreen))
        .state(LogoCentered, full(LogoCentered))
        .state(LogoAndHint, full(LogoAndHint))
        .state(
            Completed,
            [
                (LogoHeight, 30.0),
                (LogoVerticalBias, -0.2),
                (HintAlpha, 1.0),
                (ButtonsAlpha, 1.0),
            ],
        )
        .transition(LogoAndHint, Completed, [(ButtonsAlpha, TweenSpec::tween(2000, 300))])
        .build(&intro_runtime::INTRO_STATES);

    assert_eq!(
        result.unwrap_err(),
        SequenceError::IncompleteDefinition {
            property: "sizeMultiplier".to_string(),
            state: "Completed".to_string(),
        }
    );
}

#[test]
fn test_event_stream() {
    let mut player = intro_player(MAX_HEIGHT).unwrap();
    let mut events = player.start().unwrap();
    events.extend(player.update(ms(10_000)));

    insta::assert_debug_snapshot!(events, @r"
    [
        Started {
            state: LogoCoveringScreen,
        },
        Advanced {
            from: LogoCoveringScreen,
            to: LogoCentered,
            index: 1,
        },
        Advanced {
            from: LogoCentered,
            to: LogoAndHint,
            index: 2,
        },
        Advanced {
            from: LogoAndHint,
            to: Completed,
            index: 3,
        },
        Settled {
            state: Completed,
        },
    ]
    ");
}

#[test]
fn test_events_serialize() {
    let event = SequenceEvent::Advanced {
        from: IntroState::LogoCentered,
        to: IntroState::LogoAndHint,
        index: 2,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["Advanced"]["to"], "LogoAndHint");
}

#[test]
fn test_frame_follows_sequence() {
    let screen = ScreenConstraints::new(411.0, MAX_HEIGHT);
    let player = intro_player(MAX_HEIGHT).unwrap();

    let start = IntroFrame::compute(
        screen,
        &IntroValues::sample(|p| player.value_at(p, Duration::ZERO)),
    );
    let end = IntroFrame::compute(
        screen,
        &IntroValues::sample(|p| player.value_at(p, ms(5900))),
    );

    assert!(start.logo.height > end.logo.height);
    assert!(start.character.width > end.character.width);
    assert_eq!(start.buttons_alpha, 0.0);
    assert_eq!(end.buttons_alpha, 1.0);
}
