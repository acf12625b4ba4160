//! # Preview 模块
//!
//! 无窗口预览：驱动开场序列，把每帧的属性值和布局写到输出流。
//!
//! - `run`：逐帧播放到稳定
//! - `sample`：按总时间直接采样（不推进播放器）
//! - `realtime`：基于 tokio 计时器按真实时间播放

use std::io::Write;
use std::time::Duration;

use intro_runtime::{
    IntroFrame, IntroProperty, IntroState, IntroValues, Schedule, ScreenConstraints,
    SequenceError, SequenceEvent, SequencePlayer, SequenceState, intro_player, intro_timer,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{OutputFormat, PreviewConfig};

/// 预览错误
#[derive(Error, Debug)]
pub enum PreviewError {
    /// 序列配置错误
    #[error("序列错误: {0}")]
    Sequence(#[from] SequenceError),

    /// 输出失败
    #[error("输出失败: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 一帧的采样结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    pub elapsed_ms: u64,
    pub state: IntroState,
    pub values: IntroValues,
    pub frame: IntroFrame,
}

impl FrameSample {
    /// 单行文本
    pub fn to_text(&self) -> String {
        let v = &self.values;
        format!(
            "[{:>6}ms] {:<18} logoHeight={:>7.2} logoVerticalBias={:>6.3} hintAlpha={:.3} buttonsAlpha={:.3} sizeMultiplier={:.3} | logo {:.0}x{:.0} @ y={:.1}",
            self.elapsed_ms,
            self.state.name(),
            v.logo_height,
            v.logo_vertical_bias,
            v.hint_alpha,
            v.buttons_alpha,
            v.size_multiplier,
            self.frame.logo.width,
            self.frame.logo.height,
            self.frame.logo.y,
        )
    }
}

/// JSON 输出中的事件行
#[derive(Serialize)]
struct EventLine<'a> {
    event: &'a SequenceEvent<IntroState>,
}

/// 播放结束后的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSummary {
    /// 推进的总帧数
    pub frames: u64,
    /// 输出的帧数
    pub printed: u64,
    /// 播放总时长
    pub elapsed: Duration,
}

/// 逐帧预览
#[derive(Debug)]
pub struct Preview {
    config: PreviewConfig,
    player: SequencePlayer<IntroState, IntroProperty>,
}

impl Preview {
    /// 按配置创建预览（屏幕高度决定标志的开场高度）
    pub fn new(config: PreviewConfig) -> Result<Self, PreviewError> {
        let player = intro_player(config.screen.height)?;
        Ok(Self { config, player })
    }

    fn constraints(&self) -> ScreenConstraints {
        self.config.constraints()
    }

    /// 逐帧播放到稳定，每隔 `print_every` 帧输出一次
    ///
    /// 事件总是输出；最后一帧无论是否整除都会输出。
    pub fn run(&mut self, out: &mut impl Write) -> Result<PreviewSummary, PreviewError> {
        let dt = self.config.frame_interval();
        let every = u64::from(self.config.print_every.max(1));
        let mut frames = 0_u64;
        let mut printed = 0_u64;

        info!(
            fps = self.config.fps,
            width = self.config.screen.width,
            height = self.config.screen.height,
            "开始逐帧预览"
        );

        let events = self.player.start()?;
        self.write_events(out, &events)?;
        self.write_frame(out, &self.current_sample())?;
        printed += 1;

        while !self.player.is_settled() {
            let events = self.player.update(dt);
            frames += 1;
            self.write_events(out, &events)?;

            if frames % every == 0 || self.player.is_settled() {
                self.write_frame(out, &self.current_sample())?;
                printed += 1;
            }
        }

        let summary = PreviewSummary {
            frames,
            printed,
            elapsed: self.player.elapsed(),
        };
        debug!(?summary, "逐帧预览结束");
        Ok(summary)
    }

    /// 当前帧
    pub fn current_sample(&self) -> FrameSample {
        let values = IntroValues::sample(|p| self.player.current_value(p));
        FrameSample {
            elapsed_ms: self.player.elapsed().as_millis() as u64,
            state: self.player.driver().current_state(),
            values,
            frame: IntroFrame::compute(self.constraints(), &values),
        }
    }

    /// 启动后 `at` 时刻的帧（纯函数，不影响播放）
    pub fn sample(&self, at: Duration) -> FrameSample {
        let values = IntroValues::sample(|p| self.player.value_at(p, at));
        let index = self.player.schedule().index_at(at);
        FrameSample {
            elapsed_ms: at.as_millis() as u64,
            state: self.player.driver().states()[index],
            values,
            frame: IntroFrame::compute(self.constraints(), &values),
        }
    }

    /// 时间表
    pub fn schedule(&self) -> &Schedule<IntroState> {
        self.player.schedule()
    }

    /// 输出一帧
    pub fn write_frame(&self, out: &mut impl Write, sample: &FrameSample) -> Result<(), PreviewError> {
        match self.config.format {
            OutputFormat::Text => writeln!(out, "{}", sample.to_text())?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(sample)?)?,
        }
        Ok(())
    }

    fn write_events(
        &self,
        out: &mut impl Write,
        events: &[SequenceEvent<IntroState>],
    ) -> Result<(), PreviewError> {
        for event in events {
            match self.config.format {
                OutputFormat::Text => writeln!(out, "-- {}", describe_event(event))?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string(&EventLine { event })?)?
                }
            }
        }
        Ok(())
    }

    /// 输出时间表
    pub fn write_timeline(&self, out: &mut impl Write) -> Result<(), PreviewError> {
        let schedule = self.schedule();
        match self.config.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(schedule)?)?,
            OutputFormat::Text => {
                writeln!(out, "initial: {}", schedule.initial().name())?;
                for edge in schedule.edges() {
                    let animated: Vec<&str> = self
                        .player
                        .definition()
                        .animated_properties(edge.from, edge.to)
                        .iter()
                        .map(|p| intro_runtime::AnimProperty::name(p))
                        .collect();
                    writeln!(
                        out,
                        "#{} {:>6}ms -> {:>6}ms  {} -> {}  [{}]",
                        edge.index,
                        edge.start.as_millis(),
                        edge.end().as_millis(),
                        edge.from.name(),
                        edge.to.name(),
                        animated.join(", ")
                    )?;
                }
                writeln!(out, "total: {}ms", schedule.total().as_millis())?;
            }
        }
        Ok(())
    }
}

/// 事件的文本描述
pub fn describe_event(event: &SequenceEvent<IntroState>) -> String {
    match event {
        SequenceEvent::Started { state } => format!("Started at {}", state.name()),
        SequenceEvent::Advanced { from, to, index } => {
            format!("Advanced {} -> {} (#{})", from.name(), to.name(), index)
        }
        SequenceEvent::Settled { state } => format!("Settled at {}", state.name()),
    }
}

/// 按真实时间播放
///
/// 使用 [`intro_runtime::SequenceTimer`] 推进，每帧采样一次，
/// 序列总时长结束后停止计时器。必须在 tokio 运行时中调用。
pub async fn run_realtime(
    config: &PreviewConfig,
    out: &mut impl Write,
) -> Result<PreviewSummary, PreviewError> {
    let mut timer = intro_timer(config.screen.height)?;
    let schedule = Schedule::new(timer.definition().states(), timer.definition())?;
    let total = schedule.total();
    let every = u64::from(config.print_every.max(1));
    let constraints = config.constraints();

    info!(total_ms = total.as_millis() as u64, "开始实时预览");

    let started = tokio::time::Instant::now();
    timer.start()?;

    let mut ticker = tokio::time::interval(config.frame_interval());
    let mut frames = 0_u64;
    let mut printed = 0_u64;
    loop {
        ticker.tick().await;
        let elapsed = started.elapsed();
        let done = elapsed >= total;

        if frames % every == 0 || done {
            let values = IntroValues::sample(|p| timer.current_value(p));
            let sample = FrameSample {
                elapsed_ms: elapsed.as_millis() as u64,
                state: timer.current_state(),
                values,
                frame: IntroFrame::compute(constraints, &values),
            };
            match config.format {
                OutputFormat::Text => writeln!(out, "{}", sample.to_text())?,
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&sample)?)?,
            }
            printed += 1;
        }
        frames += 1;

        if done {
            break;
        }
    }

    timer.stop();
    Ok(PreviewSummary {
        frames,
        printed,
        elapsed: started.elapsed(),
    })
}
