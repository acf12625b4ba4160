//! # xtask
//!
//! 本地开发命令，通过 `cargo xtask <command>` 调用（别名见 `.cargo/config.toml`）。
//!
//! - `check-all`: fmt / clippy / test 门禁
//! - `cov-runtime`, `cov-workspace`: llvm-cov 覆盖率报告
//! - `sequence-check [height...]`: 按屏幕高度回放开场序列并核对采样结果

use std::process::{Command, ExitCode};
use std::time::Duration;

use intro_runtime::{
    AnimProperty, IntroProperty, IntroState, SequencePlayer, SequenceState, intro_player,
};

type IntroPlayer = SequencePlayer<IntroState, IntroProperty>;

/// 门禁依次执行的 cargo 命令
const CHECK_STEPS: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

/// 回放的帧间隔
const FRAME: Duration = Duration::from_millis(16);

/// 逐帧值与纯采样值允许的误差
const TOLERANCE: f32 = 1e-3;

const DEFAULT_HEIGHTS: [f32; 3] = [640.0, 731.0, 915.0];

fn main() -> ExitCode {
    match dispatch(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(args: Vec<String>) -> anyhow::Result<()> {
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => ("help", &[][..]),
    };

    match command {
        "check-all" => CHECK_STEPS.iter().try_for_each(|step| cargo(step)),
        "cov-runtime" => coverage(&["-p", "intro-runtime"]),
        "cov-workspace" => coverage(&["--workspace", "--exclude", "xtask"]),
        "sequence-check" => {
            let heights = rest
                .iter()
                .map(|a| {
                    a.parse::<f32>()
                        .map_err(|e| anyhow::anyhow!("无效的屏幕高度 {a}: {e}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            sequence_check(&heights)
        }
        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }
}

/// 执行一条 cargo 命令，失败时报错退出
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {line}");
    let status = Command::new("cargo").args(args).status()?;
    anyhow::ensure!(status.success(), "{line} failed with {status}");
    Ok(())
}

/// 生成 HTML 覆盖率报告
fn coverage(selection: &[&str]) -> anyhow::Result<()> {
    let installed = Command::new("cargo")
        .args(["llvm-cov", "--version"])
        .status()
        .is_ok_and(|s| s.success());
    anyhow::ensure!(
        installed,
        "未找到 cargo llvm-cov，请先执行 `cargo install cargo-llvm-cov` \
         和 `rustup component add llvm-tools-preview`"
    );

    let mut args = vec!["llvm-cov"];
    args.extend_from_slice(selection);
    args.extend_from_slice(&["--all-features", "--html"]);
    cargo(&args)?;

    eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"cargo xtask <command>

  check-all                 fmt + clippy + test
  cov-runtime               intro-runtime 覆盖率
  cov-workspace             workspace 覆盖率（不含 xtask）
  sequence-check [height]   回放开场序列（默认高度 640 / 731 / 915）

sequence-check 对每条边检查：
  - 至少有一个属性在这条边上做补间
  - 逐帧推进到任意时刻的值与按总时间纯采样的值一致
  - 边结束时每个属性精确落在终点目标值上
"#
    );
}

/// 按屏幕高度回放开场序列
fn sequence_check(heights: &[f32]) -> anyhow::Result<()> {
    let heights = if heights.is_empty() {
        &DEFAULT_HEIGHTS[..]
    } else {
        heights
    };

    let mut problems = Vec::new();
    for &height in heights {
        eprintln!("==> 屏幕高度 {height}");
        match intro_player(height) {
            Ok(player) => replay(player, &mut problems),
            Err(e) => problems.push(format!("{height}: {e}")),
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    for problem in &problems {
        eprintln!("[ERROR] {problem}");
    }
    anyhow::ensure!(problems.is_empty(), "序列检查发现 {} 个错误", problems.len());
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 逐帧回放，把每帧的值与纯采样对照，并在每条边结束时核对目标值
fn replay(mut player: IntroPlayer, problems: &mut Vec<String>) {
    let schedule = player.schedule().clone();
    let definition = player.definition().clone();

    if let Err(e) = player.start() {
        problems.push(format!("启动失败: {e}"));
        return;
    }

    for edge in schedule.edges() {
        let animated = definition.animated_properties(edge.from, edge.to);
        eprintln!(
            "  #{} {:>5}ms -> {:>5}ms  {} -> {}  ({} 个补间)",
            edge.index,
            edge.start.as_millis(),
            edge.end().as_millis(),
            edge.from.name(),
            edge.to.name(),
            animated.len()
        );
        if animated.is_empty() {
            problems.push(format!(
                "{} -> {} 没有任何补间，会直接跳变",
                edge.from.name(),
                edge.to.name()
            ));
        }

        // 推进到边结束，最后一帧截断以精确落在结束时刻
        while player.elapsed() < edge.end() {
            let dt = FRAME.min(edge.end() - player.elapsed());
            player.update(dt);
            compare_with_pure(&player, problems);
        }

        for property in IntroProperty::ALL {
            let end = player.value_at(*property, edge.end());
            let target = definition.target(*property, edge.to);
            if end != target {
                problems.push(format!(
                    "{} 在 {} 结束时为 {end}，目标值 {target}",
                    property.name(),
                    edge.to.name()
                ));
            }
        }
    }

    if !player.is_settled() {
        problems.push(format!("回放到 {}ms 仍未稳定", schedule.total().as_millis()));
    }
}

fn compare_with_pure(player: &IntroPlayer, problems: &mut Vec<String>) {
    let at = player.elapsed();
    for property in IntroProperty::ALL {
        let stepped = player.current_value(*property);
        let pure = player.value_at(*property, at);
        if (stepped - pure).abs() > TOLERANCE {
            problems.push(format!(
                "{} @ {}ms: 逐帧 {stepped} ≠ 采样 {pure}",
                property.name(),
                at.as_millis()
            ));
        }
    }
}
