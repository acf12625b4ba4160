//! # intro-preview
//!
//! 欢迎页开场动画预览工具。
//!
//! ```bash
//! cargo run -p intro-host -- run --fps 30 --every 3
//! cargo run -p intro-host -- sample --at 0 --at 1300 --at 5900
//! cargo run -p intro-host -- timeline --format json
//! cargo run -p intro-host -- --height 800 realtime
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use intro_host::{OutputFormat, Preview, PreviewConfig, run_realtime};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "intro-preview")]
#[command(about = "欢迎页开场动画预览 - 在终端中逐帧输出属性值与布局")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 配置文件路径（默认：intro.json）
    #[arg(short, long, default_value = "intro.json", global = true)]
    config: PathBuf,

    /// 覆盖屏幕宽度
    #[arg(long, global = true)]
    width: Option<f32>,

    /// 覆盖屏幕高度
    #[arg(long, global = true)]
    height: Option<f32>,

    /// 覆盖输出格式
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// 日志详细程度（-v: debug, -vv: trace）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 逐帧播放到稳定（默认）
    Run {
        /// 覆盖帧率
        #[arg(long)]
        fps: Option<u32>,

        /// 每隔多少帧输出一次
        #[arg(long)]
        every: Option<u32>,
    },

    /// 按启动后的时间采样
    Sample {
        /// 采样时刻（毫秒，可重复）
        #[arg(long = "at", required = true)]
        at: Vec<u64>,
    },

    /// 输出每条边的时间表
    Timeline,

    /// 按真实时间播放
    Realtime {
        /// 覆盖帧率
        #[arg(long)]
        fps: Option<u32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = real_main(cli) {
        error!(error = %e, "预览失败");
        eprintln!("intro-preview error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    let mut config = PreviewConfig::load(&cli.config);
    if let Some(width) = cli.width {
        config.screen.width = width;
    }
    if let Some(height) = cli.height {
        config.screen.height = height;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let command = cli.command.unwrap_or(Commands::Run {
        fps: None,
        every: None,
    });
    match &command {
        Commands::Run { fps, every } => {
            if let Some(fps) = fps {
                config.fps = *fps;
            }
            if let Some(every) = every {
                config.print_every = *every;
            }
        }
        Commands::Realtime { fps: Some(fps) } => config.fps = *fps,
        _ => {}
    }
    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Run { .. } => {
            let mut preview = Preview::new(config)?;
            let summary = preview.run(&mut out)?;
            info!(frames = summary.frames, printed = summary.printed, "播放完成");
        }
        Commands::Sample { at } => {
            let preview = Preview::new(config)?;
            for ms in at {
                let sample = preview.sample(Duration::from_millis(ms));
                preview.write_frame(&mut out, &sample)?;
            }
        }
        Commands::Timeline => {
            Preview::new(config)?.write_timeline(&mut out)?;
        }
        Commands::Realtime { .. } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let summary = runtime.block_on(run_realtime(&config, &mut out))?;
            info!(frames = summary.frames, elapsed = ?summary.elapsed, "实时播放完成");
        }
    }

    out.flush()?;
    Ok(())
}
