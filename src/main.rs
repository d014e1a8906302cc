use clap::{Parser, ValueEnum};
use log::warn;

use ttv::cli::{Args, Mode};
use ttv::config::Config;
use ttv::player::{self, PlayOptions, PlaybackSummary};
use ttv::source::{self, CameraSource, FrameSource};
use ttv::terminal::{self, TerminalGuard};

fn main() {
    // Logging goes to stderr and stays off unless RUST_LOG asks for it,
    // so it cannot scribble over the picture.
    env_logger::init();

    let args = Args::parse();

    match run(args) {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<PlaybackSummary, Box<dyn std::error::Error>> {
    let config = Config::load(args.config.as_deref())?;
    let opts = build_options(&args, &config)?;

    let mut source: Box<dyn FrameSource> = if let Some(index) = args.camera {
        let (width, height) = args.camera_size;
        Box::new(CameraSource::open(index, width, height)?)
    } else {
        // clap guarantees input is present when --camera is absent
        let path = args
            .input
            .as_deref()
            .ok_or("an input path or --camera is required")?;
        source::open(path)?
    };

    if let Err(e) = terminal::setup_ctrlc_handler() {
        warn!("could not install Ctrl+C handler: {e}");
    }

    // The guard's drop restores the screen before the summary prints.
    let summary = {
        let _guard = TerminalGuard::enter()?;
        player::play(source.as_mut(), &opts)?
    };
    Ok(summary)
}

/// Merge CLI flags over the config file over the built-in defaults.
fn build_options(args: &Args, config: &Config) -> Result<PlayOptions, String> {
    let mode = match (args.mode, config.playback.mode.as_deref()) {
        (Some(m), _) => m,
        (None, Some(name)) => Mode::from_str(name, true)
            .map_err(|_| format!("unknown mode '{name}' in config file"))?,
        (None, None) => Mode::default(),
    };

    let fps = args.fps.or(config.playback.fps).unwrap_or(30);
    if !(1..=240).contains(&fps) {
        return Err(format!("fps must be between 1 and 240, got {fps}"));
    }

    let repeat = args.repeat.or(config.render.repeat).unwrap_or(1);
    if !(1..=4).contains(&repeat) {
        return Err(format!("repeat must be between 1 and 4, got {repeat}"));
    }

    let threshold = args.threshold.or(config.render.threshold).unwrap_or(128);
    let skip = if args.no_skip {
        false
    } else {
        config.playback.skip.unwrap_or(true)
    };
    let stats = args.stats || config.render.stats.unwrap_or(false);

    Ok(PlayOptions {
        mode: mode.into(),
        fps,
        threshold,
        skip,
        repeat,
        stats,
    })
}

fn print_summary(summary: &PlaybackSummary) {
    let suffix = if summary.interrupted {
        " (interrupted)"
    } else {
        ""
    };
    println!(
        "{} frames rendered, {} skipped{}",
        summary.frames_rendered, summary.frames_skipped, suffix
    );
}
