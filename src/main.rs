// What you SEE:
// • "Air Canvas": the live camera, mirrored, with your ink blended on top
//   and a coloured ring at your fingertip (green = drawing).
// • "Canvas": the raw ink on black.
// • Point with the index finger to draw, make a fist to stop, show an open
//   palm to clear. Q or ESC quits.
//
// Without a hand-tracking model the pointer recognizer stands in for the hand:
// hold LMB to draw, hold Space for an open palm, F for a fist.

use air_canvas::camera::CameraCapture;
use air_canvas::cli::{Cli, Commands};
use air_canvas::config::Config;
use air_canvas::draw::Drawer;
use air_canvas::gesture::PointerRecognizer;
use air_canvas::pipeline::Pipeline;
use air_canvas::replay::{self, ReplayScript};
use anyhow::Context;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // --verbose enables debug-level output; RUST_LOG wins if set.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_default().context("loading default config")?,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_live(&config),
        Commands::Replay { script } => run_replay(&script, &config),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn run_replay(script: &Path, config: &Config) -> anyhow::Result<()> {
    let script = ReplayScript::load(script).with_context(|| format!("reading {}", script.display()))?;
    let summary = replay::run(&script, config)?;
    info!(
        ticks = summary.ticks,
        strokes = summary.strokes,
        clears = summary.clears,
        ink_pixels = summary.ink_pixels,
        "replay finished"
    );
    Ok(())
}

fn run_live(config: &Config) -> anyhow::Result<()> {
    /* --- Camera + windows setup ---
       Visual: two windows open, sized to the camera feed. */
    let mut cam = CameraCapture::open(&config.camera).context("opening camera")?;
    let (w, h) = cam.resolution();
    info!(width = w, height = h, "camera opened");

    let mut view = Drawer::new("Air Canvas", w as usize, h as usize)?;
    let mut canvas_view = Drawer::new("Canvas", w as usize, h as usize)?;

    let mut recognizer = PointerRecognizer::new();
    let mut pipeline = Pipeline::new(config);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while view.is_open() && canvas_view.is_open() && !view.quit_pressed() && !canvas_view.quit_pressed() {
        /* 1) Grab a fresh live frame, find the hand, then smooth, debounce,
              ink, clear, compose. End of stream ends the session quietly. */
        recognizer.feed(view.pointer_input());
        let Some(out) = pipeline.step(&mut cam, &mut recognizer)? else { break };

        /* 2) Present: composited view + raw canvas. */
        view.present(&out.composited)?;
        if let Some(surface) = pipeline.surface() {
            canvas_view.present(surface.snapshot())?;
        }

        /* 3) FPS counter (debug log once per second) */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(fps = %format!("{:.1}", frames_this_second as f32 / secs), "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!(ticks = pipeline.ticks(), "session ended");
    Ok(())
}
