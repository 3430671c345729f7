//! Rooftop Escape headless runner
//!
//! Plays the game without a display. The idle AI (or nobody, with `--manual`)
//! drives the session; menu transitions and frame snapshots go to the log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rooftop_escape::settings::Settings;
use rooftop_escape::view::{FrameSnapshot, MenuView, Presenter, game_over_message};
use rooftop_escape::{Session, SessionPhase};

#[derive(Parser, Debug)]
#[command(name = "rooftop-escape", version, about = "Headless rooftop runner simulation")]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run seed (overrides the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Frame limit (overrides the settings file)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Disable the autopilot; nobody jumps
    #[arg(long)]
    manual: bool,

    /// Print the final simulation state as JSON
    #[arg(long)]
    dump: bool,
}

/// Menu layer that narrates screen changes to the log
struct LogView;

impl MenuView for LogView {
    fn show_start(&mut self) {
        log::info!("[screen] title");
    }

    fn show_instructions(&mut self) {
        log::info!("[screen] instructions: Space / Up / W or click to jump");
    }

    fn show_level_complete(&mut self, score: u64, story: &str) {
        log::info!("[screen] level complete, score {}", score);
        for line in story.lines() {
            log::info!("    {}", line);
        }
    }

    fn show_game_over(&mut self, score: u64, victory: bool) {
        let (title, subtitle) = game_over_message(victory);
        log::info!("[screen] {} {} Final score {}", title, subtitle, score);
    }

    fn update_hud(&mut self, score: u64, level: u32, lives: u8) {
        log::debug!("[hud] score {} level {} lives {}", score, level, lives);
    }

    fn hide_all(&mut self) {
        log::debug!("[screen] playing");
    }
}

/// Presenter that traces a snapshot every `interval` frames
struct LogPresenter {
    interval: u64,
    frames: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        if self.interval == 0 || self.frames % self.interval != 0 {
            return;
        }
        log::trace!(
            "frame {}: player ({:.1}, {:.1}) camera {:.1}, {} platforms, {} pickups left, pursuit {}",
            self.frames,
            frame.player.pos.x,
            frame.player.pos.y,
            frame.camera_offset,
            frame.platforms.len(),
            frame.visible_collectibles().count(),
            frame
                .active_pursuit()
                .map_or("asleep".to_string(), |p| format!("at {:.1}", p.pos.x)),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(frames) = args.frames {
        settings.max_frames = frames;
    }
    if args.manual {
        settings.autopilot = false;
    }
    settings.validate().context("invalid settings")?;

    let seed = settings.effective_seed();
    log::info!(
        "Rooftop Escape: seed {}, viewport {}x{}, autopilot {}",
        seed,
        settings.viewport.width,
        settings.viewport.height,
        settings.autopilot
    );

    let mut session = Session::new(settings.viewport, seed, LogView);
    session.set_autopilot(settings.autopilot);
    session.show_instructions();
    session.start_game();

    let mut presenter = LogPresenter {
        interval: settings.log_interval,
        frames: 0,
    };
    let mut frames = 0u64;
    while frames < settings.max_frames {
        match session.phase() {
            SessionPhase::Running => {
                session.tick();
                session.render(&mut presenter);
                frames += 1;
            }
            SessionPhase::LevelComplete => session.next_level(),
            _ => break,
        }
    }

    let state = session.state();
    let outcome = match session.phase() {
        SessionPhase::GameOver { victory: true } => "victory",
        SessionPhase::GameOver { victory: false } => "defeat",
        _ => "frame limit",
    };
    println!(
        "{} after {} frames: level {}, score {}, lives {}",
        outcome, frames, state.level, state.score, state.lives
    );

    if args.dump {
        let json = serde_json::to_string_pretty(state).context("failed to serialize state")?;
        println!("{}", json);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Session` directly
}
