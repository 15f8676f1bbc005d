use anyhow::{Context, Result};
use clap::Parser;
use engine::{
    GameCommand, GameConfig, GameEvent, GameState, InputSignal, TerminalKind, calculate_ai_move,
};
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::watch;
use tokio::time::{Duration, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "snake-bot",
    about = "Play headless snake games with the autopilot and report scores"
)]
struct Args {
    /// JSON game config; CLI flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Seed for food placement (random when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play back to back
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Give up on a game after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u32,

    /// Milliseconds between ticks; 0 runs as fast as possible
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,

    /// Accept 180 degree turns
    #[arg(long)]
    allow_reversal: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
enum GameEnd {
    Wall,
    SelfBite,
    BoardFull,
    TickLimit,
    Quit,
}

#[derive(Debug, Serialize)]
struct GameSummary {
    game: usize,
    score: usize,
    ticks: u32,
    food_eaten: usize,
    end: GameEnd,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    width: u16,
    height: u16,
    games: Vec<GameSummary>,
    best_score: usize,
    mean_score: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let seed = args.seed.or(config.rng_seed).unwrap_or_else(rand::random);

    info!(
        "Playing {} game(s) on a {}x{} grid with seed {}",
        args.games, config.grid_width, config.grid_height, seed
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let mut tick_interval = build_interval(args.tick_ms);
    let mut state = GameState::new_with_seed(config.clone(), seed)?;
    let mut games = Vec::with_capacity(args.games);

    for game in 1..=args.games {
        let summary =
            play_game(&mut state, game, args.max_ticks, &mut tick_interval, &shutdown_rx).await?;
        info!(
            "Game {} ended by {:?} with score {} after {} ticks",
            summary.game, summary.end, summary.score, summary.ticks
        );
        let end = summary.end;
        games.push(summary);

        match end {
            GameEnd::Quit => {
                warn!("Stopping after game {} on shutdown signal", game);
                break;
            }
            GameEnd::TickLimit => {
                // Session is still mid-run; start over from a fresh one
                state = GameState::new_with_seed(config.clone(), seed.wrapping_add(game as u64))?;
            }
            GameEnd::Wall | GameEnd::SelfBite | GameEnd::BoardFull => {
                if let Some(command) = InputSignal::Confirm.to_command() {
                    state.exec_command(command)?;
                }
            }
        }
    }

    let summary = summarize(seed, &config, games);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for game in &summary.games {
            println!(
                "game {:>3}: score {:>4}  ticks {:>6}  food {:>4}  {:?}",
                game.game, game.score, game.ticks, game.food_eaten, game.end
            );
        }
        println!("best {}  mean {:.2}", summary.best_score, summary.mean_score);
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.grid_width = width;
    }
    if let Some(height) = args.height {
        config.grid_height = height;
    }
    if args.allow_reversal {
        config.allow_reversal = true;
    }
    if args.tick_ms > 0 {
        config.tick_duration_ms = u32::try_from(args.tick_ms).context("Tick interval too large")?;
    }
    config.validate().context("Invalid game config")?;
    Ok(config)
}

fn build_interval(tick_ms: u64) -> Option<Interval> {
    if tick_ms == 0 {
        return None;
    }
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    Some(interval)
}

async fn play_game(
    state: &mut GameState,
    game: usize,
    max_ticks: u32,
    tick_interval: &mut Option<Interval>,
    shutdown_rx: &watch::Receiver<bool>,
) -> Result<GameSummary> {
    let start_tick = state.current_tick();
    let mut food_eaten = 0;

    loop {
        let ticks = state.current_tick() - start_tick;

        // Ctrl-C plays the part of the Quit signal
        let end = if *shutdown_rx.borrow() {
            Some(GameEnd::Quit)
        } else if ticks >= max_ticks {
            Some(GameEnd::TickLimit)
        } else {
            None
        };
        if let Some(end) = end {
            return Ok(GameSummary { game, score: state.score(), ticks, food_eaten, end });
        }

        if let Some(interval) = tick_interval.as_mut() {
            interval.tick().await;
        }

        if let Some(direction) = calculate_ai_move(state) {
            state.exec_command(GameCommand::Turn { direction })?;
        }

        for event in state.exec_command(GameCommand::Tick)? {
            match event {
                GameEvent::FoodEaten { position } => {
                    food_eaten += 1;
                    debug!("Game {} ate food at ({}, {})", game, position.x, position.y);
                }
                GameEvent::TerminalCollision { kind, score } => {
                    let end = match kind {
                        TerminalKind::Wall => GameEnd::Wall,
                        TerminalKind::SelfBite => GameEnd::SelfBite,
                    };
                    return Ok(GameSummary { game, score, ticks: ticks + 1, food_eaten, end });
                }
                GameEvent::PlacementExhausted { score } => {
                    return Ok(GameSummary {
                        game,
                        score,
                        ticks: ticks + 1,
                        food_eaten,
                        end: GameEnd::BoardFull,
                    });
                }
                _ => {}
            }
        }
    }
}

fn summarize(seed: u64, config: &GameConfig, games: Vec<GameSummary>) -> RunSummary {
    let best_score = games.iter().map(|g| g.score).max().unwrap_or(0);
    let mean_score = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| g.score as f64).sum::<f64>() / games.len() as f64
    };
    RunSummary {
        seed,
        width: config.grid_width,
        height: config.grid_height,
        games,
        best_score,
        mean_score,
    }
}
