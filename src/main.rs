use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use terminal_pacman::engine::{DEFAULT_DEATH_PAUSE_MS, DEFAULT_TICK_MS};
use terminal_pacman::input::{spawn_reader, TerminalKeys};
use terminal_pacman::render::TerminalScreen;
use terminal_pacman::{run, Config, EngineSettings, GameOver, GameState, Level};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the maze layout.
    #[arg(long, default_value = "maze01.txt")]
    maze_file: PathBuf,
    /// Path to the glyph/timing configuration.
    #[arg(long, default_value = "config.json")]
    config_file: PathBuf,
    /// Milliseconds per game tick.
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Seed for ghost movement.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_file.as_deref()) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = path {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn start(cli: Cli) -> Result<()> {
    let level = Level::load(&cli.maze_file).context("failed to load maze")?;
    let config = Config::load(&cli.config_file).context("failed to load configuration")?;
    let settings = EngineSettings {
        tick: Duration::from_millis(cli.tick_ms.max(1)),
        death_pause: Duration::from_millis(DEFAULT_DEATH_PAUSE_MS),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    let mut screen = TerminalScreen::new(io::stdout(), config.clone(), &level.grid);
    let mut state = GameState::new(level, config.pill_duration());

    screen.enter().context("failed to set up terminal")?;
    let result = runtime.block_on(play(&mut state, &mut screen, &mut rng, settings));
    // Restore the terminal before reporting anything, even on failure.
    let restored = screen.leave();

    let over = result.context("terminal error during play")?;
    restored.context("failed to restore terminal")?;
    println!("{} Final score: {}", summary(over), state.score());
    Ok(())
}

async fn play(
    state: &mut GameState,
    screen: &mut TerminalScreen<Stdout>,
    rng: &mut StdRng,
    settings: EngineSettings,
) -> io::Result<GameOver> {
    let mut input = spawn_reader(TerminalKeys);
    run(state, &mut input, screen, rng, settings).await
}

fn summary(over: GameOver) -> &'static str {
    match over {
        GameOver::Cleared => "Maze cleared!",
        GameOver::Caught => "Caught by a ghost.",
        GameOver::Quit => "Quit.",
    }
}
