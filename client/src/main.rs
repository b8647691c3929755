mod config;
mod input;
mod offline;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::{Difficulty, GameMode};
use common::log;
use common::logger::{self, LogSink};
use common::storage::{GameConfig, GameStore};

use config::{Config, MAX_THINK_DELAY_MS, get_config_manager};
use offline::{RunnerSettings, TicTacToeRunner};

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a friend or the computer")]
struct Args {
    /// cpu or pvp. Asked interactively when omitted and no game is saved.
    #[arg(long)]
    mode: Option<GameMode>,
    /// easy, medium or hard.
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    player1: Option<String>,
    #[arg(long)]
    player2: Option<String>,
    /// Seed for the computer's random choices.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    think_delay_ms: Option<u64>,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Ignore any saved game and start over.
    #[arg(long)]
    new_game: bool,
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
}

fn init_logging(args: &Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    let log_file = args
        .log_file
        .clone()
        .or_else(|| config.log_file.as_ref().map(PathBuf::from));
    let sink = match log_file {
        Some(path) => LogSink::file(&path)?,
        None => LogSink::Disabled,
    };
    logger::init_logger(prefix, sink);
    Ok(())
}

fn prompt(question: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", question);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn new_game_config(
    args: &Args,
    difficulty: Difficulty,
) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mode = match args.mode {
        Some(mode) => mode,
        None => loop {
            match prompt("Mode (cpu/pvp): ")?.parse::<GameMode>() {
                Ok(mode) => break mode,
                Err(e) => println!("{}", e),
            }
        },
    };

    let player1 = match &args.player1 {
        Some(name) => name.clone(),
        None if mode == GameMode::Cpu => prompt("Your name: ")?,
        None => prompt("Player 1 name: ")?,
    };

    Ok(match mode {
        GameMode::Cpu => GameConfig::vs_cpu(&player1, difficulty),
        GameMode::Pvp => {
            let player2 = match &args.player2 {
                Some(name) => name.clone(),
                None => prompt("Player 2 name: ")?,
            };
            GameConfig::vs_player(&player1, &player2)
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let client_config = get_config_manager().get_config()?;
    init_logging(&args, &client_config)?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| client_config.resolved_data_dir());
    let store = GameStore::in_dir(&data_dir);
    log!("Using data directory {}", data_dir.display());

    if args.new_game {
        store.clear_all()?;
    }

    let saved_config = if store.has_game_in_progress() {
        store.load_config()?
    } else {
        None
    };

    let (game_config, resume) = match saved_config {
        Some(mut saved) => {
            if let Some(difficulty) = args.difficulty {
                saved.difficulty = difficulty;
            }
            println!("Continuing game: {} vs {}", saved.player1, saved.player2);
            (saved, store.load_state()?)
        }
        None => {
            let difficulty = args.difficulty.unwrap_or(client_config.tictactoe.difficulty);
            (new_game_config(&args, difficulty)?, None)
        }
    };

    let think_delay_ms = args
        .think_delay_ms
        .unwrap_or(client_config.tictactoe.think_delay_ms)
        .min(MAX_THINK_DELAY_MS);
    let settings = RunnerSettings {
        difficulty: game_config.difficulty,
        think_delay: Duration::from_millis(think_delay_ms),
    };

    println!("{}", input::HELP_TEXT);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    TicTacToeRunner::new(
        &store,
        game_config,
        settings,
        SessionRng::from_seed_or_random(args.seed),
        stdin.lock(),
        stdout.lock(),
    )
    .run(resume)?;

    log!("Exiting");
    Ok(())
}
