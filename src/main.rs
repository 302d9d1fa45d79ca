//! Kalah-Rust: play Kalah against a time-bounded search engine.
//!
//! ## Usage
//!
//! - `kalah-rust` - Play interactively against the engine
//! - `kalah-rust play` - Same as above
//! - `kalah-rust demo` - Watch the engine play both sides
//!
//! The engine's think time, the hashing seed, and the starting layout are
//! all configurable; see `kalah-rust --help`.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use kalah_rust::constants::{DEFAULT_STARTER, DEFAULT_THINK_MS, HOLE_COUNT};
use kalah_rust::game::{Game, Player, store_index};
use kalah_rust::search::Searcher;

/// Kalah-Rust: a Kalah engine with iterative-deepening search
#[derive(Parser)]
#[command(name = "kalah-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: GameOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively: you are Player One, the engine is Player Two
    Play,
    /// Let the engine play both sides to completion
    Demo,
}

#[derive(Args)]
struct GameOptions {
    /// Engine think time per move, in milliseconds
    #[arg(long, default_value_t = DEFAULT_THINK_MS)]
    think_ms: u64,

    /// Seed for the hashing randomness; drawn from entropy if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stones in every hole at the start
    #[arg(long, default_value_t = DEFAULT_STARTER)]
    stones: u32,

    /// Explicit starting layout for both sides, e.g. "5,2,2,5,1,4"
    #[arg(long, value_delimiter = ',')]
    layout: Option<Vec<u32>>,
}

impl GameOptions {
    fn new_game(&self) -> Result<Game> {
        match &self.layout {
            Some(layout) => {
                Game::with_stones(layout, layout).context("invalid --layout")
            }
            None => Ok(Game::with_starter(self.stones)),
        }
    }

    fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let game = cli.options.new_game()?;
    if game.game_over() {
        bail!("the starting layout has no legal moves");
    }

    let seed = cli.options.seed.unwrap_or_else(|| fastrand::u64(..));
    let searcher = Searcher::new(&game, seed);

    match cli.command {
        Some(Commands::Demo) => run_demo(game, searcher, cli.options.think_time()),
        Some(Commands::Play) | None => run_play(game, searcher, cli.options.think_time()),
    }
}

/// Interactive loop: render, recommend, read one hole number per human
/// turn, and let the engine answer.
fn run_play(mut game: Game, mut searcher: Searcher, think_time: Duration) -> Result<()> {
    while !game.game_over() {
        print_board(&game, &searcher);

        let mv = match game.turn {
            Player::One => {
                if let Some(result) = searcher.best_move(&game, think_time) {
                    println!("hint: {} (eval {}, depth {})", result.mv, result.score, result.depth);
                }
                read_move(&game)?
            }
            Player::Two => {
                let mv = engine_move(&mut searcher, &game, think_time);
                println!("p2 plays {mv}");
                mv
            }
        };
        game.make_move(mv);
    }

    print_board(&game, &searcher);
    print_outcome(&game);
    Ok(())
}

/// Engine-vs-engine exhibition game.
fn run_demo(mut game: Game, mut searcher: Searcher, think_time: Duration) -> Result<()> {
    while !game.game_over() {
        print_board(&game, &searcher);
        let mv = engine_move(&mut searcher, &game, think_time);
        println!("{} plays {mv}", game.turn);
        game.make_move(mv);
    }

    print_board(&game, &searcher);
    print_outcome(&game);
    Ok(())
}

/// Ask the engine for a move, falling back to the first legal hole when
/// the budget expires before depth 1 completes.
fn engine_move(searcher: &mut Searcher, game: &Game, think_time: Duration) -> usize {
    match searcher.best_move(game, think_time) {
        Some(result) => result.mv,
        None => (0..HOLE_COUNT)
            .find(|&hole| game.can_move(hole))
            .expect("caller checked game_over"),
    }
}

fn print_board(game: &Game, searcher: &Searcher) {
    println!("\nboard {:X}", searcher.hash(game));
    print!("{game}");
}

fn print_outcome(game: &Game) {
    let p1 = game.board[store_index(Player::One)];
    let p2 = game.board[store_index(Player::Two)];
    match p1.cmp(&p2) {
        std::cmp::Ordering::Greater => println!("p1 wins {p1} - {p2}"),
        std::cmp::Ordering::Less => println!("p2 wins {p2} - {p1}"),
        std::cmp::Ordering::Equal => println!("draw {p1} - {p2}"),
    }
}

/// Prompt until the human enters a legal hole number.
fn read_move(game: &Game) -> Result<usize> {
    loop {
        print!("{} move: ", game.turn);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            bail!("stdin closed mid-game");
        }

        match input.trim().parse::<usize>() {
            Ok(hole) if game.can_move(hole) => return Ok(hole),
            Ok(hole) => println!("hole {hole} cannot be played"),
            Err(_) => println!("enter a hole number 0-{}", HOLE_COUNT - 1),
        }
    }
}
