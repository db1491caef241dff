// src/main.rs
use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use minimax_chess::board::{Color, Move, Square};
use minimax_chess::config::Config;
use minimax_chess::error::CommandError;
use minimax_chess::game::{engine_move, GameState};
use minimax_chess::movegen::legal_moves;
use minimax_chess::notation::{parse_move, parse_square};
use minimax_chess::search::Engine;

const HUMAN: Color = Color::White;

#[derive(Parser, Debug)]
#[command(name = "minimax-chess", about = "Play chess in the terminal against an alpha-beta engine")]
struct Args {
    /// Plies the engine searches per move (1-6, default 3)
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for the engine's fallback move picker
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log engine statistics to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Defaults, then the config file, then flags.
fn load_config(args: &Args) -> Result<Config, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(depth) = args.depth { config.engine.depth = depth; }
    if let Some(seed) = args.seed { config.engine.seed = Some(seed); }
    config.validate()?;
    Ok(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// --- Input Parsing ---

#[derive(Debug)]
enum UserInput {
    Move(Move),
    Command(Command),
}

#[derive(Debug)]
enum Command {
    Moves(Square), History, Board, New, Help, Quit,
}

fn parse_user_input(input: &str) -> Result<UserInput, CommandError> {
    let mut parts = input.split_whitespace();
    let command_word = parts.next().unwrap_or("").to_lowercase();
    let argument = parts.next();

    match command_word.as_str() {
        "moves" => {
            let arg = argument.ok_or_else(|| CommandError::MissingArgument("moves".to_string()))?;
            let sq = parse_square(arg).ok_or_else(|| CommandError::InvalidSquare(arg.to_string()))?;
            return Ok(UserInput::Command(Command::Moves(sq)));
        }
        "history" => return Ok(UserInput::Command(Command::History)),
        "board" => return Ok(UserInput::Command(Command::Board)),
        "new" | "reset" => return Ok(UserInput::Command(Command::New)),
        "help" | "?" => return Ok(UserInput::Command(Command::Help)),
        "quit" | "exit" => return Ok(UserInput::Command(Command::Quit)),
        _ => {} // Not a command word, try it as a move
    }

    Ok(UserInput::Move(parse_move(input)?))
}

fn print_history(game: &GameState) {
    if game.history().is_empty() {
        println!("No moves yet.");
        return;
    }
    println!("Move History:");
    for (i, pair) in game.history().chunks(2).enumerate() {
        match pair {
            [white, black] => println!("{}. {}  {}", i + 1, white, black),
            [white] => println!("{}. {}", i + 1, white),
            _ => {}
        }
    }
}

fn print_legal_moves(game: &GameState, sq: Square) {
    match game.board().get(sq) {
        None => println!("There is no piece on {}.", sq),
        Some(piece) => {
            let targets = legal_moves(game.board(), sq);
            if targets.is_empty() {
                println!("The {} on {} has no legal moves.", piece.kind.name(), sq);
            } else {
                let names: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                println!("The {} on {} can move to: {}", piece.kind.name(), sq, names.join(" "));
            }
        }
    }
}

/// Lets the engine answer for the side to move, if the game is still on.
fn play_engine_turn(game: &mut GameState, engine: &mut Engine) {
    if game.is_over() || game.current_player() == HUMAN { return; }

    println!("{} is thinking (depth {})...", game.current_player(), engine.depth());
    match engine_move(game, engine) {
        Some(mv) => match game.commit_move(mv) {
            Ok(()) => {
                if let Some(record) = game.history().last() {
                    println!("{} plays {}", game.current_player().opponent(), record);
                }
            }
            Err(e) => {
                tracing::error!(%mv, error = %e, "engine move was rejected");
                println!("Engine move {} was rejected: {}", mv, e);
            }
        },
        None => println!("{} has no move to make.", game.current_player()),
    }
}

// --- Main Game Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_config(&args)?;
    tracing::debug!(?config, "configuration loaded");

    let mut engine = Engine::new(&config.engine)?;
    let mut game = GameState::new();

    println!("==============================");
    println!("|   Rust Chess vs. Minimax   |");
    println!("==============================");
    println!("You play White. The engine plays Black.");
    print_help();

    'game_loop: loop {
        println!("------------------------------------------");
        println!("{}", game);

        if game.is_over() {
            print!("\nGame over. Type 'new' to play again or 'quit': ");
        } else {
            print!("\n{}'s move (e.g. e2e4) or command: ", game.current_player());
        }
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                break 'game_loop;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'.", e);
                continue 'game_loop;
            }
        }

        let input = input_line.trim();
        if input.is_empty() { continue 'game_loop; }

        match parse_user_input(input) {
            Ok(UserInput::Move(mv)) => match game.try_move(mv) {
                Ok(()) => play_engine_turn(&mut game, &mut engine),
                Err(e) => println!("Error making move: {}", e),
            },
            Ok(UserInput::Command(command)) => match command {
                Command::Moves(sq) => print_legal_moves(&game, sq),
                Command::History => print_history(&game),
                Command::Board => {} // Printed at the top of the loop
                Command::New => {
                    game.reset();
                    println!("New game started.");
                }
                Command::Help => print_help(),
                Command::Quit => {
                    println!("Exiting game.");
                    break 'game_loop;
                }
            },
            Err(e) => println!("Input Error: {}", e),
        }
    }

    if !game.history().is_empty() {
        print_history(&game);
    }
    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help() {
    println!("\nAvailable Commands:");
    println!("  <move>         Enter a move as from-square then to-square (e.g., e2e4).");
    println!("  moves <sq>     List the legal destinations of the piece on <sq> (e.g., moves g1).");
    println!("  history        Show the move history.");
    println!("  board          Show the board again.");
    println!("  new            Start a new game.");
    println!("  help           Show this help message.");
    println!("  quit / exit    Exit the game.");
    println!();
}
