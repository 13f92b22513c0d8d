use std::error::Error;
use std::io::{self, BufRead, Write};

use chrono::Local;
use clap::Parser;
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_logger::SimpleLogger;

use plum_checkers::board::turn::Turn;
use plum_checkers::errors::CheckersError;
use plum_checkers::game::checkers_game::CheckersGame;
use plum_checkers::utils::move_notation::parse_move_steps;
use plum_checkers::utils::render_board::render_board;

/// Play checkers against the engine in the terminal.
///
/// The engine plays `o` (moving up the board), you play `x`. Enter moves as
/// the visited cells, e.g. `2,5-3,4` or `1,5-3,3-5,1` for a double jump.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies.
    #[arg(long, default_value_t = 6)]
    depth: u32,
    #[arg(long)]
    no_alpha_beta: bool,
    #[arg(long)]
    no_cache: bool,
    /// Move first instead of drawing the first mover at random.
    #[arg(long)]
    human_first: bool,
    /// Seed for the first-mover draw.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

const ENGINE: Turn = Turn::Max;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level).init()?;

    println!(
        "plum_checkers {} ({})",
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let mut builder = CheckersGame::builder()
        .depth_limit(args.depth)
        .alpha_beta(!args.no_alpha_beta)
        .caching(!args.no_cache);
    if args.human_first {
        builder = builder.starting_turn(ENGINE.next());
    } else if let Some(seed) = args.seed {
        builder = builder.starting_turn_from(&mut StdRng::seed_from_u64(seed));
    }
    let mut game = builder.build()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}\n", render_board(game.current_state()));

        if let Some(winner) = game.winner()? {
            announce(winner);
            return Ok(());
        }

        let played = if game.current_state().turn() == ENGINE {
            let outcome = game.compute_next_move();
            if let Ok(outcome) = &outcome {
                let report = game.last_search();
                info!(
                    "engine searched {} nodes in {} ms",
                    report.tree_size, report.elapsed_ms
                );
                if let Some(to) = outcome.state.last_move() {
                    println!("engine moved to {to}");
                }
            }
            outcome
        } else {
            print!("your move> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            if matches!(line.trim(), "q" | "quit" | "exit") {
                return Ok(());
            }
            parse_move_steps(&line).and_then(|steps| game.submit_moves(&steps))
        };

        match played {
            Ok(_) => {}
            Err(CheckersError::GameFinished { winner }) => {
                announce(winner);
                return Ok(());
            }
            Err(err) if game.current_state().turn() == ENGINE => return Err(err.into()),
            Err(err) => {
                error!("{err}");
                println!("{err}, try again");
            }
        }
    }
}

fn announce(winner: Turn) {
    if winner == ENGINE {
        println!("the engine wins");
    } else {
        println!("you win");
    }
}
