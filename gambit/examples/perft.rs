/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gambit::{print_perft, Board};

/// Compute total number of states reachable from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: usize,

    /// List of UCI moves to apply to the starting position before running the perft.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, perform a splitperft, displaying the number of nodes reachable after each move available from the root.
    #[arg(short, long, default_value = "false")]
    split: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    // Apply moves, if any were provided
    let mut board = Board::standard();
    for mv_str in &args.moves {
        let mv = board.find_move_uci(mv_str)?;
        board = mv.execute(&board);
    }

    if args.split {
        print_perft::<true, true>(&board, args.depth);
    } else {
        print_perft::<false, true>(&board, args.depth);
    }

    Ok(())
}
