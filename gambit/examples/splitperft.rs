/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::Context;
use gambit::{print_perft, Board};

/// Minimal splitperft driver, in the format expected by perft comparison scripts:
/// `<depth> [moves]`, where `moves` is a single space-separated string of UCI moves.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    // Print usage if insufficient arguments provided
    if args.len() < 2 {
        println!("Usage: {} <depth> [moves]", args[0]);
        std::process::exit(1);
    }

    let depth = args[1].parse().context(format!(
        "Failed to parse {:?} as depth value. Expected integer.",
        args[1]
    ))?;

    let mut board = Board::standard();
    if let Some(moves) = args.get(2) {
        for mv_str in moves.split_ascii_whitespace() {
            let mv = board.find_move_uci(mv_str)?;
            board = mv.execute(&board);
        }
    }

    print_perft::<true, false>(&board, depth);

    Ok(())
}
