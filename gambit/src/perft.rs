/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use super::Board;

/// Counts the leaf nodes of the legal move tree rooted at `board`, `depth` plies deep.
///
/// # Example
/// ```
/// # use gambit::*;
/// let board = Board::standard();
/// assert_eq!(perft(&board, 1), 20);
/// assert_eq!(perft(&board, 2), 400);
/// ```
pub fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();

    // Bulk counting: the last ply needs no boards
    if depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        nodes + perft(&mv.execute(board), depth - 1)
    })
}

/// Like [`perft`], but prints the node count below each root move as `<uci>: <nodes>`.
///
/// Useful for finding the move where two move generators disagree.
pub fn splitperft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut total = 0;
    for mv in board.legal_moves() {
        let nodes = perft(&mv.execute(board), depth - 1);
        println!("{}: {nodes}", mv.to_uci());
        total += nodes;
    }
    total
}

/// Runs [`perft`] (or [`splitperft`] if `SPLIT`) and prints the total.
///
/// If `PRETTY`, the board and timing metrics are printed as well.
pub fn print_perft<const SPLIT: bool, const PRETTY: bool>(board: &Board, depth: usize) -> u64 {
    if PRETTY {
        println!("Computing PERFT({depth}) of the following position:\n{board:?}\n");
    }

    let now = Instant::now();
    let nodes = if SPLIT {
        splitperft(board, depth)
    } else {
        perft(board, depth)
    };
    let elapsed = now.elapsed();

    if PRETTY {
        let nps = nodes as f32 / elapsed.as_secs_f32();
        let m_nps = nps / 1_000_000.0;

        println!("\n  Total Nodes:\t{nodes}");
        println!(" Elapsed Time:\t{elapsed:.1?}");
        println!("  Nodes / Sec:\t{nps:.0}");
        println!("M Nodes / Sec:\t{m_nps:.1}");
    } else {
        println!("\n{nodes}");
    }

    nodes
}
