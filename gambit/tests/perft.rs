/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod common;

use colored::Colorize;
use common::diagram;
use gambit::*;

/// Runs perft to each depth in `expected` (depth 1 first) and checks the node counts.
fn perft_suite(name: &str, board: &Board, expected: &[u64]) {
    let mut failures = Vec::new();

    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i + 1;
        let found = perft(board, depth);

        if found == nodes {
            println!("{} {name} depth {depth}: {found}", "PASS".green());
        } else {
            println!(
                "{} {name} depth {depth}: expected {nodes}, found {found}",
                "FAIL".red()
            );
            failures.push(depth);
        }
    }

    assert!(failures.is_empty(), "{name} failed at depths {failures:?}\n{board:?}");
}

#[test]
fn perft_startpos() {
    perft_suite("startpos", &Board::standard(), &[20, 400, 8_902]);
}

#[test]
fn perft_kiwipete() {
    let board = diagram(
        "
        r - - - k - - r
        p - p p q p b -
        b n - - p n p -
        - - - P N - - -
        - p - - P - - -
        - - N - - Q - p
        P P P B B P P P
        R - - - K - - R
        ",
        Alliance::White,
    );
    perft_suite("kiwipete", &board, &[48, 2_039, 97_862]);
}

#[test]
fn perft_endgame_with_pins() {
    let board = diagram(
        "
        - - - - - - - -
        - - p - - - - -
        - - - p - - - -
        K P - - - - - r
        - R - - - p - k
        - - - - - - - -
        - - - - P - P -
        - - - - - - - -
        ",
        Alliance::White,
    );
    perft_suite("endgame", &board, &[14, 191, 2_812]);
}

#[test]
fn perft_promotions() {
    let board = diagram(
        "
        r - - - k - - r
        P p p p - p p p
        - b - - - n b N
        n P - - - - - -
        B B P - P - - -
        q - - - - N - -
        P p - P - - P P
        R - - Q - R K -
        ",
        Alliance::White,
    );
    perft_suite("promotions", &board, &[6, 264, 9_467]);
}

#[test]
fn perft_middlegame() {
    let board = diagram(
        "
        r n b q - k - r
        p p - P b p p p
        - - p - - - - -
        - - - - - - - -
        - - B - - - - -
        - - - - - - - -
        P P P - N n P P
        R N B Q K - - R
        ",
        Alliance::White,
    );
    perft_suite("middlegame", &board, &[44, 1_486]);
}
