use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use chessrules::{fen::Fen, perft, Board};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut board = Board::new();

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{}", line);

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                board = slices
                    .next()
                    .expect("missing epd")
                    .parse::<Fen>()
                    .expect("invalid fen")
                    .into_board()
                    .expect("illegal fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&board, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_chess() {
    test_perft_file("tests/chess.perft", 10_000);
}

#[test]
#[ignore = "slow without optimizations"]
fn test_chess_deep() {
    test_perft_file("tests/chess.perft", 200_000);
}
