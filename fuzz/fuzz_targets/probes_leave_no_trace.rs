#![no_main]

use arbitrary::Arbitrary;
use chessrules::{Board, Role, Square};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    moves: Vec<(Square, Square)>,
}

fuzz_target!(|data: Data| {
    let mut board = Board::new();
    for (from, to) in data.moves {
        let side = board.turn();
        let before = board.clone();
        let legal = board.attempt_move(from, to, side);
        assert_eq!(board, before);
        assert_eq!(board.legal_moves(side).contains(&(from, to)), legal);
        if legal {
            board.commit_move(from, to);
            assert!(!board.is_check(side));
            if board.needs_promotion(to) {
                board.promote(to, Role::Queen).expect("promotable");
            }
        }
    }
});
