use iai::black_box;
use chessrules::{fen::Fen, perft, uci::Uci, Board, Color};

fn bench_shallow_perft() {
    let board = Board::new();
    assert_eq!(black_box(perft(black_box(&board), 2)), 400);
}

fn bench_deep_perft() {
    let board = Board::new();
    assert_eq!(perft(black_box(&board), 3), 8_902);
}

fn bench_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = fen
        .parse::<Fen>()
        .expect("valid fen")
        .into_board()
        .expect("legal position");
    assert_eq!(perft(black_box(&board), 2), 2_039);
}

fn bench_generate_moves() {
    let fen = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1";
    let board = fen
        .parse::<Fen>()
        .expect("valid fen")
        .into_board()
        .expect("legal position");

    assert_eq!(black_box(&board).legal_moves(Color::Black).len(), 39);
}

fn bench_checkmate_scan() {
    let fen = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4";
    let board = fen
        .parse::<Fen>()
        .expect("valid fen")
        .into_board()
        .expect("legal position");

    assert!(black_box(&board).is_checkmate(Color::Black));
}

fn bench_play_ucis() -> Board {
    let ucis = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "f3g5", "d7d5", "e4d5", "c6a5", "c4b5",
        "c7c6", "d5c6", "b7c6", "b5a4", "c8a6", "d2d3", "f8c5", "e1g1", "e8g8",
    ];

    let mut board = black_box(Board::new());
    for uci in black_box(ucis).iter() {
        let side = board.turn();
        uci.parse::<Uci>()
            .expect("valid uci")
            .play(&mut board, side)
            .expect("legal move");
    }
    board
}

iai::main!(
    bench_shallow_perft,
    bench_deep_perft,
    bench_kiwipete,
    bench_generate_moves,
    bench_checkmate_scan,
    bench_play_ucis,
);
