use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use common::games::SessionRng;
use common::games::tictactoe::{
    Board, BotInput, Difficulty, Mark, calculate_move, find_best_move, is_terminal,
};

fn bench_hard_self_play() {
    let mut board = Board::new();
    let mut current_mark = Mark::X;
    let mut session_rng = SessionRng::new(0);

    while !is_terminal(&board) {
        let input = BotInput::new(board, current_mark);
        let Some(index) = calculate_move(Difficulty::Hard, &input, &mut session_rng) else {
            break;
        };
        board = board
            .apply_move(index, current_mark)
            .expect("bot picked an occupied cell");
        current_mark = current_mark.opponent();
    }
}

fn bench_single_move_empty_board() {
    black_box(find_best_move(black_box(&Board::new()), Mark::X));
}

fn bench_single_move_mid_game() {
    let board: Board = "X..|.O.|..X".parse().expect("valid board");
    black_box(find_best_move(black_box(&board), Mark::O));
}

fn bench_medium_move(session_rng: &mut SessionRng) {
    let board: Board = "X..|...|...".parse().expect("valid board");
    let input = BotInput::new(board, Mark::O);
    black_box(calculate_move(Difficulty::Medium, &input, session_rng));
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group.sample_size(10);

    group.bench_function("hard_self_play", |b| b.iter(bench_hard_self_play));

    group.bench_function("single_move_empty", |b| {
        b.iter(bench_single_move_empty_board)
    });

    group.bench_function("single_move_mid_game", |b| {
        b.iter(bench_single_move_mid_game)
    });

    let mut session_rng = SessionRng::new(7);
    group.bench_function("medium_move", |b| {
        b.iter(|| bench_medium_move(&mut session_rng))
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
