use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_connect4::game_state::board::Board;
use plum_connect4::move_generation::perft::{perft, perft_multi_threaded};
use plum_connect4::utils::move_sequence::board_from_move_sequence;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    moves: &'static str,
    expected_nodes: &'static [usize],
}

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "empty",
        moves: "",
        expected_nodes: &[7, 49, 343, 2401, 16_807],
    },
    BenchCase {
        name: "left_stack",
        moves: "112233",
        expected_nodes: &[7, 42],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "empty",
        moves: "",
        expected_nodes: &[7, 49, 343, 2401, 16_807, 117_649, 823_543],
    },
    BenchCase {
        name: "left_stack",
        moves: "112233",
        expected_nodes: &[7, 42],
    },
];

fn selected_cases() -> &'static [BenchCase] {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_perft(c: &mut Criterion) {
    let suite_name = match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    };

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let board = board_from_move_sequence(case.moves).expect("benchmark moves should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&board, depth);
            assert_eq!(
                warmup.nodes, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&board), black_box(depth));
                        assert_eq!(count.nodes, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_perft_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_threads");
    group.sample_size(10);

    let board = Board::new();
    for depth in [5u8, 6] {
        group.bench_with_input(BenchmarkId::new("empty", depth), &depth, |b, &depth| {
            b.iter(|| black_box(perft_multi_threaded(black_box(&board), depth).nodes));
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_perft_threads);
criterion_main!(perft_benches);
