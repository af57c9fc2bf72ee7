use super::*;
use crate::test_games::{Fragile, Race};

fn config(workers: usize, iterations: u64) -> UctConfig {
    UctConfig {
        min_tries_per_node: 3,
        worker_count: workers,
        seed: Some(5),
        max_iterations: Some(iterations),
        ..UctConfig::default()
    }
}

#[test]
fn test_partition_into_contiguous_slices() {
    let four = [10, 11, 12, 13];
    assert_eq!(partition(&four, 3), vec![&[10, 11][..], &[12, 13][..]]);
    assert_eq!(partition(&four, 1), vec![&four[..]]);
    assert_eq!(partition(&four, 4).len(), 4);
    assert_eq!(partition(&four, 9).len(), 4);

    let seven = [1, 2, 3, 4, 5, 6, 7];
    let sizes: Vec<usize> = partition(&seven, 3).iter().map(|s| s.len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);

    assert!(partition::<u8>(&[], 3).is_empty());
}

#[test]
fn test_each_worker_reports_a_move_from_its_slice() {
    let game = Race::new(9);
    let reports = run_workers(&game, &config(2, 300), &TimeControl::start(None));
    // Three root moves over two workers: [1, 2] and [3].
    assert_eq!(reports.len(), 2);
    assert!([1, 2].contains(&reports[0].choice.mv));
    assert_eq!(reports[1].choice.mv, 3);
    assert!(reports.iter().all(|r| r.stats.iterations == 300));
}

#[test]
fn test_coordinator_keeps_best_report() {
    let game = Race::new(5);
    let summary = search(&game, &config(3, 1000), &TimeControl::start(None)).unwrap();
    assert_eq!(summary.workers, 3);
    assert_eq!(summary.choice.mv, 1);
    assert_eq!(summary.stats.iterations, 3000);
}

#[test]
fn test_failed_worker_contributes_nothing() {
    // The worker owning move 3 panics on its first pass.
    let game = Fragile(Race::new(5));
    let summary = search(&game, &config(3, 500), &TimeControl::start(None)).unwrap();
    assert_eq!(summary.workers, 2);
    assert_eq!(summary.choice.mv, 1);
}

#[test]
fn test_no_moves_no_result() {
    let mut game = Race::new(2);
    game.push(2);
    let result = search(&game, &config(3, 10), &TimeControl::start(None));
    assert_eq!(result, Err(SearchError::NoLegalMoves));
}
