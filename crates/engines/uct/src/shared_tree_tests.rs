use super::*;
use crate::test_games::{Fragile, Race, for_each_node};

fn config(workers: usize, iterations: u64) -> UctConfig {
    UctConfig {
        min_tries_per_node: 3,
        worker_count: workers,
        seed: Some(17),
        max_iterations: Some(iterations),
        ..UctConfig::default()
    }
}

#[test]
fn test_concurrent_workers_expand_each_slot_once() {
    let game = Race::new(14);
    for round in 0..5 {
        let tree = SearchTree::new(&game);
        let reports = run_workers(&tree, &game, &config(8, 400), &TimeControl::start(None));
        assert_eq!(reports.len(), 8);
        assert!(reports.iter().all(|r| r.iterations == 400));

        // Any slot written twice would leave the expansion counter ahead of
        // the nodes actually reachable from the root.
        let mut reachable = 0;
        for_each_node(tree.root(), &mut |node| {
            reachable += 1;
            let s = node.stats();
            assert!(s.value >= 0.0 && s.value <= f64::from(s.visits));
            let children: Vec<_> = node.children().into_iter().flatten().collect();
            if !children.is_empty() {
                let below: u32 = children.iter().map(|c| c.stats().visits).sum();
                assert_eq!(below, s.visits, "round {round}");
            }
        });
        assert_eq!(reachable, tree.node_count(), "round {round}");
        assert_eq!(tree.root().stats().visits, 8 * 400);
    }
}

#[test]
fn test_shared_search_finds_winning_move() {
    let game = Race::new(5);
    let summary = search(&game, &config(4, 1000), &TimeControl::start(None)).unwrap();
    assert_eq!(summary.choice.mv, 1);
    assert_eq!(summary.workers, 4);
    assert_eq!(summary.stats.iterations, 4000);
}

#[test]
fn test_single_worker_reports_its_iterations() {
    let game = Race::new(8);
    let tree = SearchTree::new(&game);
    let reports = run_workers(&tree, &game, &config(1, 100), &TimeControl::start(None));
    assert_eq!(reports, vec![RunStats {
        iterations: 100,
        inconclusive: 0,
    }]);
}

#[test]
fn test_budget_stops_all_workers() {
    let game = Race::new(30);
    let config = UctConfig {
        time_budget_seconds: 0.1,
        worker_count: 4,
        ..UctConfig::default()
    };
    let time_control = TimeControl::with_budget(config.time_budget());
    let summary = search(&game, &config, &time_control).unwrap();
    assert!(time_control.is_stopped());
    assert!(time_control.elapsed().as_secs_f64() < 1.0);
    assert!(summary.stats.iterations > 0);
}

#[test]
fn test_no_result_when_every_worker_fails() {
    // Each worker reaches the poisoned slot within its first few passes.
    let game = Fragile(Race::new(5));
    let result = search(&game, &config(3, 1000), &TimeControl::start(None));
    assert_eq!(result, Err(SearchError::NoLegalMoves));
}

#[test]
fn test_single_failing_worker_gives_no_result() {
    let game = Fragile(Race::new(5));
    let result = search(&game, &config(1, 1000), &TimeControl::start(None));
    assert_eq!(result, Err(SearchError::NoLegalMoves));
}
