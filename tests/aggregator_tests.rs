use flamefold::aggregator::{
    build_collapsed_stacks, calculate_hot_paths, fold, CallTree, ChainOrder, Frame, Process,
};
use flamefold::parser::SampleRecord;
use flamefold::utils::MalformedChain;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn chain(names: &[&str]) -> Vec<Frame> {
    names.iter().map(|name| Frame::new(*name, "app")).collect()
}

fn scenario_tree() -> CallTree {
    let mut tree = CallTree::new();
    fold(&mut tree, &chain(&["main", "foo", "bar"]), 5).unwrap();
    fold(&mut tree, &chain(&["main", "foo", "baz"]), 3).unwrap();
    fold(&mut tree, &chain(&["main", "qux"]), 2).unwrap();
    tree
}

/// sample_count keyed by the function path from the root
fn counts_by_path(tree: &CallTree) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    let mut path: Vec<&str> = Vec::new();
    for id in tree.preorder().skip(1) {
        let node = tree.node(id);
        path.truncate(node.depth() - 1);
        path.push(node.function_name());
        counts.insert(path.join(";"), node.sample_count());
    }
    counts
}

#[test]
fn test_scenario_counts() {
    let tree = scenario_tree();

    assert_eq!(tree.total_samples(), 10);
    let count = |path: &[&str]| tree.node(tree.find_path(path).unwrap()).sample_count();
    assert_eq!(count(&["main"]), 10);
    assert_eq!(count(&["main", "foo"]), 8);
    assert_eq!(count(&["main", "foo", "bar"]), 5);
    assert_eq!(count(&["main", "foo", "baz"]), 3);
    assert_eq!(count(&["main", "qux"]), 2);
    tree.check_invariants().unwrap();
}

#[test]
fn test_root_count_includes_empty_chains() {
    let mut tree = CallTree::new();
    let weights = [4, 1, 7, 2];
    fold(&mut tree, &chain(&["a", "b"]), weights[0]).unwrap();
    fold(&mut tree, &[], weights[1]).unwrap();
    fold(&mut tree, &chain(&["a", "c"]), weights[2]).unwrap();
    fold(&mut tree, &chain(&["d"]), weights[3]).unwrap();

    assert_eq!(tree.total_samples(), weights.iter().sum::<i64>() as u64);
    assert_eq!(tree.root().self_count(), 1);
    tree.check_invariants().unwrap();
}

#[test]
fn test_recursion_keeps_distinct_nodes() {
    let mut tree = CallTree::new();
    fold(&mut tree, &chain(&["A", "B", "A"]), 1).unwrap();

    assert_eq!(tree.len(), 4);
    let inner = tree.find_path(&["A", "B", "A"]).unwrap();
    assert_eq!(tree.node(inner).depth(), 3);
    assert_ne!(inner, tree.find_path(&["A"]).unwrap());
    assert!(tree.node(inner).is_leaf());
}

#[test]
fn test_same_function_in_different_modules() {
    let mut tree = CallTree::new();
    fold(&mut tree, &[Frame::new("memcpy", "libc.so")], 1).unwrap();
    fold(&mut tree, &[Frame::new("memcpy", "app")], 1).unwrap();

    assert_eq!(tree.root().child_count(), 2);
}

#[test]
fn test_arrival_order_does_not_change_counts() {
    let chains: Vec<(Vec<Frame>, i64)> = vec![
        (chain(&["main", "foo", "bar"]), 5),
        (chain(&["main", "qux"]), 2),
        (chain(&["main", "foo", "baz"]), 3),
        (chain(&["main"]), 1),
    ];

    let mut forward = CallTree::new();
    for (frames, weight) in &chains {
        fold(&mut forward, frames, *weight).unwrap();
    }
    let mut backward = CallTree::new();
    for (frames, weight) in chains.iter().rev() {
        fold(&mut backward, frames, *weight).unwrap();
    }

    assert_eq!(counts_by_path(&forward), counts_by_path(&backward));
}

#[test]
fn test_rejected_chain_leaves_tree_untouched() {
    let mut tree = scenario_tree();
    let before = counts_by_path(&tree);

    let bad = vec![Frame::new("main", "app"), Frame::new("", ""), Frame::new("x", "app")];
    assert_eq!(fold(&mut tree, &bad, 1), Err(MalformedChain::EmptyFrame { depth: 1 }));
    assert_eq!(fold(&mut tree, &chain(&["main"]), 0), Err(MalformedChain::ZeroWeight));
    assert_eq!(
        fold(&mut tree, &chain(&["main"]), -3),
        Err(MalformedChain::NegativeWeight(-3))
    );

    assert_eq!(counts_by_path(&tree), before);
    assert_eq!(tree.total_samples(), 10);
}

#[test]
fn test_process_groups_threads() {
    let mut process = Process::new(10, "server");
    let samples = [
        SampleRecord::new(10, 10, 2, chain(&["main", "poll"])),
        SampleRecord::new(11, 10, 1, chain(&["worker", "run"])),
        SampleRecord::new(10, 10, 1, chain(&["main", "poll"])),
        SampleRecord::new(11, 10, 0, chain(&["worker", "run"])),
    ];
    for record in samples {
        let _ = process.add_sample(record, ChainOrder::RootFirst);
    }

    assert_eq!(process.num_samples(), 3);
    assert_eq!(process.skipped().zero_weight, 1);
    assert_eq!(process.thread(10).unwrap().total_samples(), 3);
    assert_eq!(process.thread(11).unwrap().total_samples(), 1);

    let finished = process.finish();
    let tids: Vec<u32> = finished.threads.iter().map(|t| t.tid).collect();
    assert_eq!(tids, vec![10, 11]);
    assert!(finished.is_main_thread(&finished.threads[0]));
}

#[test]
fn test_hot_paths_from_tree() {
    let tree = scenario_tree();
    let stacks = build_collapsed_stacks(&tree);
    let hot = calculate_hot_paths(&stacks, tree.total_samples(), 2);

    assert_eq!(hot.len(), 2);
    assert_eq!(hot[0].stack, "main;foo;bar");
    assert_eq!(hot[0].samples, 5);
    assert_eq!(hot[0].percentage, 50.0);
    assert_eq!(hot[1].stack, "main;foo;baz");
}
