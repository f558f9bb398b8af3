mod common;

use algolab::meter::{register_recursive_call, register_recursive_return};
use algolab::model::{ArrayMeters, LIST_NODE_WEIGHT};
use algolab::sorting::InsertionSorter;
use algolab::{
    ArrayModelFactory, MemoryMeters, ModelError, Registry, SortContext, Sorter, Stopwatch,
};

#[test]
fn insertion_sort_counts_match_hand_trace() {
    let models = common::models();
    let comparator = common::natural();
    let recursions = Registry::new(0);
    let stopwatch = Stopwatch::new();
    let target_meters = ArrayMeters::new();
    let target_factory = ArrayModelFactory::new(target_meters.clone(), MemoryMeters::new());
    let mut target = common::filled_array(&target_factory, &[3, 1, 2]);

    let ctx = SortContext::new(
        &comparator,
        &models.arrays,
        &models.nodes,
        &recursions,
        &stopwatch,
    );
    InsertionSorter.sort(&mut target, &ctx).expect("sort succeeds");

    assert_eq!(target.read(0), Ok(1));
    assert_eq!(target.read(1), Ok(2));
    assert_eq!(target.read(2), Ok(3));
    // 3 loading writes, 4 swap writes; 6 comparison reads, 3 readback reads.
    assert_eq!(target_meters.writes.value(), 7);
    assert_eq!(target_meters.reads.value(), 9);
    assert_eq!(comparator.meters().comparisons.value(), 3);
    assert_eq!(models.memory.allocations.count(), 0);
}

#[test]
fn destruct_is_idempotent_and_final() {
    let models = common::models();
    let array = common::filled_array(&models.arrays, &[1, 2, 3, 4]);
    let node = models.nodes.create_list_node(7i64).expect("node allocation");
    assert_eq!(models.memory.outstanding(), 4 + LIST_NODE_WEIGHT as i64);

    assert_eq!(array.destruct(), Ok(true));
    assert_eq!(array.destruct(), Ok(false));
    assert_eq!(node.destruct(), Ok(true));
    assert_eq!(node.destruct(), Ok(false));

    assert_eq!(models.memory.outstanding(), 0);
    assert_eq!(models.memory.usage.count(), 4);
    assert_eq!(array.read(0), Err(ModelError::DestructedAccess));
    assert_eq!(node.item(), Err(ModelError::DestructedAccess));
}

#[test]
fn recursion_helpers_track_depth() {
    let recursions = Registry::new(0);
    for _ in 0..3 {
        register_recursive_call(&recursions).expect("unbounded");
    }
    register_recursive_return(&recursions).expect("unbounded");
    register_recursive_call(&recursions).expect("unbounded");
    for _ in 0..3 {
        register_recursive_return(&recursions).expect("unbounded");
    }
    assert_eq!(recursions.peak(), 3);
    assert_eq!(recursions.total(), 0);
    assert_eq!(recursions.count(), 8);
}
