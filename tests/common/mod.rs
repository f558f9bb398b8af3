#![allow(dead_code)]

use std::collections::BTreeMap;

use algolab::collections::ComparisonMeters;
use algolab::model::{ArrayMeters, NodeMeters};
use algolab::{
    ArrayModel, ArrayModelFactory, Comparator, MemoryMeters, NodeModelFactory, SortTask, Sorter,
};

/// Factories sharing one unbounded pair of memory meters.
pub struct Models {
    pub arrays: ArrayModelFactory,
    pub nodes: NodeModelFactory,
    pub memory: MemoryMeters,
}

pub fn models() -> Models {
    let memory = MemoryMeters::new();
    Models {
        arrays: ArrayModelFactory::new(ArrayMeters::new(), memory.clone()),
        nodes: NodeModelFactory::new(NodeMeters::new(), memory.clone()),
        memory,
    }
}

pub fn natural() -> Comparator<i64> {
    Comparator::natural(ComparisonMeters::new())
}

pub fn filled_array(factory: &ArrayModelFactory, items: &[i64]) -> ArrayModel<i64> {
    let mut array = factory.create(items.len()).expect("array allocation succeeds");
    for (index, item) in items.iter().enumerate() {
        array.write(index, *item).expect("write within bounds");
    }
    array
}

pub fn tasks(entries: &[(&str, SortTask)]) -> BTreeMap<String, SortTask> {
    entries
        .iter()
        .map(|(id, task)| (id.to_string(), task.clone()))
        .collect()
}

pub fn only(name: &str, sorter: Box<dyn Sorter<i64>>) -> BTreeMap<String, Box<dyn Sorter<i64>>> {
    BTreeMap::from([(name.to_string(), sorter)])
}
