mod common;

use algolab::sorting::InsertionSorter;
use algolab::{render_table, standard_sorters, ReportId, SortStatus, SortTask, SortTester, TesterConfig};

#[test]
fn single_insertion_trial_passes() {
    let tasks = common::tasks(&[("t1", SortTask::new(5))]);
    let sorters = common::only("insertion", Box::new(InsertionSorter));

    let reports = SortTester::new().run(&tasks, &sorters).expect("batch runs");

    assert_eq!(reports.len(), 1);
    let report = &reports[&ReportId::new("insertion", "t1")];
    assert_eq!(report.status(), SortStatus::Passed);
    assert_eq!(report.task().items_count, 5);
    assert!(report.readings().comparisons >= 4);
}

#[test]
fn mixed_batch_reports_every_pair() {
    let tasks = common::tasks(&[
        ("free", SortTask::new(200)),
        ("shallow", SortTask::new(200).with_recursion_limit(4)),
        ("lean", SortTask::new(200).with_aux_memory_limit(50)),
    ]);
    let sorters = standard_sorters();
    let reports = SortTester::with_config(TesterConfig::default().with_seed(42))
        .run(&tasks, &sorters)
        .expect("batch runs");

    assert_eq!(reports.len(), tasks.len() * sorters.len());
    for (id, report) in &reports {
        let expect_pass = match (id.task.as_str(), id.algorithm.as_str()) {
            ("free", _) => true,
            ("shallow", "merge-top-down" | "quick") => false,
            ("lean", "merge-top-down" | "merge-bottom-up" | "heap" | "linked-heap") => false,
            _ => true,
        };
        assert_eq!(report.passed(), expect_pass, "{id}: {}", report.detail());
    }

    let table = render_table(&reports);
    assert_eq!(table.lines().count(), reports.len() + 1);
}
