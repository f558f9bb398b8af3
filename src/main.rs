use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use algolab::{render_table, standard_sorters, SortTask, SortTester, Sorter, TesterConfig};

#[derive(Parser, Debug)]
#[command(name = "algolab", about = "Metered sorting trials under resource limits")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run sorters over one seeded sample and print a report table.
    Run(RunArgs),
    /// List the built-in sorters.
    List,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of items to sort.
    #[arg(long, default_value_t = 1000)]
    items: usize,
    /// Peak auxiliary memory weight allowed.
    #[arg(long)]
    aux_memory_limit: Option<u64>,
    /// Maximum recursion depth allowed.
    #[arg(long)]
    recursion_limit: Option<u64>,
    /// Time budget per trial in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,
    /// Sample seed.
    #[arg(long, default_value_t = TesterConfig::default().seed)]
    seed: u64,
    /// Items are drawn from 0..MAX_VALUE.
    #[arg(long, default_value_t = TesterConfig::default().max_item_value)]
    max_value: i64,
    /// Sorter to run (repeatable; default: all).
    #[arg(short, long = "algorithm")]
    algorithms: Vec<String>,
    /// Task identifier shown in the report.
    #[arg(long, default_value = "cli")]
    task_id: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => run_batch(args)?,
        Commands::List => list_sorters(),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_batch(args: RunArgs) -> Result<()> {
    let mut task = SortTask::new(args.items);
    if let Some(limit) = args.aux_memory_limit {
        task = task.with_aux_memory_limit(limit);
    }
    if let Some(limit) = args.recursion_limit {
        task = task.with_recursion_limit(limit);
    }
    if let Some(millis) = args.time_limit_ms {
        task = task.with_time_limit(Duration::from_millis(millis));
    }

    let sorters = select_sorters(&args.algorithms)?;
    let tasks = BTreeMap::from([(args.task_id.clone(), task)]);
    let config = TesterConfig::default()
        .with_seed(args.seed)
        .with_max_item_value(args.max_value);

    let reports = SortTester::with_config(config)
        .run(&tasks, &sorters)
        .with_context(|| format!("batch over task {} failed", args.task_id))?;

    print!("{}", render_table(&reports));
    Ok(())
}

fn select_sorters(names: &[String]) -> Result<BTreeMap<String, Box<dyn Sorter<i64>>>> {
    let mut available = standard_sorters::<i64>();
    if names.is_empty() {
        return Ok(available);
    }
    let mut selected = BTreeMap::new();
    for name in names {
        match available.remove(name) {
            Some(sorter) => {
                selected.insert(name.clone(), sorter);
            }
            None if selected.contains_key(name) => {}
            None => bail!("unknown algorithm {name} (see `algolab list`)"),
        }
    }
    Ok(selected)
}

fn list_sorters() {
    for (name, sorter) in standard_sorters::<i64>() {
        println!("{name:<16} {}", sorter.info());
    }
}
