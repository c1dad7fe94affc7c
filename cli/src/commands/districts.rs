use anyhow::Result;
use boardroute::{compute_progress, filter_districts, list_districts};

use super::{load_config, load_dataset};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::DistrictsArgs) -> Result<()> {
    let config = load_config(cli)?;
    let dataset = load_dataset(cli, &config)?;

    let entries = list_districts(&dataset);
    let visible = filter_districts(&entries, args.search.as_deref().unwrap_or(""));

    for entry in &visible {
        let progress = compute_progress(&dataset, &entry.name);
        let mark = if progress.is_fully_completed { " done" } else { "" };
        println!(
            "{:>4}  {:<24} {:>3}/{:<3} ({:>3}%){mark}",
            entry.numeric(),
            entry.display(),
            progress.completed_boards,
            progress.total_boards,
            progress.percent(),
        );
    }

    if cli.verbose > 0 {
        eprintln!("[districts] showing {} of {}", visible.len(), entries.len());
    }
    Ok(())
}
