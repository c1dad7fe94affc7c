use anyhow::Result;
use boardroute::{format_hours, overall_summary};

use super::{load_config, load_dataset};

pub fn run(cli: &crate::cli::Cli) -> Result<()> {
    let config = load_config(cli)?;
    let dataset = load_dataset(cli, &config)?;
    let summary = overall_summary(&dataset);

    println!("districts         {}", summary.district_count);
    println!("boards            {}", summary.total_boards);
    println!("avg distance      {:.1} km", summary.average_distance_km);
    println!("avg time          {}", format_hours(summary.average_hours));
    Ok(())
}
