use std::path::PathBuf;

use anyhow::Result;

use super::{load_config, load_dataset};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ExportArgs) -> Result<()> {
    let config = load_config(cli)?;
    let dataset = load_dataset(cli, &config)?;

    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from(&config.data.export_filename));
    dataset.write_pretty(&out_path)?;

    println!("[export] wrote {} features to {}", dataset.raw()["features"].as_array().map_or(0, Vec::len), out_path.display());
    Ok(())
}
