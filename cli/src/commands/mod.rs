pub mod districts;
pub mod export;
pub mod link;
pub mod overview;
pub mod show;
pub mod summary;

use std::path::Path;

use anyhow::{Context, Result};
use boardroute::{App, AppContext, Config, Dataset, MemoryStore, Scene};
use tracing::info;

use crate::cli::Cli;

pub(crate) type CliApp = App<Scene, MemoryStore>;

/// Config from `--config`, else the defaults.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Dataset from `--data` (path or URL), else the configured path.
pub(crate) fn load_dataset(cli: &Cli, config: &Config) -> Result<Dataset> {
    let source = cli.data.as_deref().unwrap_or(&config.data.geojson_path);

    let dataset = if source.starts_with("http://") || source.starts_with("https://") {
        Dataset::fetch(source)
    } else {
        Dataset::from_file(Path::new(source))
    };
    let dataset = dataset.with_context(|| format!("Failed to load route data from {source}"))?;

    info!(source, features = dataset.len(), "route data ready");
    Ok(dataset)
}

/// Viewer backed by an in-memory scene and store.
pub(crate) fn load_app(cli: &Cli) -> Result<CliApp> {
    let config = load_config(cli)?;
    let dataset = load_dataset(cli, &config)?;
    Ok(App::new(AppContext::new(config, dataset), Scene::new(), MemoryStore::new()))
}

/// Write the scene as SVG, reporting the path.
pub(crate) fn write_svg(scene: &Scene, path: &Path) -> Result<()> {
    scene.to_svg(path)?;
    println!("[svg] wrote {}", path.display());
    Ok(())
}
