use std::path::PathBuf;

/// Poster-board route viewer CLI
#[derive(clap::Parser, Debug)]
#[command(name = "boardroute", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// GeoJSON route data: a file path or an http(s) URL [default: from config]
    #[arg(long, global = true)]
    pub data: Option<String>,

    /// JSON config file overriding the built-in defaults
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List districts with their completion progress
    Districts(DistrictsArgs),

    /// Render one district and print its route list
    Show(ShowArgs),

    /// Render the all-districts overview
    Overview(OverviewArgs),

    /// Print a walking-directions link for a district or one of its legs
    Link(LinkArgs),

    /// Write the dataset as pretty-printed GeoJSON
    Export(ExportArgs),

    /// Print statistics over all districts
    Summary,
}

#[derive(clap::Args, Debug)]
pub struct DistrictsArgs {
    /// Only list districts whose name, number or label contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// District name as written in the data
    pub district: String,

    /// Write the rendered map to this SVG file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svg: Option<PathBuf>,

    /// Write the rendered scene as JSON to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub scene: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct OverviewArgs {
    /// Write the overview map to this SVG file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svg: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct LinkArgs {
    /// District name as written in the data
    pub district: String,

    /// Route order of the leg's first board
    #[arg(long, requires = "to")]
    pub from: Option<u32>,

    /// Route order of the leg's second board
    #[arg(long, requires = "from")]
    pub to: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file [default: export filename from config]
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
