use anyhow::Result;

use super::{load_app, write_svg};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::OverviewArgs) -> Result<()> {
    let mut app = load_app(cli)?;
    app.show_all();

    for marker in app.overview() {
        let mark = if marker.fully_completed { " done" } else { "" };
        println!(
            "{:<24} {:>4} boards  [{:.5}, {:.5}]  {}{mark}",
            marker.district, marker.board_count, marker.position.lat, marker.position.lng, marker.color,
        );
    }

    if let Some(path) = &args.svg {
        write_svg(app.surface(), path)?;
    }
    Ok(())
}
