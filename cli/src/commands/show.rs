use anyhow::{Context, Result};
use boardroute::{format_hours, RouteRow};
use chrono::Utc;

use super::{load_app, write_svg};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ShowArgs) -> Result<()> {
    let mut app = load_app(cli)?;

    let rendered = app.select_district(&args.district, Utc::now())
        .with_context(|| format!("District {:?} has nothing to show", args.district))?
        .clone();

    let info = &rendered.info;
    println!("{} {}", info.district, info.number_label);
    println!("  boards      {} active, {} completed", info.active_count, info.completed_count);
    if let Some(km) = info.total_distance_km {
        println!("  distance    {km:.2} km");
    }
    if let Some(hours) = info.estimated_hours {
        println!("  time        {}", format_hours(hours));
    }
    if let Some(office) = &info.office_name {
        println!("  office      {office}");
    }
    if rendered.detailed {
        println!("  route       detailed (road-following)");
    }
    println!();

    for row in rendered.route_list.rows() {
        match row {
            RouteRow::Stop(stop) => println!("{:>3}. {}  {}", stop.order, stop.title(), stop.address),
            RouteRow::Connector(leg) => println!("      ↓ {:.2} km • {}", leg.distance_km, leg.time_text),
        }
    }

    if let Some(link) = &rendered.whole_route_link {
        println!();
        println!("{link}");
    }

    if let Some(path) = &args.svg {
        write_svg(app.surface(), path)?;
    }
    if let Some(path) = &args.scene {
        std::fs::write(path, app.surface().to_json()?)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        println!("[scene] wrote {}", path.display());
    }
    Ok(())
}
