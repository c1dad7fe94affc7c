use anyhow::{anyhow, Context, Result};
use boardroute::LinkBuilder;
use chrono::Utc;

use super::load_app;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::LinkArgs) -> Result<()> {
    let mut app = load_app(cli)?;
    let links = LinkBuilder::new(app.config().links.clone());

    let rendered = app.select_district(&args.district, Utc::now())
        .with_context(|| format!("District {:?} has nothing to show", args.district))?;

    let url = match (args.from, args.to) {
        (Some(from), Some(to)) => {
            let stop = |order: u32| rendered.route_list.stop(order)
                .ok_or_else(|| anyhow!("District {:?} has no board with order {order}", args.district));
            links.segment(stop(from)?.position, stop(to)?.position)
        }
        _ => rendered.whole_route_link.clone()
            .ok_or_else(|| anyhow!("District {:?} has no active boards", args.district))?,
    };

    println!("{url}");
    Ok(())
}
