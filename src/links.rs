use crate::{common::LatLng, config::LinkConfig};

/// Builds walking-direction deep links for an external maps service.
#[derive(Clone, Debug, Default)]
pub struct LinkBuilder {
    config: LinkConfig,
}

impl LinkBuilder {
    pub fn new(config: LinkConfig) -> Self { Self { config } }

    /// Route through every point in order: first is the origin, last the
    /// destination, the rest become `|`-separated waypoints. `None` for no points.
    pub fn whole_route(&self, points: &[LatLng]) -> Option<String> {
        let (first, last) = (points.first()?, points.last()?);
        let mut url = self.directions(*first, *last);

        if points.len() > 2 {
            let waypoints = points[1..points.len() - 1].iter()
                .map(|p| coord_text(*p))
                .collect::<Vec<_>>()
                .join("|");
            url.push_str("&waypoints=");
            url.push_str(&urlencoding::encode(&waypoints));
        }
        Some(url)
    }

    /// Directions between two points.
    pub fn segment(&self, from: LatLng, to: LatLng) -> String {
        self.directions(from, to)
    }

    fn directions(&self, origin: LatLng, destination: LatLng) -> String {
        let base = &self.config.directions_base;
        let separator = if base.contains('?') { '&' } else { '?' };
        format!(
            "{base}{separator}origin={}&destination={}&travelmode={}",
            urlencoding::encode(&coord_text(origin)),
            urlencoding::encode(&coord_text(destination)),
            urlencoding::encode(&self.config.travel_mode),
        )
    }
}

/// `lat,lon` as the maps service expects.
fn coord_text(p: LatLng) -> String {
    format!("{},{}", p.lat, p.lng)
}

/// [`LinkBuilder::whole_route`] with the default service.
pub fn whole_route_link(points: &[LatLng]) -> Option<String> {
    LinkBuilder::default().whole_route(points)
}

/// [`LinkBuilder::segment`] with the default service.
pub fn segment_link(from: LatLng, to: LatLng) -> String {
    LinkBuilder::default().segment(from, to)
}
