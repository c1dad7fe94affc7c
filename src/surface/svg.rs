use std::{io::Write, path::Path};

use anyhow::Result;
use geo::{Coord, Rect};

use crate::common::{self, bounds, LatLng};

use super::{MarkerKind, Scene, View};

/// Meters per degree of latitude, used to size accuracy circles.
const METERS_PER_DEGREE: f64 = 111_320.0;

const MARKER_RADIUS: f64 = 9.0;
const DISTRICT_RADIUS: f64 = 14.0;

impl Scene {
    /// Small wrapper with defaults.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        self.to_svg_with_size(path, 1200, 20)
    }

    /// Render both layers to an SVG file.
    pub fn to_svg_with_size(&self, path: &Path, width: i32, margin: i32) -> Result<()> {
        common::ensure_parent_dir(path)?;
        let mut writer = common::SvgWriter::new(path)?;
        self.write_svg(&mut writer, width as f64, margin as f64)?;
        writer.flush()?;
        Ok(())
    }

    /// Render both layers to an SVG document in memory.
    pub fn to_svg_string(&self, width: i32, margin: i32) -> Result<String> {
        let mut writer = common::SvgStringWriter::new();
        self.write_svg(&mut writer, width as f64, margin as f64)?;
        writer.into_string()
    }

    /// Drawing area: the drawn coordinates, else the current view, else the origin.
    fn svg_bounds(&self) -> Rect<f64> {
        if let Some(rect) = bounds(&self.coords()) { return rect }
        let center = match &self.view {
            Some(View::Center { center, .. }) => *center,
            Some(View::Fit { south_west, north_east, .. }) => common::midpoint(*south_west, *north_east),
            None => LatLng::new(0.0, 0.0),
        };
        Rect::new(center.to_coord(), center.to_coord())
    }

    fn write_svg(&self, writer: &mut impl Write, width: f64, margin: f64) -> Result<()> {
        let bounds = self.svg_bounds();
        let (project, height, scale) = common::fit_projection(bounds, width, margin);

        common::write_svg_header(writer, width, height, margin, scale, &bounds)?;
        common::write_svg_styles(writer)?;

        // routes below points
        for line in &self.routes {
            let coords: Vec<Coord<f64>> = line.path.iter().map(|p| p.to_coord()).collect();
            common::draw_polyline(writer, &coords, common::css_color(&line.color), line.dashed, &*project)?;
        }

        for marker in &self.points {
            let color = common::css_color(&marker.color);
            let at = marker.position.to_coord();
            match &marker.kind {
                MarkerKind::Accuracy { radius_m } => {
                    let radius_px = radius_m / METERS_PER_DEGREE * scale;
                    common::draw_halo(writer, &at, radius_px, color, &*project)?;
                }
                MarkerKind::District => {
                    common::draw_marker(writer, &at, DISTRICT_RADIUS, color, marker.label.as_deref(), &*project)?;
                }
                _ => {
                    common::draw_marker(writer, &at, MARKER_RADIUS, color, marker.label.as_deref(), &*project)?;
                }
            }
        }

        common::write_svg_footer(writer)?;
        Ok(())
    }
}
