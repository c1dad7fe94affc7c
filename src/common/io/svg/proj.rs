use std::io::Write;

use anyhow::Result;
use geo::{Coord, Rect};

use super::Rgb;

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Fit an equirectangular projection of `bounds` into a canvas `width` wide.
/// Returns the projection, the canvas height and the scale (px per degree).
/// Degenerate extents (a single point) are padded so the scale stays finite.
pub(crate) fn fit_projection(bounds: Rect<f64>, width: f64, margin: f64) -> (Box<Projection>, f64, f64) {
    const MIN_SPAN: f64 = 1e-4;

    let span_x = bounds.width().max(MIN_SPAN);
    let span_y = bounds.height().max(MIN_SPAN);
    let center = bounds.center();

    let scale = (width - 2.0 * margin) / span_x;
    let height = span_y * scale + 2.0 * margin;
    let (mid_x, mid_y) = (width / 2.0, height / 2.0);

    // lon/lat -> SVG coords (Y down), relative to the bounds centre
    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = mid_x + (coord.x - center.x) * scale;
        let y = mid_y - (coord.y - center.y) * scale;
        (x, y)
    };

    (Box::new(project), height, scale)
}

/// Escape text for use inside SVG attributes and elements.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Draw an open polyline as an SVG path "M x,y L x,y ...".
pub(crate) fn draw_polyline(writer: &mut impl Write, coords: &[Coord<f64>], color: Rgb, dashed: bool, project: &Projection) -> Result<()> {
    let mut points = coords.iter().map(|c| project(c));
    let Some((x, y)) = points.next() else { return Ok(()) };

    let mut d = format!("M{x:.3},{y:.3}");
    for (x, y) in points {
        d.push_str(&format!(" L{x:.3},{y:.3}"));
    }

    let class = if dashed { "route fallback" } else { "route" };
    writeln!(writer, r#"<path class="{class}" d="{d}" style="stroke:{color}"/>"#)?;
    Ok(())
}

/// Draw a circle marker, optionally with a centred label.
pub(crate) fn draw_marker(writer: &mut impl Write, at: &Coord<f64>, radius: f64, color: Rgb, label: Option<&str>, project: &Projection) -> Result<()> {
    let (cx, cy) = project(at);
    writeln!(writer, r#"<circle class="marker" cx="{cx:.3}" cy="{cy:.3}" r="{radius:.1}" style="fill:{color}"/>"#)?;
    if let Some(label) = label {
        writeln!(writer, r#"<text class="label" x="{cx:.3}" y="{cy:.3}">{}</text>"#, escape_xml(label))?;
    }
    Ok(())
}

/// Draw a translucent circle of `radius_px` (accuracy halo).
pub(crate) fn draw_halo(writer: &mut impl Write, at: &Coord<f64>, radius_px: f64, color: Rgb, project: &Projection) -> Result<()> {
    let (cx, cy) = project(at);
    writeln!(writer, r#"<circle class="accuracy" cx="{cx:.3}" cy="{cy:.3}" r="{radius_px:.1}" style="fill:{color};stroke:{color}"/>"#)?;
    Ok(())
}
