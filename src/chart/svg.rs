
use kurbo::{BezPath, Point, Rect};

use crate::{chart::table::WeightTable, foundation::core::Dimensions};

/// Stacked-bar fill colours, cycled per meal column.
pub const MEAL_PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];
pub const WEIGHT_COLOR: &str = "#ffc0cb";
pub const LABEL_COLOR: &str = "#ffffff";

/// Visual parameters at 100% scale; every length is multiplied by the render unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub padding: f64,
    pub label_band: f64,
    pub font_size: f64,
    pub bar_fill_ratio: f64,
    pub weight_line_width: f64,
    pub font_family: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            padding: 60.0,
            label_band: 90.0,
            font_size: 14.0,
            bar_fill_ratio: 0.5,
            weight_line_width: 10.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Build the chart document for `table` at exactly `size` pixels.
///
/// `unit` is the render scale relative to 100% (`scale / base_resolution`). Bars stack the
/// meal columns per day against the left axis; the weight series is drawn as a polyline
/// against its own range on the right axis. The background stays transparent.
pub fn chart_svg(table: &WeightTable, style: &ChartStyle, size: Dimensions, unit: f64) -> String {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    ));

    let pad = style.padding * unit;
    let plot = Rect::new(pad, style.label_band * unit, w - pad, h - pad);
    if table.is_empty() || plot.width() <= 0.0 || plot.height() <= 0.0 {
        svg.push_str("</svg>");
        return svg;
    }

    let n = table.rows.len();
    let slot = plot.width() / n as f64;
    let bar_w = slot * style.bar_fill_ratio.clamp(0.05, 1.0);
    let max_total = table
        .rows
        .iter()
        .map(|r| r.meal_total())
        .fold(0.0f64, f64::max)
        .max(1.0);
    let meal_y = |v: f64| plot.y1 - (v / max_total) * plot.height();

    for (col, name) in table.meal_columns.iter().enumerate() {
        let mut path = BezPath::new();
        for (i, row) in table.rows.iter().enumerate() {
            let below: f64 = row.meals.iter().take(col).sum();
            let v = row.meals.get(col).copied().unwrap_or(0.0);
            if v <= 0.0 {
                continue;
            }
            let x0 = plot.x0 + slot * (i as f64) + 0.5 * (slot - bar_w);
            push_rect(
                &mut path,
                Rect::new(x0, meal_y(below + v), x0 + bar_w, meal_y(below)),
            );
        }
        if path.elements().is_empty() {
            continue;
        }
        svg.push_str(&format!(
            r#"<path id="{}" fill="{}" d="{}"/>"#,
            xml_escape(name),
            MEAL_PALETTE[col % MEAL_PALETTE.len()],
            path.to_svg()
        ));
    }

    let (w_min, w_max) = weight_range(table);
    let weight_y = |v: f64| plot.y1 - ((v - w_min) / (w_max - w_min)) * plot.height();
    let mut line = BezPath::new();
    for (i, row) in table.rows.iter().enumerate() {
        let p = Point::new(plot.x0 + slot * (i as f64 + 0.5), weight_y(row.weight));
        if i == 0 {
            line.move_to(p);
        } else {
            line.line_to(p);
        }
    }
    if n == 1 {
        // A single sample still gets a visible dot.
        let p = Point::new(plot.x0 + 0.5 * slot, weight_y(table.rows[0].weight));
        line.line_to(p);
    }
    svg.push_str(&format!(
        r#"<path id="weight" fill="none" stroke="{WEIGHT_COLOR}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round" d="{}"/>"#,
        style.weight_line_width * unit,
        line.to_svg()
    ));

    write_labels(&mut svg, table, style, plot, slot, unit, max_total, (w_min, w_max));
    svg.push_str("</svg>");
    svg
}

fn push_rect(path: &mut BezPath, r: Rect) {
    path.move_to((r.x0, r.y0));
    path.line_to((r.x1, r.y0));
    path.line_to((r.x1, r.y1));
    path.line_to((r.x0, r.y1));
    path.close_path();
}

/// Weight axis bounds with 5% headroom; never a zero-width range.
fn weight_range(table: &WeightTable) -> (f64, f64) {
    let (lo, hi) = table
        .rows
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.weight), hi.max(r.weight))
        });
    let span = (hi - lo).max(1.0);
    (lo - 0.05 * span, hi + 0.05 * span)
}

#[allow(clippy::too_many_arguments)]
fn write_labels(
    svg: &mut String,
    table: &WeightTable,
    style: &ChartStyle,
    plot: Rect,
    slot: f64,
    unit: f64,
    max_total: f64,
    (w_min, w_max): (f64, f64),
) {
    let fs = style.font_size * unit;
    let family = xml_escape(&style.font_family);
    svg.push_str(&format!(
        r#"<g fill="{LABEL_COLOR}" font-family="{family}" font-size="{fs}">"#
    ));

    // Dates run along the top edge, rotated, thinned out so neighbours never overlap.
    let max_labels = (plot.width() / (1.5 * fs)).floor().max(1.0) as usize;
    let step = table.rows.len().div_ceil(max_labels).max(1);
    for (i, row) in table.rows.iter().enumerate().step_by(step) {
        let x = plot.x0 + slot * (i as f64 + 0.5);
        let y = plot.y0 - 0.5 * fs;
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" transform="rotate(-90 {x} {y})">{}</text>"#,
            xml_escape(&row.date)
        ));
    }

    const TICKS: usize = 4;
    for t in 0..=TICKS {
        let frac = t as f64 / TICKS as f64;
        let y = plot.y1 - frac * plot.height();
        let meal_v = frac * max_total;
        let weight_v = w_min + frac * (w_max - w_min);
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="end">{meal_v:.0}</text>"#,
            plot.x0 - 0.3 * fs,
            y + 0.35 * fs
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}">{weight_v:.1}</text>"#,
            plot.x1 + 0.3 * fs,
            y + 0.35 * fs
        ));
    }
    svg.push_str("</g>");
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
#[path = "../../tests/unit/chart/svg.rs"]
mod tests;
