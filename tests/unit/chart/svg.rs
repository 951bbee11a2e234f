use super::*;
use crate::chart::table::DayEntry;

fn table() -> WeightTable {
    WeightTable {
        meal_columns: vec!["meal0".into(), "meal1".into()],
        rows: vec![
            DayEntry {
                date: "2026-01-01".into(),
                weight: 81.0,
                meals: vec![500.0, 700.0],
            },
            DayEntry {
                date: "<tue>".into(),
                weight: 80.5,
                meals: vec![0.0, 900.0],
            },
        ],
    }
}

fn size(w: u32, h: u32) -> Dimensions {
    Dimensions::new(w, h).unwrap()
}

#[test]
fn document_has_exact_pixel_size() {
    let svg = chart_svg(&table(), &ChartStyle::default(), size(640, 360), 1.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="640" height="360""#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn draws_one_path_per_meal_and_a_weight_line() {
    let svg = chart_svg(&table(), &ChartStyle::default(), size(640, 360), 1.0);
    assert!(svg.contains(r#"id="meal0""#));
    assert!(svg.contains(r#"id="meal1""#));
    assert!(svg.contains(r#"id="weight""#));
    assert!(svg.contains(WEIGHT_COLOR));
}

#[test]
fn line_width_follows_unit() {
    let svg = chart_svg(&table(), &ChartStyle::default(), size(640, 360), 2.5);
    assert!(svg.contains(r#"stroke-width="25""#));
}

#[test]
fn labels_are_escaped() {
    let svg = chart_svg(&table(), &ChartStyle::default(), size(640, 360), 1.0);
    assert!(svg.contains("&lt;tue&gt;"));
    assert!(!svg.contains("<tue>"));
}

#[test]
fn empty_table_is_an_empty_document() {
    let svg = chart_svg(
        &WeightTable::default(),
        &ChartStyle::default(),
        size(100, 50),
        1.0,
    );
    assert!(!svg.contains("<path"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn flat_weight_series_has_a_non_degenerate_range() {
    let mut t = table();
    for r in &mut t.rows {
        r.weight = 75.0;
    }
    let (lo, hi) = weight_range(&t);
    assert!(hi > lo);
}
