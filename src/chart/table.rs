use std::{io::Read, path::Path};

use anyhow::Context as _;

use crate::foundation::error::{GazerError, GazerResult};

/// Minimum number of non-empty cells a row needs to be kept.
const MIN_FILLED_CELLS: usize = 3;

/// One dated row: body weight and per-meal amounts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DayEntry {
    pub date: String,
    pub weight: f64,
    pub meals: Vec<f64>,
}

impl DayEntry {
    pub fn meal_total(&self) -> f64 {
        self.meals.iter().sum()
    }
}

/// Normalized diary table: a date label, a numeric weight and N meal columns per row.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeightTable {
    pub meal_columns: Vec<String>,
    pub rows: Vec<DayEntry>,
}

impl WeightTable {
    pub fn from_csv_path(path: &Path) -> GazerResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open data table '{}'", path.display()))?;
        Self::from_csv_reader(std::io::BufReader::new(f))
            .map_err(|e| GazerError::input(format!("{}: {e}", path.display())))
    }

    /// Parse a diary sheet exported as CSV.
    ///
    /// The first record names the columns; unnamed trailing columns become `meal0`, `meal1`, ...
    /// Rows with fewer than three filled cells are dropped. Weights may use a decimal comma.
    pub fn from_csv_reader<R: Read>(reader: R) -> GazerResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::<csv::StringRecord>::new();
        for rec in csv_reader.records() {
            records.push(rec.map_err(|e| GazerError::input(format!("read csv: {e}")))?);
        }
        let Some((header, body)) = records.split_first() else {
            return Err(GazerError::input("data table is empty"));
        };

        let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut columns: Vec<String> = header.iter().map(str::to_string).collect();
        let named = columns.len();
        columns.extend((0..width.saturating_sub(named)).map(|i| format!("meal{i}")));

        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| GazerError::input(format!("data table has no '{name}' column")))
        };
        let date_idx = find("date")?;
        let weight_idx = find("weight")?;
        let meal_idx: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.starts_with("meal"))
            .map(|(i, _)| i)
            .collect();

        let mut rows = Vec::with_capacity(body.len());
        for (line, rec) in body.iter().enumerate() {
            let filled = rec.iter().filter(|c| !c.is_empty()).count();
            if filled < MIN_FILLED_CELLS {
                continue;
            }
            let cell = |i: usize| rec.get(i).unwrap_or("");
            let weight = parse_decimal(cell(weight_idx)).ok_or_else(|| {
                GazerError::input(format!(
                    "row {}: invalid weight '{}'",
                    line + 2,
                    cell(weight_idx)
                ))
            })?;
            let mut meals = Vec::with_capacity(meal_idx.len());
            for &i in &meal_idx {
                let raw = cell(i);
                let v = if raw.is_empty() {
                    0.0
                } else {
                    parse_decimal(raw).ok_or_else(|| {
                        GazerError::input(format!(
                            "row {}: invalid value '{raw}' in column '{}'",
                            line + 2,
                            columns[i]
                        ))
                    })?
                };
                meals.push(v);
            }
            rows.push(DayEntry {
                date: cell(date_idx).to_string(),
                weight,
                meals,
            });
        }

        Ok(Self {
            meal_columns: meal_idx.iter().map(|&i| columns[i].clone()).collect(),
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let v = raw.trim().replace(',', ".").parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

#[cfg(test)]
#[path = "../../tests/unit/chart/table.rs"]
mod tests;
