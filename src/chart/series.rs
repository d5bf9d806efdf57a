use crate::table::{SelectionRect, Sheet};

/// Labels and numeric values pulled out of a selected rectangle.
/// `values` is either empty or exactly as long as `labels`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label/value pairs, as many as there are values
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

/// Labels come from the first selected column, values from the second.
///
/// A selection one column wide (or touching the sheet's right edge) has no
/// value column and yields labels only. Value cells that are blank or not
/// numeric count as zero.
pub fn extract_series(sheet: &Sheet, rect: SelectionRect) -> ChartSeries {
    let label_col = rect.min_col;
    let value_col = label_col + 1;
    let has_values = value_col <= rect.max_col && value_col < sheet.max_cols();

    let last_row = rect.max_row.min(sheet.max_rows().saturating_sub(1));
    let mut series = ChartSeries::default();
    if sheet.is_empty() || rect.min_row > last_row {
        return series;
    }

    for row in rect.min_row..=last_row {
        let label = sheet.value(row, label_col).trim();
        series.labels.push(if label.is_empty() {
            format!("Row {}", row + 1)
        } else {
            label.to_string()
        });

        if has_values {
            series.values.push(parse_value(sheet.value(row, value_col)));
        }
    }
    series
}

fn parse_value(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
