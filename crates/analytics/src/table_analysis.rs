//! Column profiling for tables read from CSV.

use serde::Serialize;

use worktrack_text::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every present cell parses as a whole number.
    Integer,
    /// Every present cell parses as a finite number, at least one of them fractional.
    Float,
    Text,
    /// No present cells.
    Empty,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Empty => "empty",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub column_type: ColumnType,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableAnalysis {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub column_summaries: Vec<ColumnSummary>,
    /// One entry per numeric column, in column order.
    pub numeric_stats: Vec<NumericStats>,
}

pub fn analyze_table(table: &Table) -> TableAnalysis {
    let mut column_summaries = Vec::with_capacity(table.column_count());
    let mut numeric_stats = Vec::new();

    for (index, name) in table.columns().iter().enumerate() {
        let present: Vec<&str> = table.column(index).flatten().collect();
        let missing = table.row_count() - present.len();
        let column_type = infer_type(&present);

        if column_type.is_numeric() {
            let values: Vec<f64> = present.iter().filter_map(|cell| parse_number(cell)).collect();
            if let Some(stats) = describe(name, values) {
                numeric_stats.push(stats);
            }
        }

        column_summaries.push(ColumnSummary {
            name: name.clone(),
            column_type,
            missing,
        });
    }

    TableAnalysis {
        rows: table.row_count(),
        columns: table.column_count(),
        column_names: table.columns().to_vec(),
        column_summaries,
        numeric_stats,
    }
}

fn infer_type(cells: &[&str]) -> ColumnType {
    if cells.is_empty() {
        return ColumnType::Empty;
    }
    if cells.iter().all(|cell| cell.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if cells.iter().all(|cell| parse_number(cell).is_some()) {
        return ColumnType::Float;
    }
    ColumnType::Text
}

// "inf" and "NaN" parse as f64 but are treated as text.
fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn describe(name: &str, mut values: Vec<f64>) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 0 {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    } else {
        values[count / 2]
    };
    let std = (count > 1).then(|| {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    });

    Some(NumericStats {
        column: name.to_string(),
        count,
        mean,
        median,
        min: values[0],
        max: values[count - 1],
        std,
    })
}
