//! Plain-text dataset rendering.
//!
//! The notebook tooling configured its environment to show every row and
//! column at full width; [`DisplayOptions::unlimited`] is that configuration,
//! while [`DisplayOptions::default`] keeps output bounded for terminals.

use crate::types::{DataSet, Value};

/// Formatting knobs for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Rows to show before eliding the rest; `None` shows everything.
    pub max_rows: Option<usize>,
    /// Per-cell width cap (in characters); longer cells are truncated with
    /// `…`. `None` never truncates.
    pub max_col_width: Option<usize>,
    /// Decimal places for floats.
    pub float_precision: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_rows: Some(20),
            max_col_width: Some(32),
            float_precision: 3,
        }
    }
}

impl DisplayOptions {
    /// Show every row and the full width of every cell.
    pub fn unlimited() -> Self {
        Self {
            max_rows: None,
            max_col_width: None,
            float_precision: 3,
        }
    }
}

/// Render a dataset as an aligned text table.
pub fn render(dataset: &DataSet, options: &DisplayOptions) -> String {
    let shown_rows = options
        .max_rows
        .map_or(dataset.row_count(), |m| m.min(dataset.row_count()));

    // Format all shown cells first so column widths can be computed.
    let header: Vec<String> = dataset
        .schema
        .field_names()
        .map(|n| clip(n, options.max_col_width))
        .collect();
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(shown_rows);
    for row in dataset.rows.iter().take(shown_rows) {
        grid.push(
            row.iter()
                .map(|v| clip(&format_value(v, options.float_precision), options.max_col_width))
                .collect(),
        );
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &grid {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for row in &grid {
        push_row(&mut out, row, &widths);
    }

    let elided = dataset.row_count() - shown_rows;
    if elided > 0 {
        out.push_str(&format!("… ({elided} more rows)\n"));
    }
    out
}

fn format_value(value: &Value, float_precision: usize) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => format!("{v:.float_precision$}"),
        Value::Bool(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
    }
}

fn clip(s: &str, max_width: Option<usize>) -> String {
    match max_width {
        Some(max) if s.chars().count() > max => {
            let keep: String = s.chars().take(max.saturating_sub(1)).collect();
            format!("{keep}…")
        }
        _ => s.to_string(),
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut first = true;
    for (cell, width) in cells.iter().zip(widths) {
        if !first {
            out.push_str("  ");
        }
        first = false;
        out.push_str(cell);
        for _ in cell.chars().count()..*width {
            out.push(' ');
        }
    }
    // Trim the padding of the last column.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
