//! Console report formatting
//!
//! Fixed-width tables for per-bucket score aggregates, plus the formatting of
//! statistics that may be undefined.

use hunches_analysis::aggregate::ScoreAggregate;

const LABEL_WIDTH: usize = 24;

/// Formats an optional mean-like value with two decimals
pub(crate) fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.2}"))
}

/// Formats a correlation with four decimals
pub(crate) fn fmt_correlation(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_owned(), |r| format!("{r:.4}"))
}

fn print_aggregate_table_header(label_col: &str) {
    println!(
        "  {:<width$} {:>12} {:>12} {:>8}",
        label_col,
        "Mean",
        "Median",
        "Count",
        width = LABEL_WIDTH,
    );
    // label + mean(12) + median(12) + count(8) + spaces(3)
    println!("  {}", "-".repeat(LABEL_WIDTH + 35));
}

/// Prints one row per bucket
pub(crate) fn print_aggregate_table<K>(label_col: &str, rows: &[ScoreAggregate<K>]) {
    print_aggregate_table_header(label_col);
    for row in rows {
        println!(
            "  {:<width$} {:>12.2} {:>12.2} {:>8}",
            row.label,
            row.mean,
            row.median,
            row.count,
            width = LABEL_WIDTH,
        );
    }
    if rows.is_empty() {
        println!("  (no data)");
    }
}

/// Prints the stories that fell outside every bucket, if any
pub(crate) fn print_unassigned(unassigned: usize) {
    if unassigned > 0 {
        println!("  ({unassigned} outside every bucket)");
    }
}
