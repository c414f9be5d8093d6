//! Plain-text table rendering.
//!
//! ```text
//! Daily       Alice  Bob  Total
//! ----------  -----  ---  -----
//! 2024-01-01      1    1      2
//! 2024-01-02      1    0      1
//! ----------  -----  ---  -----
//! Total           2    1      3
//! ```
//!
//! Column widths are measured in terminal cells, so names with wide
//! characters (CJK, emoji) keep the columns aligned.

use unicode_width::UnicodeWidthStr;

use crate::config::TableConfig;
use crate::core::AggregationTable;

const COLUMN_GAP: &str = "  ";
const TOTAL_LABEL: &str = "Total";

enum Align {
    Left,
    Right,
}

fn pad(text: &str, width: usize, align: &Align) -> String {
    let fill = " ".repeat(width.saturating_sub(UnicodeWidthStr::width(text)));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            let align = if i == 0 { Align::Left } else { Align::Right };
            pad(cell, width, &align)
        })
        .collect();
    out.push_str(line.join(COLUMN_GAP).trim_end());
    out.push('\n');
}

fn push_rule(out: &mut String, widths: &[usize]) {
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join(COLUMN_GAP));
    out.push('\n');
}

/// Renders `table` as aligned text, one line per period.
///
/// # Example
///
/// ```rust
/// use chatstat::config::TableConfig;
/// use chatstat::core::{Granularity, aggregate};
/// use chatstat::render::render_table;
/// use chatstat::MessageRecord;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let table = aggregate(&[MessageRecord::new(ts, "Alice")], Granularity::Daily, ts)?;
///
/// let text = render_table(&table, &TableConfig::new().with_totals(false));
/// assert_eq!(text.lines().nth(2), Some("2024-01-01      1"));
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn render_table(table: &AggregationTable, config: &TableConfig) -> String {
    let period_header = config
        .period_header
        .clone()
        .unwrap_or_else(|| table.granularity().to_string());

    let mut header = vec![period_header];
    header.extend(table.participants().iter().cloned());
    if config.show_totals {
        header.push(TOTAL_LABEL.to_string());
    }

    let mut body: Vec<Vec<String>> = Vec::with_capacity(table.row_count());
    for (period, counts) in table.rows() {
        let mut row = vec![period.label()];
        row.extend(counts.iter().map(u64::to_string));
        if config.show_totals {
            row.push(counts.iter().sum::<u64>().to_string());
        }
        body.push(row);
    }

    let footer: Option<Vec<String>> = config.show_totals.then(|| {
        let mut row = vec![TOTAL_LABEL.to_string()];
        row.extend(table.participant_totals().iter().map(u64::to_string));
        row.push(table.total().to_string());
        row
    });

    let mut widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let w = UnicodeWidthStr::width(h.as_str());
            if i == 0 { w } else { w.max(config.min_column_width) }
        })
        .collect();
    for row in body.iter().chain(footer.iter()) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    push_rule(&mut out, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    if let Some(footer) = footer {
        push_rule(&mut out, &widths);
        push_line(&mut out, &footer, &widths);
    }
    out
}
