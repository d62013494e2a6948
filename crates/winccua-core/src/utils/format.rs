/// Text shown instead of an empty table
pub const NO_DATA: &str = "No data available.";

/// Render rows as a plain-text table: left-aligned columns padded to the
/// widest cell, ` | ` between cells and a `-+-` rule under the header.
/// Missing cells render empty.
pub fn format_table(columns: &[&str], rows: &[Vec<Option<String>>]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .filter_map(|row| row.get(i).and_then(|c| c.as_deref()))
                .map(|cell| cell.chars().count())
                .fold(name.chars().count(), usize::max)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| pad_end(name, *width))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).and_then(|c| c.as_deref()).unwrap_or("");
                pad_end(cell, *width)
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

fn pad_end(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
