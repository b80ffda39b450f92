//! Markdown rendering of a sheet preview.

use sheetchart_extract::SheetPreview;

/// Render the first `limit` rows of a preview as a markdown table.
pub fn preview_to_markdown(preview: &SheetPreview, limit: usize) -> String {
    let mut lines = vec![format!("# {}", preview.sheet_name), String::new()];

    if preview.column_keys.is_empty() {
        lines.push("*Empty sheet*".to_string());
        return lines.join("\n") + "\n";
    }

    let header: Vec<String> = preview
        .column_keys
        .iter()
        .map(|k| escape_markdown(k))
        .collect();
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("|{}", "---|".repeat(header.len())));

    for row in preview.rows.iter().take(limit) {
        let cells: Vec<String> = preview
            .column_keys
            .iter()
            .map(|key| {
                row.get(key)
                    .map(|v| escape_markdown(&v.to_label()))
                    .unwrap_or_default()
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    if preview.rows.len() > limit {
        lines.push(String::new());
        lines.push(format!("*{} more rows*", preview.rows.len() - limit));
    }

    lines.join("\n") + "\n"
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
