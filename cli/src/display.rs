//! Table output for list commands.
//!
//! Tables go to stdout with a colored header row; layout is computed on
//! plain text so colors never affect column widths.

use colored::Colorize;
use feedstream_core::{Feed, Stream, StreamAssignmentFeed};

/// Lay out `headers` and `rows` as left-aligned columns separated by two
/// spaces. The first line is the header.
pub fn layout(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![format_row(headers, &widths)];
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells, &widths));
    }
    lines
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        eprintln!("{}", "(none)".dimmed());
        return;
    }
    let mut lines = layout(headers, rows).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold().cyan());
    }
    for line in lines {
        println!("{line}");
    }
}

pub fn feed_rows(feeds: &[Feed]) -> Vec<Vec<String>> {
    feeds
        .iter()
        .map(|f| vec![f.id.clone(), f.kind.clone(), f.title.clone(), f.uri.clone()])
        .collect()
}

pub fn stream_rows(streams: &[Stream]) -> Vec<Vec<String>> {
    streams
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.permalink.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

pub fn stream_feed_rows(entries: &[StreamAssignmentFeed]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.feed_id.clone(),
                e.kind.clone(),
                e.title.clone(),
                e.uri.clone(),
            ]
        })
        .collect()
}

pub fn print_feeds(feeds: &[Feed]) {
    print_table(&["ID", "TYPE", "TITLE", "URI"], &feed_rows(feeds));
}

pub fn print_streams(streams: &[Stream]) {
    print_table(&["ID", "NAME", "PERMALINK"], &stream_rows(streams));
}

pub fn print_stream_feeds(entries: &[StreamAssignmentFeed]) {
    print_table(
        &["ASSIGNMENT", "FEED", "TYPE", "TITLE", "URI"],
        &stream_feed_rows(entries),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_pads_columns_to_widest_cell() {
        let rows = vec![
            vec!["f1".to_string(), "https://example.com/rss".to_string()],
            vec!["feed-22".to_string(), "u".to_string()],
        ];
        let lines = layout(&["ID", "URI"], &rows);
        assert_eq!(
            lines,
            vec![
                "ID       URI",
                "f1       https://example.com/rss",
                "feed-22  u",
            ]
        );
    }

    #[test]
    fn layout_with_no_rows_is_header_only() {
        assert_eq!(layout(&["ID", "NAME"], &[]), vec!["ID  NAME"]);
    }

    #[test]
    fn stream_without_permalink_renders_empty_cell() {
        let streams = vec![Stream {
            id: "s1".to_string(),
            name: "News".to_string(),
            permalink: None,
        }];
        assert_eq!(stream_rows(&streams), vec![vec!["s1", "News", ""]]);
    }

    #[test]
    fn stream_feed_rows_lead_with_assignment_id() {
        let entries = vec![StreamAssignmentFeed {
            id: "a1".to_string(),
            feed_id: "f1".to_string(),
            uri: "https://example.com/rss".to_string(),
            title: "Example".to_string(),
            kind: "rss".to_string(),
        }];
        let rows = stream_feed_rows(&entries);
        assert_eq!(rows[0][0], "a1");
        assert_eq!(rows[0][1], "f1");
    }
}
