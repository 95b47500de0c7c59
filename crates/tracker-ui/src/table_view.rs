//! Raw snapshot table for the tracker TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per record
//! of the selected project, plus the placeholder shown when the data
//! directory yielded nothing.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use tracker_core::formatting;
use tracker_core::models::SnapshotRecord;

use crate::themes::Theme;

/// Data for a single row in the snapshot table.
#[derive(Debug, Clone)]
pub struct TableRowData {
    pub label: String,
    pub points: u64,
    pub average: f64,
    pub rank: Option<u32>,
    /// Identity of the snapshot source the row came from.
    pub source: String,
}

impl From<&SnapshotRecord> for TableRowData {
    fn from(record: &SnapshotRecord) -> Self {
        Self {
            label: record.snapshot_label.clone(),
            points: record.points,
            average: record.average,
            rank: record.rank,
            source: record.source.clone(),
        }
    }
}

/// Render the snapshot table into `area`, titled `title`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[TableRowData],
    theme: &Theme,
) {
    let header_cells = ["Snapshot", "Points", "Average", "Rank", "Source"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.label.clone()),
                Cell::from(formatting::format_points(row.points)),
                Cell::from(formatting::format_average(row.average)),
                Cell::from(formatting::format_rank(row.rank)).style(theme.rank_style(row.rank)),
                Cell::from(row.source.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Min(10),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the "no data" placeholder for an empty data directory.
pub fn render_no_data(frame: &mut Frame, area: Rect, data_dir: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No voting data found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Put snapshot files into '{}' and press 'r' to reload.", data_dir),
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Voting Tracker "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
