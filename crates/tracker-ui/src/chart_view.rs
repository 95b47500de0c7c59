//! Time-series chart of one project's points, average and rank.
//!
//! Points and average get their own panels so the small average values stay
//! readable next to point totals in the hundreds. When any snapshot carries
//! a rank, a third panel plots it on an inverted scale (#1 at the top).

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use tracker_core::formatting;
use tracker_core::models::ProjectSeries;

use crate::themes::Theme;

/// Plot coordinates derived from a [`ProjectSeries`].
///
/// The x coordinate is the observation index; labels map indices back to
/// snapshot labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub points: Vec<(f64, f64)>,
    pub averages: Vec<(f64, f64)>,
    /// `(index, -rank)` for observations that carry a rank.
    pub ranks: Vec<(f64, f64)>,
    pub max_points: u64,
    pub max_average: f64,
    pub max_rank: u32,
}

impl ChartData {
    pub fn from_series(series: &ProjectSeries) -> Self {
        let mut data = ChartData {
            labels: Vec::with_capacity(series.points.len()),
            points: Vec::with_capacity(series.points.len()),
            averages: Vec::with_capacity(series.points.len()),
            ranks: Vec::new(),
            max_points: 0,
            max_average: 0.0,
            max_rank: 0,
        };

        for (i, p) in series.points.iter().enumerate() {
            let x = i as f64;
            data.labels.push(p.label.clone());
            data.points.push((x, p.points as f64));
            data.averages.push((x, p.average));
            data.max_points = data.max_points.max(p.points);
            data.max_average = data.max_average.max(p.average);
            if let Some(rank) = p.rank {
                data.ranks.push((x, -(rank as f64)));
                data.max_rank = data.max_rank.max(rank);
            }
        }

        data
    }

    pub fn has_rank(&self) -> bool {
        !self.ranks.is_empty()
    }

    /// Upper bound of the x axis; at least 1 so a single point is visible.
    pub fn x_max(&self) -> f64 {
        (self.labels.len().saturating_sub(1) as f64).max(1.0)
    }

    /// First, middle and last labels, without repeats.
    pub fn x_labels(&self) -> Vec<String> {
        let n = self.labels.len();
        let mut picked: Vec<usize> = match n {
            0 => Vec::new(),
            1 => vec![0],
            2 => vec![0, 1],
            _ => vec![0, n / 2, n - 1],
        };
        picked.dedup();
        picked.into_iter().map(|i| self.labels[i].clone()).collect()
    }
}

/// Render the points / average (/ rank) panels for `series` into `area`.
pub fn render_chart_view(frame: &mut Frame, area: Rect, series: &ProjectSeries, theme: &Theme) {
    let data = ChartData::from_series(series);

    if data.has_rank() {
        let [top, middle, bottom] = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .areas(area);
        frame.render_widget(points_chart(&data, &series.project, theme), top);
        frame.render_widget(average_chart(&data, theme), middle);
        frame.render_widget(rank_chart(&data, theme), bottom);
    } else {
        let [top, bottom] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
        frame.render_widget(points_chart(&data, &series.project, theme), top);
        frame.render_widget(average_chart(&data, theme), bottom);
    }
}

/// Render a notice for a selected project that has no observations.
pub fn render_no_series(frame: &mut Frame, area: Rect, project: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No snapshots contain \"{}\"", project),
            theme.warning,
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn graph_type(len: usize) -> GraphType {
    if len > 1 {
        GraphType::Line
    } else {
        GraphType::Scatter
    }
}

fn x_axis<'a>(data: &ChartData, theme: &Theme) -> Axis<'a> {
    Axis::default()
        .title("Time")
        .style(theme.axis)
        .bounds([0.0, data.x_max()])
        .labels(data.x_labels())
}

fn points_chart<'a>(data: &'a ChartData, project: &str, theme: &Theme) -> Chart<'a> {
    let y_max = (data.max_points as f64 * 1.1).max(1.0);
    let dataset = Dataset::default()
        .name("Points")
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type(data.points.len()))
        .style(theme.series_points)
        .data(&data.points);

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Voting for: {} ", project)),
        )
        .x_axis(x_axis(data, theme))
        .y_axis(
            Axis::default()
                .title("Points")
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    formatting::format_points((y_max / 2.0).round() as u64),
                    formatting::format_points(y_max.round() as u64),
                ]),
        )
}

fn average_chart<'a>(data: &'a ChartData, theme: &Theme) -> Chart<'a> {
    let y_max = data.max_average.ceil().max(1.0);
    let dataset = Dataset::default()
        .name("Average")
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type(data.averages.len()))
        .style(theme.series_average)
        .data(&data.averages);

    Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(" Average score "))
        .x_axis(x_axis(data, theme))
        .y_axis(
            Axis::default()
                .title("Average")
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    formatting::format_average(y_max / 2.0),
                    formatting::format_average(y_max),
                ]),
        )
}

fn rank_chart<'a>(data: &'a ChartData, theme: &Theme) -> Chart<'a> {
    // Ranks are plotted negated so #1 sits at the top of the panel.
    let worst = data.max_rank.max(1);
    let dataset = Dataset::default()
        .name("Rank")
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type(data.ranks.len()))
        .style(theme.series_rank)
        .data(&data.ranks);

    Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(" Rank "))
        .x_axis(x_axis(data, theme))
        .y_axis(
            Axis::default()
                .title("Rank")
                .style(theme.axis)
                .bounds([-(worst as f64) - 0.5, -0.5])
                .labels(vec![format!("#{}", worst), "#1".to_string()]),
        )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tracker_core::models::SeriesPoint;

    fn point(label: &str, points: u64, average: f64, rank: Option<u32>) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            points,
            average,
            rank,
        }
    }

    fn series(points: Vec<SeriesPoint>) -> ProjectSeries {
        ProjectSeries {
            project: "Foo".to_string(),
            points,
        }
    }

    #[test]
    fn test_chart_data_coordinates() {
        let data = ChartData::from_series(&series(vec![
            point("1", 10, 4.5, Some(1)),
            point("10:00", 20, 4.8, Some(2)),
        ]));
        assert_eq!(data.points, vec![(0.0, 10.0), (1.0, 20.0)]);
        assert_eq!(data.averages, vec![(0.0, 4.5), (1.0, 4.8)]);
        assert_eq!(data.ranks, vec![(0.0, -1.0), (1.0, -2.0)]);
        assert_eq!(data.max_points, 20);
        assert_eq!(data.max_rank, 2);
    }

    #[test]
    fn test_chart_data_skips_missing_ranks() {
        let data = ChartData::from_series(&series(vec![
            point("1", 10, 4.5, None),
            point("2", 20, 4.8, Some(3)),
        ]));
        assert_eq!(data.ranks, vec![(1.0, -3.0)]);
        assert!(data.has_rank());
    }

    #[test]
    fn test_chart_data_without_ranks() {
        let data = ChartData::from_series(&series(vec![point("1", 10, 4.5, None)]));
        assert!(!data.has_rank());
        assert_eq!(data.x_max(), 1.0);
    }

    #[test]
    fn test_x_labels_first_middle_last() {
        let data = ChartData::from_series(&series(vec![
            point("a", 1, 1.0, None),
            point("b", 2, 1.0, None),
            point("c", 3, 1.0, None),
            point("d", 4, 1.0, None),
            point("e", 5, 1.0, None),
        ]));
        assert_eq!(data.x_labels(), vec!["a", "c", "e"]);
    }

    #[test]
    fn test_x_labels_small_series() {
        let one = ChartData::from_series(&series(vec![point("a", 1, 1.0, None)]));
        assert_eq!(one.x_labels(), vec!["a"]);
        let empty = ChartData::from_series(&series(vec![]));
        assert!(empty.x_labels().is_empty());
    }

    #[test]
    fn test_render_chart_view_with_rank_does_not_panic() {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let s = series(vec![
            point("1", 10, 4.5, Some(1)),
            point("10:00", 20, 4.8, Some(2)),
            point("11:00", 35, 4.7, Some(2)),
        ]);

        terminal
            .draw(|frame| render_chart_view(frame, frame.area(), &s, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_chart_view_single_point_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let s = series(vec![point("1", 0, 0.0, None)]);

        terminal
            .draw(|frame| render_chart_view(frame, frame.area(), &s, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_no_series_does_not_panic() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| render_no_series(frame, frame.area(), "Foo", &theme))
            .unwrap();
    }
}
