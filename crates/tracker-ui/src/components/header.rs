use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Source information in `[ data dir | N snapshots | M projects ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Directory the snapshots were loaded from.
    pub data_dir: &'a str,
    /// Number of snapshot files that were discovered.
    pub snapshots: usize,
    /// Number of distinct projects across all snapshots.
    pub projects: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(data_dir: &'a str, snapshots: usize, projects: usize, theme: &'a Theme) -> Self {
        Self {
            data_dir,
            snapshots,
            projects,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" VOTING TRACKER ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.data_dir, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(plural(self.snapshots, "snapshot"), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(plural(self.projects, "project"), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
