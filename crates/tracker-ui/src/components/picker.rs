//! One-line project selector: `◀ Project name ▶  (2/5)`.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::themes::Theme;

/// Names wider than this many terminal columns are cut with an ellipsis.
pub const MAX_NAME_WIDTH: usize = 48;

pub struct ProjectPicker<'a> {
    pub names: &'a [String],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> ProjectPicker<'a> {
    pub fn new(names: &'a [String], selected: usize, theme: &'a Theme) -> Self {
        Self {
            names,
            selected,
            theme,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let Some(name) = self.names.get(self.selected) else {
            return Line::from(Span::styled("No projects", self.theme.dim));
        };

        Line::from(vec![
            Span::styled("Project: ", self.theme.label),
            Span::styled("◀ ", self.theme.dim),
            Span::styled(truncate_to_width(name, MAX_NAME_WIDTH), self.theme.value),
            Span::styled(" ▶", self.theme.dim),
            Span::styled(
                format!("  ({}/{})", self.selected + 1, self.names.len()),
                self.theme.dim,
            ),
        ])
    }
}

/// Cut `s` so that it occupies at most `max` terminal columns, replacing
/// the tail with `…` when anything was removed.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_picker_shows_position() {
        let theme = Theme::dark();
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        let text = line_text(&ProjectPicker::new(&names, 1, &theme).to_line());
        assert!(text.contains("Beta"), "got: {text}");
        assert!(text.contains("(2/2)"), "got: {text}");
    }

    #[test]
    fn test_picker_without_projects() {
        let theme = Theme::dark();
        let text = line_text(&ProjectPicker::new(&[], 0, &theme).to_line());
        assert_eq!(text, "No projects");
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("Foo", 10), "Foo");
    }

    #[test]
    fn test_truncate_long_string() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert!(out.width() <= 5);
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns wide.
        let out = truncate_to_width("漢字漢字漢字", 5);
        assert_eq!(out, "漢字…");
    }
}
