//! Application state and TUI event loop for the voting tracker.
//!
//! [`App`] owns the theme, the loaded snapshot table and the project
//! selection. The loop is synchronous: keys are polled with a short timeout
//! and a reload rebuilds the whole table through the caller's loader.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{error, info, warn};

use tracker_core::models::LabelOrder;
use tracker_data::aggregator::LoadOutcome;
use tracker_data::selector;

use crate::chart_view;
use crate::components::header::Header;
use crate::components::picker::ProjectPicker;
use crate::table_view::{self, TableRowData};
use crate::themes::Theme;

// ── ViewMode / Action ─────────────────────────────────────────────────────────

/// What the body of the screen shows for the selected project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Chart,
    Table,
}

/// Outcome of a key press that the event loop has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Reload,
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the tracker TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub order: LabelOrder,
    /// Data directory as shown in the header.
    pub data_dir: String,
    pub outcome: LoadOutcome,
    /// Distinct project names of `outcome.table`, sorted.
    pub projects: Vec<String>,
    pub selected: usize,
    /// One-line message shown in the footer instead of the key help.
    pub status: Option<String>,
}

impl App {
    /// Build the app around an initial load, pre-selecting `preferred` when
    /// the table contains it.
    pub fn new(
        theme_name: &str,
        order: LabelOrder,
        data_dir: String,
        outcome: LoadOutcome,
        preferred: Option<&str>,
    ) -> Self {
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            view_mode: ViewMode::Chart,
            order,
            data_dir,
            outcome: LoadOutcome::default(),
            projects: Vec::new(),
            selected: 0,
            status: None,
        };
        app.set_outcome(outcome, preferred);
        app
    }

    /// Replace the loaded data. The selection moves to `preferred` if it is
    /// still present, otherwise to the first project.
    pub fn set_outcome(&mut self, outcome: LoadOutcome, preferred: Option<&str>) {
        self.projects = selector::distinct_project_names(&outcome.table);
        self.selected = preferred
            .map(str::trim)
            .and_then(|name| self.projects.iter().position(|p| p == name))
            .unwrap_or(0);
        self.status = match outcome.skipped.len() {
            0 => None,
            1 => Some("1 snapshot skipped".to_string()),
            n => Some(format!("{} snapshots skipped", n)),
        };
        self.outcome = outcome;
    }

    pub fn selected_project(&self) -> Option<&str> {
        self.projects.get(self.selected).map(String::as_str)
    }

    pub fn next_project(&mut self) {
        if !self.projects.is_empty() {
            self.selected = (self.selected + 1) % self.projects.len();
        }
    }

    pub fn previous_project(&mut self) {
        if !self.projects.is_empty() {
            self.selected = (self.selected + self.projects.len() - 1) % self.projects.len();
        }
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Chart => ViewMode::Table,
            ViewMode::Table => ViewMode::Chart,
        };
    }

    /// Apply a key press to the state and report what the loop must do.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            KeyCode::Right | KeyCode::Char('l') => {
                self.next_project();
                Action::None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.previous_project();
                Action::None
            }
            KeyCode::Char('t') => {
                self.toggle_view();
                Action::None
            }
            KeyCode::Char('r') => Action::Reload,
            _ => Action::None,
        }
    }

    /// Rebuild the table with `load`. On failure the previous table stays
    /// on screen and the error is shown in the footer.
    pub fn reload<F>(&mut self, load: &mut F)
    where
        F: FnMut() -> tracker_core::Result<LoadOutcome>,
    {
        let keep = self.selected_project().map(str::to_string);
        match load() {
            Ok(outcome) => {
                info!(
                    "Reloaded {} records from {} snapshots",
                    outcome.table.len(),
                    outcome.sources_found
                );
                self.set_outcome(outcome, keep.as_deref());
            }
            Err(e) => {
                error!("Reload failed: {}", e);
                self.status = Some(format!("Reload failed: {}", e));
            }
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits, returning the project that was
    /// selected at that point.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout. The loop exits
    /// on `q`, `Q`, `Esc` or `Ctrl+C`.
    pub fn run<F>(mut self, mut load: F) -> io::Result<Option<String>>
    where
        F: FnMut() -> tracker_core::Result<LoadOutcome>,
    {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => break Err(e),
            }
            let key = match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(e) => break Err(e),
            };
            match self.handle_key(key) {
                Action::Quit => break Ok(()),
                Action::Reload => self.reload(&mut load),
                Action::None => {}
            }
        };

        let result = finish(result, restore_terminal(&mut terminal));
        if let Err(ref e) = result {
            warn!("TUI loop ended with an error: {}", e);
        }
        result.map(|()| self.selected_project().map(str::to_string))
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [header_area, picker_area, body, footer] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header = Header::new(
            &self.data_dir,
            self.outcome.sources_found,
            self.projects.len(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);
        frame.render_widget(self.footer_line(), footer);

        let Some(project) = self.selected_project() else {
            table_view::render_no_data(frame, body, &self.data_dir, &self.theme);
            return;
        };

        let picker = ProjectPicker::new(&self.projects, self.selected, &self.theme);
        frame.render_widget(Paragraph::new(picker.to_line()), picker_area);

        let records = selector::select_ordered(&self.outcome.table, project, self.order);
        if records.is_empty() {
            chart_view::render_no_series(frame, body, project, &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Chart => {
                let series = selector::to_series(project, &records);
                chart_view::render_chart_view(frame, body, &series, &self.theme);
            }
            ViewMode::Table => {
                let rows: Vec<TableRowData> = records.iter().map(TableRowData::from).collect();
                table_view::render_table_view(frame, body, project, &rows, &self.theme);
            }
        }
    }

    fn footer_line(&self) -> Line<'_> {
        match self.status {
            Some(ref status) => Line::from(Span::styled(status.as_str(), self.theme.warning)),
            None => Line::from(Span::styled(
                "←/→ project   t table   r reload   q quit",
                self.theme.dim,
            )),
        }
    }
}

// ── Terminal restore ──────────────────────────────────────────────────────────

/// Leave raw mode and the alternate screen and show the cursor. Every step
/// runs even when an earlier one fails; the first failure is returned.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    first_error([raw, screen, cursor])
}

fn first_error<I>(steps: I) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<()>>,
{
    steps.into_iter().collect()
}

/// The loop's own error wins over a restore error.
fn finish(loop_result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    loop_result.and(restored)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
