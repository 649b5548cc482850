//! Terminal reader over the viewer's render model.
//!
//! [`App`] turns key presses into viewer operations and [`ui`] draws the
//! viewer's [`Surface`] with ratatui. Neither touches the terminal directly,
//! so both run against a test backend.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use sblgnt_viewer_engine::{
    ClauseDetail, ConfigPatch, ContainerState, Fetch, Surface, TextRun, VerseView, Viewer,
    ViewerHost,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Reading,
    /// Typing a `chapter[:verse]` reference
    Jumping(String),
}

pub struct App {
    viewer: Viewer,
    mode: Mode,
}

impl App {
    /// Build and start a viewer that reads through `fetch`
    pub fn new(fetch: impl Fetch + 'static, patch: &ConfigPatch) -> Self {
        let mut viewer = Viewer::new(ViewerHost::new(Surface::complete()).with_fetch(fetch));
        viewer.configure(patch);
        viewer.init();
        Self {
            viewer,
            mode: Mode::Reading,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Apply one key press. Returns false when the reader should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Mode::Jumping(input) = &mut self.mode {
            match code {
                KeyCode::Esc => self.mode = Mode::Reading,
                KeyCode::Enter => {
                    let input = std::mem::take(input);
                    self.submit_jump(&input);
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if c.is_ascii_digit() || c == ':' || c == ' ' => input.push(c),
                _ => {}
            }
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Down | KeyCode::Char('j') => {
                self.viewer.jump_to_next_reference();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.viewer.jump_to_previous_reference();
            }
            KeyCode::Char('g') | KeyCode::Char(':') => self.mode = Mode::Jumping(String::new()),
            KeyCode::Char('c') => {
                let enabled = !self.viewer.state().clause_overlay_enabled;
                self.viewer.set_clause_overlay(enabled);
            }
            KeyCode::Char(']') | KeyCode::Tab => self.cycle_clause(true),
            KeyCode::Char('[') | KeyCode::BackTab => self.cycle_clause(false),
            KeyCode::Char('p') => {
                self.viewer.toggle_clause_panel();
            }
            KeyCode::Char('b') | KeyCode::Right => self.cycle_book(true),
            KeyCode::Char('B') | KeyCode::Left => self.cycle_book(false),
            _ => {}
        }
        true
    }

    fn submit_jump(&mut self, input: &str) {
        self.mode = Mode::Reading;
        let (chapter, verse) = input.split_once(':').unwrap_or((input, ""));
        self.viewer.submit_reference_form(chapter, verse);
    }

    /// Activate the next or previous clause within the active verse
    fn cycle_clause(&mut self, forward: bool) {
        let Some(verse) = self
            .viewer
            .surface()
            .active_verse()
            .or_else(|| self.viewer.surface().verses().first())
        else {
            return;
        };

        let mut ids: Vec<String> = Vec::new();
        for id in verse.runs.iter().filter_map(TextRun::clause_id) {
            if !ids.iter().any(|seen| seen == id) {
                ids.push(id.to_string());
            }
        }
        if ids.is_empty() {
            return;
        }

        let current = self
            .viewer
            .state()
            .active_clause_id
            .as_ref()
            .and_then(|active| ids.iter().position(|id| id == active));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => ids.len() - 1,
            (Some(i), true) => (i + 1) % ids.len(),
            (Some(i), false) => (i + ids.len() - 1) % ids.len(),
        };
        self.viewer.activate_clause(&ids[next]);
    }

    fn cycle_book(&mut self, forward: bool) {
        let books = self.viewer.books();
        if books.len() < 2 {
            return;
        }
        let current = self
            .viewer
            .surface()
            .selector
            .as_ref()
            .and_then(|selector| books.iter().position(|book| book.book_id == selector.value))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % books.len()
        } else {
            (current + books.len() - 1) % books.len()
        };
        let book_id = books[next].book_id.clone();
        self.viewer.on_selector_change(&book_id);
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let surface = app.viewer.surface();
    let details = surface
        .clause_controls
        .as_ref()
        .filter(|controls| !controls.collapsed)
        .and_then(|controls| controls.details.as_ref());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(if details.is_some() { 8 } else { 0 }),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(header(surface), rows[0]);
    render_verses(f, surface, rows[1]);
    if let Some(detail) = details {
        f.render_widget(clause_panel(detail), rows[2]);
    }
    f.render_widget(status_line(app), rows[3]);
    f.render_widget(
        Paragraph::new(Line::from(
            "q: Quit | ↓/j ↑/k: Verse | g: Go to | b/B: Book | c: Clauses | [/]: Clause | p: Panel",
        ))
        .style(Style::default().fg(Color::DarkGray)),
        rows[4],
    );
}

fn header(surface: &Surface) -> Paragraph<'static> {
    let title = surface
        .title
        .as_ref()
        .map(|title| title.text.clone())
        .unwrap_or_default();
    let header_text = surface
        .header
        .as_ref()
        .map(|header| header.text.clone())
        .unwrap_or_default();

    let mut books: Vec<Span> = Vec::new();
    if let Some(selector) = &surface.selector {
        for option in &selector.options {
            let style = if option.value == selector.value {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            books.push(Span::styled(format!(" {} ", option.label), style));
        }
    }

    let mut lines = vec![Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::raw(header_text),
    ])];
    lines.push(Line::from(books));
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .title(surface.document_title.clone()),
    )
}

fn render_verses(f: &mut Frame, surface: &Surface, area: Rect) {
    let Some(container) = &surface.container else {
        return;
    };
    let block = Block::default().borders(Borders::ALL).title("Text");

    let lines: Vec<Line> = match container.state {
        ContainerState::Ready => container.verses.iter().map(verse_line).collect(),
        ContainerState::Idle | ContainerState::Loading => vec![Line::from("…")],
        ContainerState::Empty | ContainerState::Error => Vec::new(),
    };

    // Keep the active verse near the top of the view
    let scroll = container
        .verses
        .iter()
        .position(|verse| verse.active)
        .unwrap_or(0)
        .saturating_sub(2);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn verse_line(verse: &VerseView) -> Line<'static> {
    let reference_style = if verse.active {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(verse.reference.clone(), reference_style),
        Span::raw(" "),
    ];
    for run in &verse.runs {
        spans.push(match run {
            TextRun::Plain(text) => Span::raw(text.clone()),
            TextRun::Clause { text, active, .. } => {
                let mut style = Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED);
                if *active {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(text.clone(), style)
            }
        });
    }
    Line::from(spans)
}

fn clause_panel(detail: &ClauseDetail) -> Paragraph<'static> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            detail.function_text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        field("References", detail.references.join(", ")),
    ];
    if !detail.category_tags.is_empty() {
        lines.push(field("Categories", detail.category_tags.join(", ")));
    }
    if !detail.source_summary.is_empty() {
        lines.push(field("Source", detail.source_summary.clone()));
    }
    if !detail.parent_summary.is_empty() {
        lines.push(field("Part of", detail.parent_summary.clone()));
    }
    if !detail.child_clauses.is_empty() {
        let labels: Vec<&str> = detail
            .child_clauses
            .iter()
            .map(|child| child.label.as_str())
            .collect();
        lines.push(field("Contains", labels.join(", ")));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Clause {}", detail.clause_id)),
        )
        .wrap(Wrap { trim: true })
}

fn status_line(app: &App) -> Paragraph<'static> {
    let surface = app.viewer.surface();
    if let Mode::Jumping(input) = &app.mode {
        let hint = surface
            .reference_form
            .as_ref()
            .map(|form| form.hint.clone())
            .unwrap_or_default();
        return Paragraph::new(Line::from(vec![
            Span::styled("Go to: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(input.clone()),
            Span::styled(format!("  ({hint})"), Style::default().fg(Color::DarkGray)),
        ]));
    }

    if let Some(status) = surface.status.as_ref().filter(|status| status.is_visible()) {
        let style = if status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Yellow)
        };
        return Paragraph::new(Line::from(Span::styled(status.text.clone(), style)));
    }

    let clause_status = surface
        .clause_controls
        .as_ref()
        .map(|controls| controls.status_text.clone())
        .unwrap_or_default();
    Paragraph::new(Line::from(Span::styled(
        clause_status,
        Style::default().fg(Color::DarkGray),
    )))
}
