use std::io;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;

use story_core::actions::{BoardAction, UserAction};
use story_core::persistence::{board_to_persisted, BoardStore};
use story_core::reducer::{reduce, BoardEffect};
use story_core::state::{
    counter_text, counter_warning, format_date, AccentTheme, BoardOverlay, BoardState, FocusPane,
    FormField, LogEntry, LogLevel, LogSource, Story, StoryStatus,
};

const EMPTY_LIST_MESSAGE: &str = "No story to display";
const CARD_HEIGHT: u16 = 7;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            crossterm::cursor::Show
        );
    }
}

pub fn run(mut state: BoardState, store: BoardStore) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard; // Ensures terminal is restored on exit or panic

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut state, &store).map_err(|e| e.into())
}

enum KeyHandlerResult {
    Continue(Vec<BoardEffect>),
    Exit,
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut BoardState,
    store: &BoardStore,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        match event::read()? {
            Event::Key(key) => match handle_key_event(key, state) {
                KeyHandlerResult::Exit => return Ok(()),
                KeyHandlerResult::Continue(effects) => process_effects(state, store, &effects),
            },
            Event::Paste(text) => {
                let effects = reduce(state, BoardAction::User(UserAction::ClipboardPaste(text)));
                process_effects(state, store, &effects);
            }
            _ => {}
        }
    }
}

fn process_effects(state: &mut BoardState, store: &BoardStore, effects: &[BoardEffect]) {
    for effect in effects {
        match effect {
            BoardEffect::PersistBoard => {
                let board = board_to_persisted(&state.stories, state.next_story_id);
                if let Err(err) = store.save_board(&board) {
                    log_store_warning(state, format!("could not save stories: {err}"));
                }
            }
            BoardEffect::PersistTheme => {
                if let Err(err) = store.save_theme(state.theme.label()) {
                    log_store_warning(state, format!("could not save theme: {err}"));
                }
            }
            // The next loop turn redraws unconditionally.
            BoardEffect::RequestFrame => {}
        }
    }
}

fn log_store_warning(state: &mut BoardState, message: String) {
    state.logs.append(LogEntry {
        seq: 0,
        level: LogLevel::Warn,
        source: LogSource::Store,
        message,
    });
}

fn handle_key_event(key: event::KeyEvent, state: &mut BoardState) -> KeyHandlerResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') => return KeyHandlerResult::Exit,
            KeyCode::Char('c') => {
                // Ctrl+C is a copy attempt while the description is being
                // edited; anywhere else it keeps its usual exit meaning.
                if !state.alert_active()
                    && state.pane == FocusPane::Form
                    && state.form.focused() == FormField::Description
                {
                    return KeyHandlerResult::Continue(user(state, UserAction::ClipboardCopy));
                }
                return KeyHandlerResult::Exit;
            }
            KeyCode::Char('x') => {
                return KeyHandlerResult::Continue(user(state, UserAction::ClipboardCut));
            }
            KeyCode::Char('v') => {
                return KeyHandlerResult::Continue(user(
                    state,
                    UserAction::ClipboardPaste(String::new()),
                ));
            }
            KeyCode::Char('t') => {
                return KeyHandlerResult::Continue(user(state, UserAction::CycleTheme));
            }
            _ => {}
        }
    }

    if state.alert_active() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                KeyHandlerResult::Continue(user(state, UserAction::DismissAlert))
            }
            _ => KeyHandlerResult::Continue(Vec::new()),
        };
    }

    match state.pane {
        FocusPane::Form => KeyHandlerResult::Continue(handle_form_keys(key, state)),
        FocusPane::Cards => handle_card_keys(key, state),
    }
}

fn handle_form_keys(key: event::KeyEvent, state: &mut BoardState) -> Vec<BoardEffect> {
    match key.code {
        KeyCode::Tab => user(state, UserAction::FocusNextField),
        KeyCode::BackTab => user(state, UserAction::FocusPrevField),
        KeyCode::Enter => user(state, UserAction::SubmitForm),
        KeyCode::Esc => user(state, UserAction::TogglePane),
        KeyCode::Backspace => match state.form.focused() {
            FormField::Description => user(state, UserAction::DescriptionBackspace),
            FormField::FromDate | FormField::ToDate => user(state, UserAction::DateBackspace),
            _ => Vec::new(),
        },
        KeyCode::Up | KeyCode::Down => match state.form.focused() {
            FormField::AssignedTo => user(state, UserAction::CycleAssignee),
            FormField::Priority => user(state, UserAction::CyclePriority),
            _ => Vec::new(),
        },
        KeyCode::Char(ch) => match state.form.focused() {
            FormField::Description => user(state, UserAction::DescriptionInput(ch)),
            FormField::FromDate | FormField::ToDate => user(state, UserAction::DateInput(ch)),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn handle_card_keys(key: event::KeyEvent, state: &mut BoardState) -> KeyHandlerResult {
    let selected_id = state.selected_story().map(|story| story.id);
    let effects = match key.code {
        KeyCode::Esc | KeyCode::Tab => user(state, UserAction::TogglePane),
        KeyCode::Up | KeyCode::Char('k') => user(state, UserAction::SelectPrevCard),
        KeyCode::Down | KeyCode::Char('j') => user(state, UserAction::SelectNextCard),
        KeyCode::Char('c') => match selected_id {
            Some(id) => user(state, UserAction::CloseStory(id)),
            None => Vec::new(),
        },
        KeyCode::Char('d') | KeyCode::Delete => match selected_id {
            Some(id) => user(state, UserAction::DeleteStory(id)),
            None => Vec::new(),
        },
        KeyCode::Char('q') => return KeyHandlerResult::Exit,
        _ => Vec::new(),
    };
    KeyHandlerResult::Continue(effects)
}

fn user(state: &mut BoardState, action: UserAction) -> Vec<BoardEffect> {
    reduce(state, BoardAction::User(action))
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    warning: Color,
    danger: Color,
    muted: Color,
    border: Color,
    panel_bg: Color,
    selected_bg: Color,
}

fn palette_for(theme: AccentTheme) -> UiPalette {
    match theme {
        AccentTheme::Ocean => UiPalette {
            accent: Color::Blue,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::DarkGray,
            border: Color::Gray,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(16, 32, 54),
        },
        AccentTheme::Ember => UiPalette {
            accent: Color::LightRed,
            warning: Color::LightYellow,
            danger: Color::Red,
            muted: Color::Gray,
            border: Color::LightRed,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(48, 16, 8),
        },
        AccentTheme::Meadow => UiPalette {
            accent: Color::LightGreen,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::Gray,
            border: Color::LightGreen,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(8, 36, 12),
        },
        AccentTheme::Orchid => UiPalette {
            accent: Color::Magenta,
            warning: Color::Yellow,
            danger: Color::LightRed,
            muted: Color::Gray,
            border: Color::Magenta,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(44, 8, 44),
        },
        AccentTheme::Slate => UiPalette {
            accent: Color::White,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::DarkGray,
            border: Color::Gray,
            panel_bg: Color::Black,
            selected_bg: Color::DarkGray,
        },
    }
}

fn draw(f: &mut ratatui::Frame, state: &BoardState) {
    let palette = palette_for(state.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0], state, palette);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(chunks[1]);

    render_form(f, main[0], state, palette);
    render_cards(f, main[1], state, palette);
    render_footer(f, chunks[2], state, palette);
    render_alert(f, state, palette);
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &BoardState, palette: UiPalette) {
    let open = state
        .stories
        .iter()
        .filter(|story| story.status == StoryStatus::Open)
        .count();
    let closed = state.stories.len() - open;

    let line = Line::from(vec![
        Span::styled(
            "Storyboard",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{open} open / {closed} closed"),
            Style::default().fg(palette.muted),
        ),
        Span::raw("  "),
        Span::styled(
            format!("theme: {}", state.theme.label()),
            Style::default().fg(palette.muted),
        ),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );
    f.render_widget(header, area);
}

fn field_block(title: &'static str, focused: bool, palette: UiPalette) -> Block<'static> {
    let border = if focused { palette.accent } else { palette.border };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_form(f: &mut ratatui::Frame, area: Rect, state: &BoardState, palette: UiPalette) {
    let in_form = state.pane == FocusPane::Form;
    let focused = |field: FormField| in_form && state.form.focused() == field;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let description = Paragraph::new(state.form.description.as_str())
        .wrap(Wrap { trim: false })
        .block(field_block(
            "Description",
            focused(FormField::Description),
            palette,
        ));
    f.render_widget(description, rows[0]);

    f.render_widget(counter_paragraph(&state.form.description, palette), rows[1]);

    let assigned = select_paragraph(
        state.form.assigned_to.map(|assignee| assignee.label()),
        palette,
    )
    .block(field_block(
        "Assigned to",
        focused(FormField::AssignedTo),
        palette,
    ));
    f.render_widget(assigned, rows[2]);

    let from = date_paragraph(&state.form.from_date.buffer, palette).block(field_block(
        "From date",
        focused(FormField::FromDate),
        palette,
    ));
    f.render_widget(from, rows[3]);

    let to = date_paragraph(&state.form.to_date.buffer, palette).block(field_block(
        "To date",
        focused(FormField::ToDate),
        palette,
    ));
    f.render_widget(to, rows[4]);

    let priority = select_paragraph(
        state.form.priority.map(|priority| priority.label()),
        palette,
    )
    .block(field_block(
        "Priority",
        focused(FormField::Priority),
        palette,
    ));
    f.render_widget(priority, rows[5]);
}

fn counter_paragraph(description: &str, palette: UiPalette) -> Paragraph<'static> {
    let style = if counter_warning(description) {
        Style::default()
            .fg(palette.danger)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    Paragraph::new(Span::styled(counter_text(description), style)).alignment(Alignment::Right)
}

fn select_paragraph(value: Option<&'static str>, palette: UiPalette) -> Paragraph<'static> {
    match value {
        Some(label) => Paragraph::new(label),
        None => Paragraph::new(Span::styled(
            "Up/Down to choose",
            Style::default().fg(palette.muted),
        )),
    }
}

fn date_paragraph(buffer: &str, palette: UiPalette) -> Paragraph<'static> {
    if buffer.is_empty() {
        Paragraph::new(Span::styled(
            "YYYY-MM-DD",
            Style::default().fg(palette.muted),
        ))
    } else {
        Paragraph::new(buffer.to_string())
    }
}

fn render_cards(f: &mut ratatui::Frame, area: Rect, state: &BoardState, palette: UiPalette) {
    let in_cards = state.pane == FocusPane::Cards;
    let border = if in_cards { palette.accent } else { palette.border };
    let block = Block::default()
        .title("Story List")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    if state.stories.is_empty() {
        let empty = Paragraph::new(Span::styled(
            EMPTY_LIST_MESSAGE,
            Style::default().fg(palette.muted),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, story) in state.stories.iter().enumerate() {
        let selected = in_cards && state.selected_card == Some(idx);
        lines.extend(card_lines(story, palette, selected));
    }

    let inner_height = area.height.saturating_sub(2);
    let scroll = scroll_offset(state.selected_card, inner_height);
    let cards = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(cards, area);
}

// Keeps the selected card inside the viewport without tracking exact
// wrapped heights; cards are CARD_HEIGHT lines tall before wrapping.
fn scroll_offset(selected: Option<usize>, viewport_height: u16) -> u16 {
    let Some(selected) = selected else {
        return 0;
    };
    let card_top = selected as u16 * CARD_HEIGHT;
    let card_bottom = card_top + CARD_HEIGHT;
    card_bottom.saturating_sub(viewport_height.max(CARD_HEIGHT))
}

fn card_lines(story: &Story, palette: UiPalette, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "▸ " } else { "  " };
    let header_style = if selected {
        Style::default().bg(palette.selected_bg)
    } else {
        Style::default()
    };
    let badge_style = match story.status {
        StoryStatus::Open => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
        StoryStatus::Closed => Style::default()
            .fg(palette.danger)
            .add_modifier(Modifier::BOLD),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{marker}#{}  ", story.id.0), header_style),
            Span::styled("Priority: ", header_style),
            Span::styled(
                story.priority.label(),
                header_style.add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("[{}]", story.status.label()), badge_style),
        ]),
        Line::from(format!("  Assigned to : {}", story.assigned_to.label())),
        Line::from(format!("  From Date: {}", format_date(story.from_date))),
        Line::from(format!("  To Date: {}", format_date(story.to_date))),
        Line::from(format!("  {}", story.description)),
    ];

    let mut actions = Vec::new();
    if story.status == StoryStatus::Open {
        actions.push(Span::styled(
            "  [c] Close",
            Style::default().fg(palette.accent),
        ));
    }
    actions.push(Span::styled(
        "  [d] Delete",
        Style::default().fg(palette.danger),
    ));
    lines.push(Line::from(actions));
    lines.push(Line::from(""));

    lines
}

fn render_footer(f: &mut ratatui::Frame, area: Rect, state: &BoardState, palette: UiPalette) {
    let hints = match state.pane {
        FocusPane::Form => {
            "Tab fields | Enter submit | Esc story list | Ctrl+T theme | Ctrl+Q quit"
        }
        FocusPane::Cards => "Up/Down select | c close | d delete | Esc form | q quit",
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(palette.muted))];
    if let Some(entry) = state.logs.last() {
        let style = match entry.level {
            LogLevel::Info => Style::default().fg(palette.muted),
            LogLevel::Warn => Style::default().fg(palette.warning),
            LogLevel::Error => Style::default().fg(palette.danger),
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(entry.message.clone(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_alert(f: &mut ratatui::Frame, state: &BoardState, palette: UiPalette) {
    let BoardOverlay::Alert { message, .. } = &state.overlay else {
        return;
    };

    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title("Notice")
        .borders(Borders::ALL)
        .style(Style::default().bg(palette.panel_bg).fg(Color::White))
        .border_style(Style::default().fg(palette.danger));
    let text = Paragraph::new(format!("{message}\n\n[Enter] OK"))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
