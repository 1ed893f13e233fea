//! Terminal lifecycle and the main render/event loop.

use std::io;

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::theme::Palette;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::RunnerName;
use crate::domain::models::OUTPUT_PLACEHOLDER;
use crate::domain::services::ActionsService;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;
use crate::domain::services::FocusedPane;
use crate::infrastructure::clients::RunnerManager;
use crate::infrastructure::stores::FilePreferenceStore;

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

/// Restores the terminal from inside a panic hook, where no terminal handle
/// is available.
pub fn destruct_terminal_for_panic() {
    disable_raw_mode().ok();
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .ok();
    execute!(io::stdout(), crossterm::cursor::Show).ok();
}

pub async fn start_loop() -> Result<()> {
    let mut app_state = AppState::new(AppStateProps {
        runner_client: RunnerManager::get(RunnerName::default())?,
        preferences: Box::<FilePreferenceStore>::default(),
    })
    .await?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let mut events_service = EventsService::new(event_rx);

    let actions_runner_client = RunnerManager::get(RunnerName::default())?;
    tokio::spawn(async move {
        if let Err(err) =
            ActionsService::start(actions_runner_client, event_tx, &mut action_rx).await
        {
            tracing::error!(error = ?err, "actions service stopped");
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The loop result is settled before teardown so a failing draw or send
    // never leaves the terminal in raw mode on the alternate screen.
    let loop_result = run_loop(
        &mut terminal,
        &mut app_state,
        &mut events_service,
        &action_tx,
    )
    .await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return loop_result;
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    events_service: &mut EventsService,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app_state))?;

        match events_service.next().await? {
            Event::KeyboardCTRLC => {
                // Quitting aborts an in-flight exchange rather than leaking it.
                if app_state.waiting_for_runner {
                    action_tx.send(Action::RunnerAbort())?;
                }
                return Ok(());
            }
            event => handle_event(app_state, action_tx, event).await?,
        }
    }
}

async fn handle_event(
    app_state: &mut AppState<'_>,
    action_tx: &mpsc::UnboundedSender<Action>,
    event: Event,
) -> Result<()> {
    // The confirm modal swallows everything except its answer keys.
    if app_state.confirm_reset {
        match event {
            Event::KeyboardCharInput(Input {
                key: Key::Char('y'),
                ..
            }) => app_state.resolve_reset(true),
            Event::KeyboardCharInput(Input {
                key: Key::Char('n'),
                ..
            })
            | Event::KeyboardEsc => app_state.resolve_reset(false),
            _ => {}
        }
        return Ok(());
    }

    match event {
        Event::KeyboardCharInput(input) => app_state.handle_editor_input(input),
        Event::KeyboardCTRLC => {} // Handled by the caller.
        Event::KeyboardCTRLN => app_state.request_reset(),
        Event::KeyboardCTRLR => {
            if let Some(job) = app_state.begin_run() {
                action_tx.send(Action::RunnerRequest(job))?;
            }
        }
        Event::KeyboardCTRLT => app_state.toggle_theme().await,
        Event::KeyboardEsc => app_state.focus_next(),
        Event::KeyboardPaste(text) => app_state.handle_paste(text),
        Event::KeyboardTab => app_state.insert_tab(),
        Event::RunnerDone(outcome) => app_state.finish_run(outcome),
        Event::UIFontLarger => app_state.font_larger().await,
        Event::UIFontSmaller => app_state.font_smaller().await,
        Event::UIScrollDown => app_state.scroll_output_down(1),
        Event::UIScrollUp => app_state.scroll_output_up(1),
        Event::UITick => {}
    }

    return Ok(());
}

fn render(frame: &mut Frame<'_>, app_state: &mut AppState<'_>) {
    let palette = Palette::for_theme(app_state.theme);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(panes[1]);

    render_source_pane(frame, panes[0], app_state, palette);
    render_stdin_pane(frame, right[0], app_state, palette);
    render_output_pane(frame, right[1], app_state, palette);
    render_status_bar(frame, layout[1], app_state, palette);

    if app_state.confirm_reset {
        render_confirm_modal(frame, frame.area(), palette);
    }
}

fn pane_block(title: &'static str, focused: bool, palette: &Palette) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(palette.border_focused)
    } else {
        Style::default().fg(palette.border_normal)
    };

    return Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
}

fn render_source_pane(
    frame: &mut Frame<'_>,
    area: Rect,
    app_state: &mut AppState<'_>,
    palette: &Palette,
) {
    let focused = app_state.focused_pane == FocusedPane::Source;

    app_state
        .source_editor
        .set_block(pane_block(" Code Editor ", focused, palette));
    app_state.source_editor.set_style(
        Style::default()
            .fg(palette.foreground)
            .bg(palette.background),
    );
    app_state.source_editor.set_cursor_line_style(Style::default());
    app_state.source_editor.set_cursor_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });

    frame.render_widget(&app_state.source_editor, area);
}

fn render_stdin_pane(
    frame: &mut Frame<'_>,
    area: Rect,
    app_state: &mut AppState<'_>,
    palette: &Palette,
) {
    let focused = app_state.focused_pane == FocusedPane::Stdin;

    app_state
        .stdin_editor
        .set_block(pane_block(" Program Input ", focused, palette));
    app_state.stdin_editor.set_style(
        Style::default()
            .fg(palette.foreground)
            .bg(palette.background),
    );
    app_state.stdin_editor.set_cursor_line_style(Style::default());
    app_state.stdin_editor.set_cursor_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });

    frame.render_widget(&app_state.stdin_editor, area);
}

fn render_output_pane(
    frame: &mut Frame<'_>,
    area: Rect,
    app_state: &AppState<'_>,
    palette: &Palette,
) {
    let focused = app_state.focused_pane == FocusedPane::Output;

    let (text, style) = if app_state.output.is_empty() {
        (OUTPUT_PLACEHOLDER, Style::default().fg(palette.comment))
    } else if app_state.last_run_failed {
        (app_state.output.as_str(), Style::default().fg(palette.error))
    } else if app_state.waiting_for_runner {
        (
            app_state.output.as_str(),
            Style::default()
                .fg(palette.comment)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        (
            app_state.output.as_str(),
            Style::default().fg(palette.foreground),
        )
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(pane_block(" Output ", focused, palette))
        .wrap(Wrap { trim: false })
        .scroll((app_state.output_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    app_state: &AppState<'_>,
    palette: &Palette,
) {
    let state_span = if app_state.waiting_for_runner {
        Span::styled(
            " Running... ",
            Style::default()
                .bg(palette.accent)
                .fg(palette.background)
                .add_modifier(Modifier::BOLD),
        )
    } else if app_state.last_run_failed {
        Span::styled(
            " Error ",
            Style::default()
                .bg(palette.error)
                .fg(palette.background)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " Ready ",
            Style::default()
                .bg(palette.success)
                .fg(palette.background)
                .add_modifier(Modifier::BOLD),
        )
    };

    let left = Line::from(vec![
        state_span,
        Span::styled(
            format!(" {} mode | {}px ", app_state.theme, app_state.font_size),
            Style::default()
                .bg(palette.status_bar_bg)
                .fg(palette.foreground),
        ),
    ]);

    let right = Line::from(Span::styled(
        " ^R Run  ^N Reset  ^T Theme  F9/F10 Font  Tab Indent  Esc Focus  ^C Quit ",
        Style::default()
            .bg(palette.status_bar_bg)
            .fg(palette.comment),
    ));

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    frame.render_widget(
        Paragraph::new(left)
            .style(Style::default().bg(palette.status_bar_bg))
            .alignment(Alignment::Left),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(right)
            .style(Style::default().bg(palette.status_bar_bg))
            .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_confirm_modal(frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let width = area.width.min(40);
    let height = area.height.min(5);
    let modal = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border_focused))
        .title(Span::styled(
            " Reset ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from("Reset code to default?"),
        Line::from(""),
        Line::from(Span::styled(
            "y = yes, n = no",
            Style::default().fg(palette.comment),
        )),
    ];

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines)
            .style(
                Style::default()
                    .fg(palette.foreground)
                    .bg(palette.background),
            )
            .alignment(Alignment::Center)
            .block(block),
        modal,
    );
}
