use std::io::{Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::runtime::Handle;

use crate::api::{ApiClient, HttpMethod};
use crate::clipboard::{ClipboardWriter, copy_to_clipboard};
use crate::config::Settings;
use crate::debounce::Debouncer;
use crate::page::{ActionButton, KeyOutcome, PageBindings, SaveAction};
use crate::ui::app::{
    CLOSE_BUTTON, COPY_BUTTON, ConsoleState, SAVE_BUTTON, StatusLine, Validity,
    status_from_response, validate_document,
};
use crate::utils::format_date;

#[cfg(test)]
#[path = "display_test.rs"]
mod display_test;

type SharedState = Arc<Mutex<ConsoleState>>;

// ============================================================================
// TERMINAL CONSOLE
// ============================================================================

/// Edit the JSON document behind `endpoint` until Esc.
///
/// Blocks the calling thread; run it on `spawn_blocking` and pass the runtime
/// handle so async work can be driven from here.
pub fn run_console<W: ClipboardWriter>(
    runtime: Handle,
    api: ApiClient,
    clipboard: W,
    settings: &Settings,
    endpoint: &str,
) -> Result<()> {
    let document = runtime
        .block_on(api.get(endpoint))
        .with_context(|| format!("failed to load {endpoint}"))?;

    let state: SharedState = Arc::new(Mutex::new(ConsoleState::new(endpoint, &document)));
    let save_endpoint = settings
        .save_endpoint
        .clone()
        .unwrap_or_else(|| endpoint.to_string());

    let validator = {
        let state = Arc::clone(&state);
        Debouncer::with_handle(runtime.clone(), settings.debounce(), move |snapshot: String| {
            let validity = validate_document(&snapshot);
            lock(&state).apply_validation(&snapshot, validity);
        })
    };

    let buttons = [
        ActionButton::primary(SAVE_BUTTON),
        ActionButton::secondary(COPY_BUTTON),
        ActionButton::secondary(CLOSE_BUTTON).without_loading(),
    ];
    let save = save_action(runtime.clone(), api, save_endpoint, Arc::clone(&state));
    let bindings = PageBindings::init(&buttons, Some(save));

    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let session = Session {
        runtime,
        clipboard,
        state,
        validator,
        bindings,
        decimals: settings.byte_decimals,
    };
    session.run(&mut terminal)
}

/// Restores the terminal when dropped, on every exit path out of the session.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = restore_screen(&mut std::io::stdout()) {
            tracing::warn!(error = %e, "failed to restore the screen");
        }
    }
}

fn restore_screen(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, LeaveAlternateScreen, cursor::Show)
}

fn save_action(runtime: Handle, api: ApiClient, endpoint: String, state: SharedState) -> SaveAction {
    Box::new(move || {
        let text = lock(&state).buffer.clone();
        let document = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(document) => document,
            Err(e) => {
                lock(&state).status = Some(StatusLine::error(format!("Not saved, invalid JSON: {e}")));
                return;
            }
        };

        let status = match runtime.block_on(api.call(&endpoint, HttpMethod::Post, Some(&document))) {
            Ok(response) => {
                let now = chrono::Utc::now().to_rfc3339();
                lock(&state).last_saved = format_date(&now).ok();
                status_from_response(&response)
            }
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %endpoint, "save failed");
                StatusLine::error(format!("Save failed: {e}"))
            }
        };
        lock(&state).status = Some(status);
    })
}

fn lock(state: &SharedState) -> MutexGuard<'_, ConsoleState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Session<W> {
    runtime: Handle,
    clipboard: W,
    state: SharedState,
    validator: Debouncer<String>,
    bindings: PageBindings,
    decimals: i32,
}

impl<W: ClipboardWriter> Session<W> {
    fn run(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let state = lock(&self.state);
                draw(f, &state, self.decimals);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if lock(&self.state).should_quit {
                self.validator.cancel();
                return Ok(());
            }
        }
    }

    fn handle_key(&self, key: KeyEvent) {
        // Activating the save shortcut counts as a click on the save button.
        if self.bindings.handle_key(&key) == KeyOutcome::Handled {
            self.bindings.handle_click(SAVE_BUTTON);
            return;
        }

        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.bindings.handle_click(CLOSE_BUTTON);
                lock(&self.state).quit();
            }
            KeyCode::Char('c') if ctrl => lock(&self.state).quit(),
            KeyCode::Char('y') if ctrl => self.copy_buffer(),
            KeyCode::Enter => self.edit(|s| s.insert_char('\n')),
            KeyCode::Tab => self.edit(|s| s.insert_str("  ")),
            KeyCode::Backspace => self.edit(ConsoleState::backspace),
            KeyCode::Char(c) if !ctrl => self.edit(|s| s.insert_char(c)),
            _ => {}
        }
    }

    fn edit(&self, change: impl FnOnce(&mut ConsoleState)) {
        let snapshot = {
            let mut state = lock(&self.state);
            change(&mut state);
            state.buffer.clone()
        };
        self.validator.call(snapshot);
    }

    fn copy_buffer(&self) {
        self.bindings.handle_click(COPY_BUTTON);
        let text = lock(&self.state).buffer.clone();
        let copied = self
            .runtime
            .block_on(copy_to_clipboard(&self.clipboard, text));

        lock(&self.state).status = Some(if copied {
            StatusLine::info("Copied to clipboard")
        } else {
            StatusLine::error("Could not copy to clipboard")
        });
    }
}

fn draw(f: &mut Frame, state: &ConsoleState, decimals: i32) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Editor
            Constraint::Length(4), // Footer
        ])
        .split(f.area());

    let (validity_label, validity_color) = match &state.validity {
        Validity::Pending => ("editing", Color::Yellow),
        Validity::Valid => ("valid JSON", Color::Green),
        Validity::Invalid(_) => ("invalid JSON", Color::Red),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", state.endpoint),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" | {} ", state.size_label(decimals)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!(" {validity_label} "), Style::default().fg(validity_color)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);

    f.render_widget(header, chunks[0]);

    // Keep the tail of the buffer in view, since edits happen at the end.
    let visible = chunks[1].height.saturating_sub(2);
    let total = u16::try_from(state.buffer.split('\n').count()).unwrap_or(u16::MAX);
    let editor = Paragraph::new(state.buffer.as_str())
        .scroll((total.saturating_sub(visible), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Document ")
                .title_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        );

    f.render_widget(editor, chunks[1]);

    let status = match (&state.status, &state.validity) {
        (Some(status), _) => Span::styled(
            status.message.clone(),
            Style::default().fg(if status.is_error { Color::Red } else { Color::Green }),
        ),
        (None, Validity::Invalid(reason)) => {
            Span::styled(reason.clone(), Style::default().fg(Color::Red))
        }
        (None, _) => Span::raw(""),
    };
    let saved = state
        .last_saved
        .as_deref()
        .map(|at| format!("  (last saved {at})"))
        .unwrap_or_default();

    let footer = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" Ctrl+S ", Style::default().fg(Color::Cyan)),
            Span::raw("Save  "),
            Span::styled(" Ctrl+Y ", Style::default().fg(Color::Cyan)),
            Span::raw("Copy  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close "),
        ]),
        Line::from(vec![status, Span::styled(saved, Style::default().fg(Color::DarkGray))]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);

    f.render_widget(footer, chunks[2]);
}
