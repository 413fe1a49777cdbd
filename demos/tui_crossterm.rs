//! Terminal UI example using crossterm and ratatui.
//!
//! This example demonstrates how to host otp_mini in a terminal application:
//! the app plays the role of the per-field input elements, forwards their
//! events, and applies the commands the engine returns.
//! Run with: cargo run --example tui_crossterm
//! Engine logs go to `otp_demo.log` (filter with RUST_LOG).

use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode as CKeyCode,
        KeyEvent as CKeyEvent, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use otp_mini::{
    Command, DebounceDelay, Engine, InputEvent, KeyCode, OtpConfig, Segment, StateFlags,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::collections::VecDeque;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const LOG_LINES: usize = 8;

struct App {
    engine: Engine,
    /// Field holding terminal focus, as the host sees it.
    active: Option<usize>,
    flags: StateFlags,
    log: VecDeque<String>,
}

impl App {
    fn new() -> Self {
        let engine = Engine::new(OtpConfig {
            format: "xxx-xxx".to_string(),
            required: true,
            auto_submit: true,
            debounce: true,
            debounce_delay: DebounceDelay::from_millis(300),
            ..OtpConfig::default()
        });
        let mut app = Self {
            engine,
            active: None,
            flags: StateFlags::empty(),
            log: VecDeque::with_capacity(LOG_LINES),
        };
        let commands = app.engine.mount();
        app.apply(commands);
        app
    }

    fn handle_key(&mut self, key: CKeyEvent) {
        let now = Instant::now();
        let commands = match key.code {
            CKeyCode::Esc => self.engine.clear(),
            CKeyCode::Tab => self.engine.focus(),
            code => match (self.active, convert_key(code)) {
                (Some(index), Some(HostInput::Typed(c))) => self.engine.handle_event(
                    InputEvent::Input {
                        index,
                        data: c.to_string(),
                    },
                    now,
                ),
                (Some(index), Some(HostInput::Key(key))) => {
                    self.engine
                        .handle_event(InputEvent::KeyDown { index, key }, now)
                }
                _ => vec![],
            },
        };
        self.apply(commands);
    }

    fn handle_paste(&mut self, text: String) {
        let commands = self
            .engine
            .handle_event(InputEvent::Paste { text }, Instant::now());
        self.apply(commands);
    }

    fn tick(&mut self) {
        let commands = self.engine.poll(Instant::now());
        self.apply(commands);
    }

    /// Moves terminal focus the way a browser would: blur, then focus.
    fn move_focus(&mut self, index: usize) {
        let now = Instant::now();
        let mut commands = Vec::new();
        if let Some(previous) = self.active {
            commands.extend(
                self.engine
                    .handle_event(InputEvent::Blur { index: previous }, now),
            );
        }
        self.active = Some(index);
        commands.extend(self.engine.handle_event(InputEvent::Focus { index }, now));
        self.apply(commands);
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for cmd in commands {
            match cmd {
                Command::FocusField(index) => self.move_focus(index),
                Command::Trigger(event) => {
                    let line = serde_json_line(&event);
                    if self.log.len() == LOG_LINES {
                        self.log.pop_front();
                    }
                    self.log.push_back(line);
                }
                Command::AddState(flag) => self.flags.insert(flag),
                Command::RemoveState(flag) => self.flags.remove(flag),
                // Fields are drawn from the snapshot, so there is nothing to restore.
                Command::SetFieldText { .. } | Command::PreventDefault => {}
            }
        }
    }
}

enum HostInput {
    Typed(char),
    Key(KeyCode),
}

fn convert_key(code: CKeyCode) -> Option<HostInput> {
    match code {
        CKeyCode::Char(c) => Some(HostInput::Typed(c)),
        CKeyCode::Backspace => Some(HostInput::Key(KeyCode::Backspace)),
        CKeyCode::Left => Some(HostInput::Key(KeyCode::ArrowLeft)),
        CKeyCode::Right => Some(HostInput::Key(KeyCode::ArrowRight)),
        _ => None,
    }
}

fn serde_json_line(event: &otp_mini::TriggerEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|_| event.name().to_string())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let snapshot = app.engine.snapshot();

    // Field row
    let mut spans = Vec::new();
    for segment in app.engine.format().segments() {
        match *segment {
            Segment::Field { index, .. } => {
                let ch = snapshot.field_values[index].unwrap_or('_');
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                if app.active == Some(index) {
                    style = style.bg(Color::Blue);
                }
                if !snapshot.is_valid {
                    style = style.fg(Color::Red);
                }
                spans.push(Span::styled(format!(" {ch} "), style));
            }
            Segment::Separator { ch, .. } => {
                spans.push(Span::styled(
                    format!(" {ch} "),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }
    let fields = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("otp_mini demo"));
    f.render_widget(fields, chunks[0]);

    // Status line
    let states: Vec<&str> = app.flags.state_names().collect();
    let status = format!(
        "value: {:<8} states: [{}]{}",
        snapshot.value,
        states.join(", "),
        if snapshot.is_debouncing { "  (sending...)" } else { "" }
    );
    let status = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    // Trigger log
    let lines: Vec<Line> = app.log.iter().map(|l| Line::from(l.as_str())).collect();
    let log = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("events (Esc clears, Tab focuses, Ctrl+C quits)"),
    );
    f.render_widget(log, chunks[2]);
}

fn main() -> Result<(), io::Error> {
    let log_file = File::create("otp_demo.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("otp_mini=debug")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = app
            .engine
            .next_deadline()
            .map_or(Duration::from_millis(250), |d| {
                d.saturating_duration_since(Instant::now())
            });

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.code == CKeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    app.handle_key(key);
                }
                Event::Paste(text) => app.handle_paste(text),
                _ => {}
            }
        }

        app.tick();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    Ok(())
}
