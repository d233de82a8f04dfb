//! Record-and-replay demo application
//!
//! Run with no arguments to open a window and record everything you do
//! in it; the trace lands in the configured trace file when the window
//! closes (or Escape is pressed). Run with `--replay` to pump the same
//! trace through a headless window and print the session journal the
//! inputs produce. A faithful abstraction prints the same journal both
//! times.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use platform_shell::prelude::*;

/// What happened over one session, from the handler's point of view
#[derive(Debug, Default, Clone, PartialEq)]
struct Journal {
    traceable_events: usize,
    key_presses: usize,
    mouse_moves: usize,
    button_presses: usize,
    last_cursor: Point,
    finished: bool,
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "session journal")?;
        writeln!(f, "  traceable events: {}", self.traceable_events)?;
        writeln!(f, "  key presses:      {}", self.key_presses)?;
        writeln!(f, "  mouse moves:      {}", self.mouse_moves)?;
        writeln!(f, "  button presses:   {}", self.button_presses)?;
        write!(f, "  cursor ended at:  {}", self.last_cursor)
    }
}

/// Event handler that accumulates a [`Journal`]
///
/// Counts only traceable events, so a live session and its replay are
/// directly comparable.
#[derive(Default)]
struct JournalHandler {
    journal: Journal,
}

impl EventHandler for JournalHandler {
    fn on_event(&mut self, event: &PlatformEvent) -> bool {
        if is_traceable(&event.kind) {
            self.journal.traceable_events += 1;
        }
        match &event.kind {
            EventKind::KeyPress { key, .. } => {
                self.journal.key_presses += 1;
                if *key == Key::Escape {
                    self.journal.finished = true;
                }
            }
            EventKind::MouseMove { pos } => {
                self.journal.mouse_moves += 1;
                self.journal.last_cursor = *pos;
            }
            EventKind::MouseButtonPress { .. } => self.journal.button_presses += 1,
            EventKind::WindowClose => self.journal.finished = true,
            _ => {}
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Record,
    Replay,
}

struct ReplayShell {
    mode: Mode,
    config_path: Option<PathBuf>,
}

impl ReplayShell {
    fn new(mode: Mode, config_path: Option<PathBuf>) -> Self {
        Self { mode, config_path }
    }

    fn load_config(&self) -> Result<AppConfig, Box<dyn std::error::Error>> {
        let config = match &self.config_path {
            Some(path) => AppConfig::load_from_file(path)?,
            None => AppConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config = self.load_config()?;
        let journal = match self.mode {
            Mode::Record => record_session(&config)?,
            Mode::Replay => replay_session(&config)?,
        };
        println!("{journal}");
        Ok(())
    }
}

/// Open a real window, record the session, save the trace on exit
fn record_session(config: &AppConfig) -> Result<Journal, Box<dyn std::error::Error>> {
    let recorder = EventTraceRecorder::new_shared();
    recorder.borrow_mut().start();

    let handler = Rc::new(RefCell::new(JournalHandler::default()));
    let tap = RecordingHandler::new(Rc::clone(&recorder), Rc::clone(&handler));

    let mut platform = GlfwPlatform::new()?;
    let mut window = platform.create_window(&config.window, Box::new(tap))?;

    let mut context = match &config.window.gl {
        Some(gl) => window.create_opengl_context(gl),
        None => None,
    };

    log::info!("Recording session; close the window or press Escape to finish");
    while !window.close_requested() && !handler.borrow().journal.finished {
        platform.poll_events();
        window.dispatch_pending_events();
        match &mut context {
            Some(context) => context.swap_buffers(),
            // Nothing to block on without a context.
            None => std::thread::sleep(std::time::Duration::from_millis(4)),
        }
    }

    let saved = recorder.borrow_mut().save(&config.trace_path)?;
    log::info!(
        "Saved {saved} events to {} after {:.1}s",
        config.trace_path.display(),
        platform.time()
    );
    Ok(handler.borrow().journal.clone())
}

/// Pump a saved trace through a headless window
fn replay_session(config: &AppConfig) -> Result<Journal, Box<dyn std::error::Error>> {
    let handler = Rc::new(RefCell::new(JournalHandler::default()));

    let mut platform = NullPlatform::new();
    let mut window = platform.create_window(&config.window, Box::new(Rc::clone(&handler)));

    let mut player = EventTracePlayer::new();
    let loaded = player.load(&config.trace_path, window.id())?;
    log::info!("Replaying {loaded} events from {}", config.trace_path.display());

    while let Some(event) = player.next_event() {
        window.inject_event(&event);
    }
    log::info!("Replay finished in {:.3}s", platform.time());

    Ok(handler.borrow().journal.clone())
}

fn parse_args() -> Result<(Mode, Option<PathBuf>), String> {
    let mut mode = Mode::Record;
    let mut config_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--record" => mode = Mode::Record,
            "--replay" => mode = Mode::Replay,
            "--config" => {
                let path = args.next().ok_or("--config needs a file argument")?;
                config_path = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok((mode, config_path))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook for better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info:?}");

        if let Some(location) = panic_info.location() {
            eprintln!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if let Some(payload) = panic_info.payload().downcast_ref::<&str>() {
            eprintln!("Panic message: {payload}");
        } else if let Some(payload) = panic_info.payload().downcast_ref::<String>() {
            eprintln!("Panic message: {payload}");
        }
    }));

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let (mode, config_path) = match parse_args() {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: replay_app [--config <file>] [--record | --replay]");
            return Err(message.into());
        }
    };

    log::info!("Starting replay shell in {mode:?} mode");

    // Wrap in catch_unwind to handle panics gracefully
    let result = std::panic::catch_unwind(|| {
        let app = ReplayShell::new(mode, config_path);
        app.run()
    });

    match result {
        Ok(Ok(())) => {
            log::info!("Session finished successfully");
            Ok(())
        }
        Ok(Err(e)) => {
            log::error!("Application error: {e}");
            Err(e)
        }
        Err(panic) => {
            log::error!("Application panicked: {panic:?}");
            Err("Application panicked during execution".into())
        }
    }
}
