//! `red` - modal terminal text editor
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin red
//! cargo run --bin red -- notes.txt
//! cargo run --bin red -- --no-alt-screen --log /tmp/red.log notes.txt
//! ```
//!
//! Press `q` in normal mode or Ctrl+Q anywhere to quit. Edits are never
//! written back to disk.

use red::config::HELP_TEXT;
use red::event::set_document_callback;
use red::{
    Config, Document, Error, Flow, KeyEvent, KeyListener, LogLevel, ParseResult, Screen, Session,
    Terminal, emit_log, is_tty, set_log_callback,
};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Controlling terminal, read for keys and switched into raw mode.
const TTY_PATH: &str = "/dev/tty";

fn main() {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            if let Err(err) = run(&config) {
                eprintln!("red: {err}");
                std::process::exit(1);
            }
        }
        ParseResult::Help => print!("{HELP_TEXT}"),
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn run(config: &Config) -> red::Result<()> {
    if let Some(path) = &config.log_path {
        install_log_file(path)?;
    }

    let stdout = io::stdout();
    if !is_tty(&stdout) {
        return Err(Error::Io(io::Error::other("stdout is not a terminal")));
    }

    let original = config.original_text()?;
    let tty = OpenOptions::new().read(true).write(true).open(TTY_PATH)?;

    let mut terminal = Terminal::new(stdout, config.screen_size());
    terminal.enter_raw_mode(&tty)?;
    if config.use_alt_screen {
        terminal.enter_alt_screen()?;
    }
    terminal.clear()?;
    let mut screen = Screen::new(terminal);

    let mut session = Session::new(Document::new(original));
    let keys = KeyListener::with_source(tty.try_clone()?).listen()?;
    emit_log(
        LogLevel::Info,
        &format!("session started, {} bytes", session.document().len()),
    );

    session.render(&mut screen)?;
    for key in keys {
        let key = KeyEvent::from_char(key?);
        match session.handle_key(key) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err @ Error::Io(_)) => return Err(err),
            Err(err) => emit_log(LogLevel::Warn, &format!("{key:?}: {err}")),
        }
        session.render(&mut screen)?;
    }

    emit_log(
        LogLevel::Info,
        &format!("session ended, {} edits", session.document().undo_depth()),
    );
    Ok(())
}

/// Route log lines and document events to `path`, appending.
fn install_log_file(path: &Path) -> io::Result<()> {
    let file: Mutex<File> = Mutex::new(OpenOptions::new().create(true).append(true).open(path)?);
    set_log_callback(move |level, msg| {
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "[{level}] {msg}");
        }
    });
    set_document_callback(|event| emit_log(LogLevel::Debug, &format!("{event:?}")));
    Ok(())
}
