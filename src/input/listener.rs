//! Reader thread turning raw input bytes into a stream of characters.
//!
//! ```text
//! Reader Thread                       Main Thread
//! -------------                       -----------
//! read(source, 4 bytes)
//! decode first char
//! send Ok(char)        ─────────────▶ recv
//! ...
//! read returns 0 / error
//! send Err(e), exit    ─────────────▶ recv, stream ends
//! ```

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};

/// Bytes requested per read; one UTF-8 scalar at most.
const READ_CHUNK: usize = 4;

/// Spawns a thread that reads from a source and sends one character per read.
#[derive(Debug)]
pub struct KeyListener<R> {
    source: Option<R>,
}

impl<R: Read + Send + 'static> Default for KeyListener<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read + Send + 'static> KeyListener<R> {
    /// A listener without a source; [`KeyListener::listen`] fails until one
    /// is set.
    #[must_use]
    pub fn new() -> Self {
        Self { source: None }
    }

    #[must_use]
    pub fn with_source(source: R) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Install a new source, for example to listen again after `listen`
    /// consumed the previous one.
    pub fn set_source(&mut self, source: R) {
        self.source = Some(source);
    }

    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Move the source onto a reader thread and return the receiving end.
    ///
    /// Each physical read yields one item: the first character of the bytes
    /// read, or U+FFFD if they do not start with valid UTF-8. A read of zero
    /// bytes is reported as [`io::ErrorKind::UnexpectedEof`]. The stream ends
    /// after the first error.
    pub fn listen(&mut self) -> Result<Receiver<io::Result<char>>> {
        let source = self.source.take().ok_or(Error::EmptyInputSource)?;
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("red-input".to_string())
            .spawn(move || read_loop(source, &tx))?;
        Ok(rx)
    }
}

fn read_loop<R: Read>(mut source: R, tx: &Sender<io::Result<char>>) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let item = match source.read(&mut buf) {
            Ok(0) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input source closed",
            )),
            Ok(n) => Ok(first_char(&buf[..n])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => Err(err),
        };
        let done = item.is_err();
        if let Err(err) = &item {
            emit_log(LogLevel::Debug, &format!("input stream ending: {err}"));
        }
        if tx.send(item).is_err() || done {
            return;
        }
    }
}

/// First character of `bytes`, or U+FFFD when they don't start with one.
fn first_char(bytes: &[u8]) -> char {
    let valid = match std::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => std::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
    };
    valid.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}
