//! Raw mode terminal handling.
//!
//! Enters and leaves raw mode on Unix terminals through termios. Raw mode
//! turns off line buffering and echo so the editor sees every key as soon as
//! it is pressed.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios and ioctl
//! functions.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// How `tcsetattr` applies a change. macOS applies after draining output and
/// discarding pending input; other Unix systems apply immediately.
#[cfg(target_os = "macos")]
const APPLY_ACTION: libc::c_int = libc::TCSAFLUSH;
#[cfg(not(target_os = "macos"))]
const APPLY_ACTION: libc::c_int = libc::TCSANOW;

/// Screen size used when neither the terminal nor the environment reports one.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Saved terminal state for restoration.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Enter raw mode on the given file descriptor.
    ///
    /// Returns a guard that restores the terminal state when dropped.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;
        make_raw(&mut raw);
        set_termios(fd, &raw)?;

        Ok(Self { fd, original })
    }

    /// Restore the original terminal state.
    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Clear the termios flags that stand between a keypress and the editor.
///
/// Output post-processing stays on so `\n` still returns the carriage.
fn make_raw(termios: &mut libc::termios) {
    // Input: no CR to NL translation, no ^S/^Q flow control.
    termios.c_iflag &= !(libc::ICRNL | libc::IXON);

    // Local: no echo, no canonical line editing, no ^V, no ^C/^Z signals.
    termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

    // Every read blocks until at least one byte arrives.
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;
}

/// Enter raw mode for stdin.
///
/// Returns a guard that restores the terminal when dropped.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size as `(columns, rows)`.
///
/// Returns an error if the size cannot be determined or is reported as zero.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Terminal size with fallbacks: the `TIOCGWINSZ` ioctl, then the `COLUMNS`
/// and `LINES` environment variables, then [`DEFAULT_SIZE`].
#[must_use]
pub fn terminal_size_or_default() -> (u16, u16) {
    terminal_size().unwrap_or_else(|_| {
        size_from_env(
            std::env::var("COLUMNS").ok().as_deref(),
            std::env::var("LINES").ok().as_deref(),
        )
        .unwrap_or(DEFAULT_SIZE)
    })
}

/// Parse `COLUMNS`/`LINES` values; both must be positive integers.
fn size_from_env(columns: Option<&str>, lines: Option<&str>) -> Option<(u16, u16)> {
    let cols = columns?.trim().parse::<u16>().ok()?;
    let rows = lines?.trim().parse::<u16>().ok()?;
    (cols > 0 && rows > 0).then_some((cols, rows))
}

/// Get termios attributes.
fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

/// Set termios attributes.
fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, APPLY_ACTION, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::io::FromRawFd;

    #[test]
    fn test_is_tty_pipe_returns_false() {
        let (read_fd, write_fd) = create_pipe().expect("Failed to create pipe");
        assert!(!is_tty(&read_fd), "Read end of pipe should not be TTY");
        assert!(!is_tty(&write_fd), "Write end of pipe should not be TTY");
    }

    #[test]
    fn test_is_tty_file_returns_false() {
        let file = tempfile::tempfile().expect("Failed to create temp file");
        assert!(!is_tty(&file), "Regular file should not be TTY");
    }

    #[test]
    fn test_terminal_size_valid_dimensions() {
        // Might fail without a TTY, but must never report zero.
        if let Ok((cols, rows)) = terminal_size() {
            assert!(cols > 0);
            assert!(rows > 0);
        }
    }

    #[test]
    fn test_terminal_size_or_default_is_positive() {
        let (cols, rows) = terminal_size_or_default();
        assert!(cols > 0 && rows > 0);
    }

    #[test]
    fn test_size_from_env() {
        assert_eq!(size_from_env(Some("120"), Some("40")), Some((120, 40)));
        assert_eq!(size_from_env(Some(" 80 "), Some("24\n")), Some((80, 24)));
        assert_eq!(size_from_env(Some("0"), Some("24")), None);
        assert_eq!(size_from_env(Some("wide"), Some("24")), None);
        assert_eq!(size_from_env(None, Some("24")), None);
        assert_eq!(size_from_env(Some("80"), None), None);
    }

    #[test]
    fn test_make_raw_clears_line_discipline() {
        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        termios.c_iflag = libc::ICRNL | libc::IXON | libc::BRKINT;
        termios.c_lflag = libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;
        termios.c_oflag = libc::OPOST;

        make_raw(&mut termios);

        assert_eq!(termios.c_iflag & (libc::ICRNL | libc::IXON), 0);
        assert_ne!(termios.c_iflag & libc::BRKINT, 0, "unrelated flags survive");
        assert_eq!(termios.c_lflag, 0);
        assert_ne!(termios.c_oflag & libc::OPOST, 0);
        assert_eq!(termios.c_cc[libc::VMIN], 1);
        assert_eq!(termios.c_cc[libc::VTIME], 0);
    }

    #[test]
    fn test_raw_mode_guard_new_on_pipe_fails() {
        let (read_fd, _write_fd) = create_pipe().expect("Failed to create pipe");
        assert!(RawModeGuard::new(&read_fd).is_err());
    }

    #[test]
    fn test_get_termios_with_invalid_fd_fails() {
        assert!(get_termios(-1).is_err());
    }

    #[test]
    fn test_set_termios_with_invalid_fd_fails() {
        let termios: libc::termios = unsafe { std::mem::zeroed() };
        assert!(set_termios(-1, &termios).is_err());
    }

    /// Create a pipe and return both ends as Files for RAII cleanup
    fn create_pipe() -> io::Result<(File, File)> {
        let mut fds = [0i32; 2];
        let result = unsafe { libc::pipe(fds.as_mut_ptr()) };
        if result == -1 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: pipe() succeeded, so fds are valid
        let read_file = unsafe { File::from_raw_fd(fds[0]) };
        let write_file = unsafe { File::from_raw_fd(fds[1]) };
        Ok((read_file, write_file))
    }
}
