//! Keyboard input: a character stream from a reader thread and the key
//! events decoded from it.

mod keyboard;
mod listener;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use listener::KeyListener;
