//! Fuzz target for key decoding and the editing session.
//!
//! Feeds arbitrary characters through `KeyEvent::from_char` into a session
//! and renders each frame into an in-memory screen. Nothing may panic, and
//! the cursor must always map to a valid position in the text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use red::terminal::Terminal;
use red::{Flow, KeyEvent, Screen, Session};

fuzz_target!(|data: (String, String, u8, u8)| {
    let (seed, keys, width, height) = data;
    let mut session = Session::from_text(seed);
    let mut screen = Screen::new(Terminal::new(
        Vec::new(),
        (u16::from(width.max(1)), u16::from(height.max(1))),
    ));

    for c in keys.chars().take(512) {
        match session.handle_key(KeyEvent::from_char(c)) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => panic!("session rejected its own edit: {err}"),
        }
        let text = session.document().text();
        let offset = session.cursor_offset();
        assert!(offset <= text.len());
        assert!(text.is_char_boundary(offset));

        session.render(&mut screen).unwrap();
        screen.terminal_mut().writer_mut().clear();
    }
});
