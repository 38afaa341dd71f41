//! Fuzz target for piece-table inserts and undos.
//!
//! Replays arbitrary insert/undo scripts against a `String` model and checks
//! that the document text, length and links agree after every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use red::{Document, Error};

#[derive(Arbitrary, Debug)]
enum Step {
    Insert { pos: u16, text: String },
    Undo,
}

#[derive(Arbitrary, Debug)]
struct Script {
    seed: String,
    steps: Vec<Step>,
}

fuzz_target!(|script: Script| {
    let mut doc = Document::new(script.seed.clone());
    let mut history = vec![script.seed.clone()];

    for step in script.steps.into_iter().take(256) {
        match step {
            Step::Insert { pos, text } => {
                let pos = usize::from(pos);
                let current = history.last().cloned().unwrap_or_default();
                match doc.insert(pos, &text) {
                    Ok(()) if text.is_empty() => {}
                    Ok(()) => {
                        let mut next = current;
                        next.insert_str(pos, &text);
                        history.push(next);
                    }
                    Err(Error::PositionNotFound { .. }) => assert!(pos > current.len()),
                    Err(Error::NotCharBoundary { .. }) => {
                        assert!(!current.is_char_boundary(pos))
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
            Step::Undo => {
                let undone = doc.undo();
                assert_eq!(undone, history.len() > 1);
                if undone {
                    history.pop();
                }
            }
        }

        let expected = history.last().map_or("", String::as_str);
        assert_eq!(doc.text(), expected);
        assert_eq!(doc.len(), expected.len());
        assert!(doc.sequence().is_well_linked());
        assert_eq!(doc.original(), script.seed);
    }
});
