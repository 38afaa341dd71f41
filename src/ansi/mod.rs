//! ANSI escape sequence generation.

pub mod sequences;

pub use sequences::*;

use std::io::{self, Write};

/// Write a u32 as decimal digits to a writer without formatting overhead.
///
/// Stack buffer is sized for max u32 digits (10) to avoid heap allocation.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    // Fast paths for common small values (most cursor positions)
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

/// Write an absolute cursor position. `x` and `y` are 1-based columns and
/// rows; zero is written as 1.
pub fn write_cursor_position(w: &mut impl Write, x: u32, y: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, y.max(1))?;
    w.write_all(b";")?;
    write_u32_decimal(w, x.max(1))?;
    w.write_all(b"H")
}

/// Write relative cursor movement. Nothing is written for a zero delta.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    if dy != 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(if dy < 0 { b"A" } else { b"B" })?;
    }
    if dx != 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(if dx > 0 { b"C" } else { b"D" })?;
    }
    Ok(())
}
