//! Screen cursor position.

/// 1-based cursor position confined to a `width` × `height` screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorState {
    /// Column, `1..=width`.
    pub x: u16,
    /// Row, `1..=height`.
    pub y: u16,
    /// Whether the cursor is shown.
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            x: 1,
            y: 1,
            visible: true,
        }
    }
}

impl CursorState {
    /// Create a new cursor state at the home position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `(x, y)`, clamped into the screen.
    pub fn move_abs(&mut self, x: i32, y: i32, width: u16, height: u16) {
        self.x = clamp_axis(x, width);
        self.y = clamp_axis(y, height);
    }

    /// Move by `(dx, dy)`, clamped into the screen.
    pub fn move_rel(&mut self, dx: i32, dy: i32, width: u16, height: u16) {
        self.move_abs(
            i32::from(self.x).saturating_add(dx),
            i32::from(self.y).saturating_add(dy),
            width,
            height,
        );
    }

    /// Get position as tuple.
    #[must_use]
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

fn clamp_axis(value: i32, limit: u16) -> u16 {
    let limit = i32::from(limit.max(1));
    value.clamp(1, limit) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_home() {
        let cursor = CursorState::new();
        assert_eq!(cursor.position(), (1, 1));
        assert!(cursor.visible);
    }

    #[test]
    fn test_move_abs_clamps() {
        let mut cursor = CursorState::new();
        cursor.move_abs(10, 5, 80, 24);
        assert_eq!(cursor.position(), (10, 5));

        cursor.move_abs(0, -3, 80, 24);
        assert_eq!(cursor.position(), (1, 1));

        cursor.move_abs(500, 500, 80, 24);
        assert_eq!(cursor.position(), (80, 24));
    }

    #[test]
    fn test_move_rel_clamps() {
        let mut cursor = CursorState::new();
        cursor.move_rel(-1, 0, 10, 10);
        assert_eq!(cursor.position(), (1, 1));

        cursor.move_rel(3, 2, 10, 10);
        assert_eq!(cursor.position(), (4, 3));

        cursor.move_rel(100, 100, 10, 10);
        assert_eq!(cursor.position(), (10, 10));
    }

    #[test]
    fn test_zero_sized_screen_keeps_home() {
        let mut cursor = CursorState::new();
        cursor.move_rel(5, 5, 0, 0);
        assert_eq!(cursor.position(), (1, 1));
    }
}
