//! Unicode utilities for grapheme handling and display width.

mod grapheme;
mod width;

pub use grapheme::{column_of, grapheme_count, grapheme_offset};
pub use width::{
    CONTROL_PLACEHOLDER, TAB_WIDTH, clip_to_width, display_width, grapheme_width, render_line,
    skip_columns,
};
