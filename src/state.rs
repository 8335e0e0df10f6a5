//! Driver-side bookkeeping: display geometry, cursor position and the
//! fixed-capacity line buffer. Pure state, no bus traffic.

/// DDRAM capacity of one row. The line buffer never needs more.
pub(crate) const ROW_CAPACITY: usize = 40;

/// Most rows any HD44780-family panel exposes.
pub(crate) const MAX_ROWS: u8 = 4;

/// DDRAM base address of each row.
const ROW_OFFSETS: [u8; MAX_ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

pub(crate) struct LcdState {
    rows: u8,
    columns: u8,
    // position at the *start* of the last positioned write; the controller
    // auto-increments its own cursor after every character
    cursor_pos: (u8, u8),
    line_buffer: [u8; ROW_CAPACITY],
}

impl LcdState {
    pub(crate) fn new(rows: u8, columns: u8) -> Self {
        assert!((1..=MAX_ROWS).contains(&rows), "row count out of range");
        assert!(
            (1..=ROW_CAPACITY as u8).contains(&columns),
            "column count out of range"
        );

        Self {
            rows,
            columns,
            cursor_pos: (0, 0),
            line_buffer: [b' '; ROW_CAPACITY],
        }
    }

    pub(crate) fn rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn columns(&self) -> u8 {
        self.columns
    }

    pub(crate) fn cursor_pos(&self) -> (u8, u8) {
        self.cursor_pos
    }

    pub(crate) fn set_cursor_pos(&mut self, pos: (u8, u8)) {
        self.cursor_pos = pos;
    }

    /// Space-fill the buffer and return the cursor to (0, 0).
    pub(crate) fn reset(&mut self) {
        self.cursor_pos = (0, 0);
        self.line_buffer = [b' '; ROW_CAPACITY];
    }

    /// DDRAM address of (row, column), or `None` when the position lies
    /// outside the configured geometry.
    pub(crate) fn ddram_address(&self, row: u8, column: u8) -> Option<u8> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(ROW_OFFSETS[row as usize] + column)
    }

    /// Lay `text` out in the line buffer: copied verbatim when it fills the
    /// row exactly, space-padded to the row width otherwise. Returns the
    /// row-width slice to flush. `text` must fit the row.
    pub(crate) fn render_line(&mut self, text: &str) -> &[u8] {
        let width = self.columns as usize;
        debug_assert!(text.len() <= width);

        let line = &mut self.line_buffer[..width];
        line.fill(b' ');
        line[..text.len()].copy_from_slice(text.as_bytes());
        &self.line_buffer[..width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_width_text_renders_verbatim() {
        let mut state = LcdState::new(2, 16);
        assert_eq!(state.render_line("0123456789abcdef"), b"0123456789abcdef");
    }

    #[test]
    fn short_text_is_space_padded_to_the_row_width() {
        let mut state = LcdState::new(2, 16);
        assert_eq!(state.render_line("Hi"), b"Hi              ");
        assert_eq!(state.render_line("Hi").len(), 16);
    }

    #[test]
    fn empty_text_renders_a_blank_row() {
        let mut state = LcdState::new(2, 16);
        assert_eq!(state.render_line(""), &[b' '; 16]);
    }

    #[test]
    fn row_bases_follow_the_ddram_layout() {
        let state = LcdState::new(4, 20);
        assert_eq!(state.ddram_address(0, 0), Some(0x00));
        assert_eq!(state.ddram_address(1, 0), Some(0x40));
        assert_eq!(state.ddram_address(2, 0), Some(0x14));
        assert_eq!(state.ddram_address(3, 0), Some(0x54));
        assert_eq!(state.ddram_address(1, 7), Some(0x47));
    }

    #[test]
    fn addressing_beyond_the_geometry_is_rejected() {
        let state = LcdState::new(2, 16);
        assert_eq!(state.ddram_address(2, 0), None);
        assert_eq!(state.ddram_address(0, 16), None);
        assert_eq!(state.ddram_address(1, 20), None);
    }

    #[test]
    #[should_panic(expected = "row count out of range")]
    fn more_than_four_rows_is_a_construction_error() {
        let _ = LcdState::new(5, 16);
    }
}
