//! High-level driver: initialization state machine, text layout policy,
//! cursor addressing and display shift.

use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, State},
    sender::{Error, SendCommand},
    state::{LcdState, MAX_ROWS, ROW_CAPACITY},
};

/// Hold time after a wake-up byte. The controller cannot report busy in
/// 4-bit-only wiring, so the reset sequence runs on fixed worst-case delays.
const WAKE_UP_SETTLE_US: u32 = 5_000;

/// Settle after the third wake-up byte, before committing to 4-bit mode.
const MODE_COMMIT_SETTLE_US: u32 = 150;

/// Clear-display is one of the controller's slow instructions.
const CLEAR_SETTLE_US: u32 = 2_000;

/// Dwell time per window while scrolling an over-long line.
const SCROLL_STEP_MS: u32 = 500;

/// [`Config`] is the construction-time configuration of a [`Lcd`].
///
/// Geometry is fixed for the driver's lifetime. Defaults match the common
/// 1602 panel: 2 rows by 16 columns, cursor and blink off.
#[derive(Clone, Copy)]
pub struct Config {
    rows: u8,
    columns: u8,
    cursor: State,
    cursor_blink: State,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 16,
            cursor: State::Off,
            cursor_blink: State::Off,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_rows(&self) -> u8 {
        self.rows
    }

    pub fn set_rows(mut self, rows: u8) -> Self {
        assert!((1..=MAX_ROWS).contains(&rows), "row count out of range");
        self.rows = rows;
        self
    }

    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    pub fn set_columns(mut self, columns: u8) -> Self {
        assert!(
            (1..=ROW_CAPACITY as u8).contains(&columns),
            "column count out of range"
        );
        self.columns = columns;
        self
    }

    pub fn get_cursor(&self) -> State {
        self.cursor
    }

    pub fn set_cursor(mut self, cursor: State) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.cursor_blink = blink;
        self
    }
}

/// Character LCD driver.
///
/// Exclusive single-owner, fully blocking: every operation runs to
/// completion on the calling thread, sleeping through the controller's
/// mandated settle times. Call [`Lcd::init`] once before anything else.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
    cursor: State,
    cursor_blink: State,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a driver. No bus traffic happens until [`Lcd::init`].
    pub fn new(sender: &'a mut Sender, delayer: &'b mut Delayer, config: Config) -> Self {
        Self {
            sender,
            delayer,
            state: LcdState::new(config.rows, config.columns),
            cursor: config.cursor,
            cursor_blink: config.cursor_blink,
        }
    }

    /// Bring the controller from an indeterminate power-on state into 4-bit,
    /// cleared, backlit, cursor-at-home, display-on operation.
    ///
    /// The sequence is strict: the controller may power up in 8-bit mode, so
    /// the wake-up byte goes out three times with mandated delays before the
    /// interface is committed to 4-bit framing. No step may be reordered or
    /// skipped.
    ///
    /// Initialization is best-effort: a failed transmission is recorded but
    /// the sequence runs to completion, and the first failure is returned.
    /// It is safe to run `init` again.
    pub fn init(&mut self) -> Result<(), Error> {
        self.state.reset();

        let mut result = self.sender.send(CommandSet::WakeUp.into(), self.delayer);
        result = result.and(self.sender.delay_and_send(
            CommandSet::WakeUp.into(),
            self.delayer,
            WAKE_UP_SETTLE_US,
        ));
        result = result.and(self.sender.delay_and_send(
            CommandSet::WakeUp.into(),
            self.delayer,
            WAKE_UP_SETTLE_US,
        ));

        // everything after this transmission uses two-nibble framing
        result = result.and(self.sender.delay_and_send(
            CommandSet::FourBitMode.into(),
            self.delayer,
            MODE_COMMIT_SETTLE_US,
        ));

        // line and font mode are fixed for the remainder of operation
        let line_mode = match self.state.rows() {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        };
        result = result.and(self.sender.send(
            CommandSet::FunctionSet(line_mode, Font::Font5x8).into(),
            self.delayer,
        ));

        result = result.and(self.sender.send(
            CommandSet::EntryModeSet(MoveDirection::LeftToRight).into(),
            self.delayer,
        ));

        result = result.and(
            self.sender
                .send(CommandSet::ClearDisplay.into(), self.delayer),
        );

        result = result.and(self.sender.delay_and_send(
            CommandSet::BacklightOn.into(),
            self.delayer,
            CLEAR_SETTLE_US,
        ));

        result = result.and(self.sender.send(CommandSet::ReturnHome.into(), self.delayer));

        result = result.and(self.sender.send(
            CommandSet::DisplayOnOff {
                display: State::On,
                cursor: self.cursor,
                cursor_blink: self.cursor_blink,
            }
            .into(),
            self.delayer,
        ));

        result
    }

    /// Render a string onto one display row.
    ///
    /// Text that fits the row is written through the line buffer: verbatim
    /// when it fills the row exactly, space-padded to the row width
    /// otherwise, then flushed left to right from the current cursor
    /// position. The stored cursor position is not touched.
    ///
    /// Text longer than the row scrolls instead: a row-width window slides
    /// over the text one character per step, repainting from column 0 of the
    /// current row and dwelling 500 ms per step, until the window shows the
    /// string's tail. Scrolling bypasses the line buffer.
    ///
    /// Transmission failures follow the driver's best-effort policy: the
    /// remaining characters are still sent and the first failure is returned.
    pub fn print(&mut self, text: &str) -> Result<(), Error> {
        let width = self.state.columns() as usize;
        let bytes = text.as_bytes();
        let mut result = Ok(());

        if bytes.len() > width {
            let row = self.state.cursor_pos().0;
            for start in 0..=(bytes.len() - width) {
                result = result.and(self.move_cursor(row, 0));
                for &code in &bytes[start..start + width] {
                    result = result.and(
                        self.sender
                            .send(CommandSet::WriteChar(code).into(), self.delayer),
                    );
                }
                self.delayer.delay_ms(SCROLL_STEP_MS);
            }
            return result;
        }

        for &code in self.state.render_line(text) {
            result = result.and(
                self.sender
                    .send(CommandSet::WriteChar(code).into(), self.delayer),
            );
        }
        result
    }

    /// Move the cursor to (row, column), zero-based.
    ///
    /// Positions outside the configured geometry are a silent no-op: no
    /// transmission, no state change. The stored position reflects where
    /// writing will *start*; the controller auto-increments its own cursor
    /// after each character write.
    pub fn move_cursor(&mut self, row: u8, column: u8) -> Result<(), Error> {
        let Some(address) = self.state.ddram_address(row, column) else {
            return Ok(());
        };

        self.state.set_cursor_pos((row, column));
        self.sender
            .send(CommandSet::SetDdram(address).into(), self.delayer)
    }

    /// Shift the displayed window one position to the left.
    pub fn shift_display_left(&mut self) -> Result<(), Error> {
        self.sender.send(
            CommandSet::ShiftDisplay(MoveDirection::RightToLeft).into(),
            self.delayer,
        )
    }

    /// Shift the displayed window one position to the right.
    pub fn shift_display_right(&mut self) -> Result<(), Error> {
        self.sender.send(
            CommandSet::ShiftDisplay(MoveDirection::LeftToRight).into(),
            self.delayer,
        )
    }

    /// Set the backlight control line.
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Error> {
        self.sender.set_backlight(backlight)
    }

    /// Cursor position at the start of the last positioned write.
    pub fn cursor_pos(&self) -> (u8, u8) {
        self.state.cursor_pos()
    }

    /// Configured row count.
    pub fn rows(&self) -> u8 {
        self.state.rows()
    }

    /// Configured column count.
    pub fn columns(&self) -> u8 {
        self.state.columns()
    }
}

/// Lets the driver be used with the `write!` macro. Inherits [`Lcd::print`]
/// semantics, including scrolling for over-long strings.
impl<'a, 'b, Sender, Delayer> core::fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print(s).map_err(|_| core::fmt::Error)
    }
}
