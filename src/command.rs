//! HD44780 instruction encoding
//!
//! Every operation the driver performs is expressed as a [`CommandSet`]
//! variant, then lowered to a raw [`Command`] byte. The bit patterns are
//! dictated by the controller hardware and must not change.

use crate::utils::BitOps;

/// The set of controller operations this driver uses.
///
/// Read-path instructions (busy flag, RAM read-back) are absent: in the
/// 4-bit backpack wiring used here the driver never reads, so all timing is
/// handled with fixed delays instead.
#[derive(Clone, Copy)]
pub enum CommandSet {
    /// Power-on reset byte (`0x03`), sent three times during initialization
    /// to force the controller out of whatever interface width it woke up in.
    WakeUp,
    /// Commits the controller to the 4-bit interface (`0x02`). After this
    /// byte every transmission uses two-nibble framing.
    FourBitMode,
    /// Clear the display and reset the address counter.
    ClearDisplay,
    /// Return the cursor to the upper-left corner.
    ReturnHome,
    /// Fix the entry mode: where the cursor moves after a character write.
    EntryModeSet(MoveDirection),
    /// Display, cursor and cursor-blink on/off control.
    DisplayOnOff {
        /// Whole display on or off (contents are retained while off).
        display: State,
        /// Underline cursor visibility.
        cursor: State,
        /// Cursor blink.
        cursor_blink: State,
    },
    /// Shift the entire displayed window one position without touching DDRAM.
    ShiftDisplay(MoveDirection),
    /// Interface width, line count and font. 4-bit width is fixed here.
    FunctionSet(LineMode, Font),
    /// Bare backlight bit as a command byte, emitted once during bring-up.
    BacklightOn,
    /// Set the DDRAM address (cursor position).
    SetDdram(u8),
    /// Store one character code at the current cursor position.
    WriteChar(u8),
}

/// Horizontal direction for entry mode and display shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDirection {
    /// Towards lower column addresses.
    RightToLeft,
    /// Towards higher column addresses.
    #[default]
    LeftToRight,
}

/// On/off level of a display feature or control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Feature disabled / line low.
    Off,
    /// Feature enabled / line high.
    #[default]
    On,
}

/// Line count configured by the function-set instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Single-line addressing.
    OneLine,
    /// Two-line addressing (also used for 4-row panels).
    #[default]
    TwoLine,
}

/// Character font configured by the function-set instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// 5x8 dot matrix.
    #[default]
    Font5x8,
    /// 5x11 dot matrix, one-line panels only.
    Font5x11,
}

/// Register the backpack routes a byte to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSelection {
    /// Instruction register.
    Command,
    /// Display data register (character codes).
    Data,
}

// Control-line bits of the PCF8574 backpack, OR'd with each data nibble.
// P3..P0 = backlight, enable, read/write, register-select.
pub(crate) const BACKLIGHT: u8 = 0b0000_1000;
pub(crate) const ENABLE: u8 = 0b0000_0100;
#[allow(dead_code)] // read mode is never used; named for completeness
pub(crate) const READ: u8 = 0b0000_0010;
pub(crate) const REGISTER_SELECT: u8 = 0b0000_0001;

/// A lowered controller instruction: one raw byte plus its target register.
#[derive(Clone, Copy)]
pub struct Command {
    rs: RegisterSelection,
    byte: u8,
}

impl Command {
    pub(crate) fn register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub(crate) fn byte(&self) -> u8 {
        self.byte
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::WakeUp => Self {
                rs: RegisterSelection::Command,
                byte: 0b0000_0011,
            },

            CommandSet::FourBitMode => Self {
                rs: RegisterSelection::Command,
                byte: 0b0000_0010,
            },

            CommandSet::ClearDisplay => Self {
                rs: RegisterSelection::Command,
                byte: 0b0000_0001,
            },

            CommandSet::ReturnHome => Self {
                rs: RegisterSelection::Command,
                byte: 0b0000_0010,
            },

            CommandSet::EntryModeSet(dir) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                // bit 0 (display shift on entry) stays clear: text is laid
                // out by the driver, never by controller auto-shift
                Self {
                    rs: RegisterSelection::Command,
                    byte: raw_bits,
                }
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                };
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                };
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                };

                Self {
                    rs: RegisterSelection::Command,
                    byte: raw_bits,
                }
            }

            CommandSet::ShiftDisplay(dir) => {
                // display move (bit 3 set), never cursor-only
                let mut raw_bits: u8 = 0b0001_1000;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(2),
                    MoveDirection::LeftToRight => raw_bits.set_bit(2),
                };

                Self {
                    rs: RegisterSelection::Command,
                    byte: raw_bits,
                }
            }

            CommandSet::FunctionSet(line, font) => {
                // bit 4 (interface width) stays clear: 4-bit only
                let mut raw_bits: u8 = 0b0010_0000;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };
                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self {
                    rs: RegisterSelection::Command,
                    byte: raw_bits,
                }
            }

            CommandSet::BacklightOn => Self {
                rs: RegisterSelection::Command,
                byte: BACKLIGHT,
            },

            CommandSet::SetDdram(addr) => {
                assert!(addr < 0b1000_0000, "DDRAM address out of range");

                Self {
                    rs: RegisterSelection::Command,
                    byte: 0b1000_0000 + addr,
                }
            }

            CommandSet::WriteChar(data) => Self {
                rs: RegisterSelection::Data,
                byte: data,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_of(command: CommandSet) -> u8 {
        Command::from(command).byte()
    }

    #[test]
    fn raw_bytes_match_datasheet() {
        assert_eq!(byte_of(CommandSet::WakeUp), 0x03);
        assert_eq!(byte_of(CommandSet::FourBitMode), 0x02);
        assert_eq!(byte_of(CommandSet::ClearDisplay), 0x01);
        assert_eq!(byte_of(CommandSet::ReturnHome), 0x02);
        assert_eq!(byte_of(CommandSet::BacklightOn), 0x08);
    }

    #[test]
    fn entry_mode_moves_cursor_right() {
        assert_eq!(
            byte_of(CommandSet::EntryModeSet(MoveDirection::LeftToRight)),
            0x06
        );
        assert_eq!(
            byte_of(CommandSet::EntryModeSet(MoveDirection::RightToLeft)),
            0x04
        );
    }

    #[test]
    fn display_control_bits() {
        assert_eq!(
            byte_of(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            0x0C
        );
        assert_eq!(
            byte_of(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::On,
                cursor_blink: State::On,
            }),
            0x0F
        );
    }

    #[test]
    fn display_shift_directions() {
        assert_eq!(
            byte_of(CommandSet::ShiftDisplay(MoveDirection::RightToLeft)),
            0x18
        );
        assert_eq!(
            byte_of(CommandSet::ShiftDisplay(MoveDirection::LeftToRight)),
            0x1C
        );
    }

    #[test]
    fn function_set_two_line_5x8() {
        assert_eq!(
            byte_of(CommandSet::FunctionSet(LineMode::TwoLine, Font::Font5x8)),
            0x28
        );
        assert_eq!(
            byte_of(CommandSet::FunctionSet(LineMode::OneLine, Font::Font5x8)),
            0x20
        );
    }

    #[test]
    fn ddram_address_is_offset_from_0x80() {
        assert_eq!(byte_of(CommandSet::SetDdram(0x00)), 0x80);
        assert_eq!(byte_of(CommandSet::SetDdram(0x43)), 0xC3);
    }

    #[test]
    fn only_character_writes_select_the_data_register() {
        let character = Command::from(CommandSet::WriteChar(b'A'));
        assert_eq!(character.register_selection(), RegisterSelection::Data);
        assert_eq!(character.byte(), 0x41);

        let command = Command::from(CommandSet::ClearDisplay);
        assert_eq!(command.register_selection(), RegisterSelection::Command);
    }
}
