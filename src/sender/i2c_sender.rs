use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::command::{Command, RegisterSelection, State, BACKLIGHT, ENABLE, REGISTER_SELECT};
use crate::sender::{Error, SendCommand};

// I2C to parallel:
// P7 -> P0
// DB7/DB6/DB5/DB4/BL/EN/RW/RS

/// Factory default address of PCF8574 backpack boards.
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Settle time after each transmission. Generous compared to the datasheet
/// minimum so clone controllers with slower internal clocks still latch.
const LATCH_SETTLE_US: u32 = 600;

/// Sender for the ubiquitous PCF8574 I2C backpack.
///
/// Frames each 8-bit instruction into two 4-bit transmissions and drives the
/// enable-pulse protocol around them: the controller latches the data lines
/// on the high-to-low enable transition, so every nibble goes out twice,
/// first with enable high, then with enable low.
pub struct I2cSender<'a, I2cLcd: I2c> {
    i2c: &'a mut I2cLcd,
    address: u8,
    backlight: State,
}

impl<'a, I2cLcd: I2c> I2cSender<'a, I2cLcd> {
    /// Create a sender on the given bus. `address` is the backpack's 7-bit
    /// address, [`DEFAULT_ADDRESS`] on unmodified boards.
    pub fn new(i2c: &'a mut I2cLcd, address: u8) -> Self {
        Self {
            i2c,
            address,
            backlight: State::On,
        }
    }

    fn backlight_bit(&self) -> u8 {
        match self.backlight {
            State::Off => 0,
            State::On => BACKLIGHT,
        }
    }

    /// Split a command byte into its two enable-high transmissions.
    fn frame(&self, command: Command) -> (u8, u8) {
        let rs = match command.register_selection() {
            RegisterSelection::Command => 0,
            RegisterSelection::Data => REGISTER_SELECT,
        };
        let byte = command.byte();

        let most = (byte & 0xF0) | self.backlight_bit() | ENABLE | rs;
        let least = ((byte << 4) & 0xF0) | self.backlight_bit() | ENABLE | rs;
        (most, least)
    }
}

impl<'a, I2cLcd: I2c, Delayer: DelayNs> SendCommand<Delayer> for I2cSender<'a, I2cLcd> {
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Error> {
        let (most, least) = self.frame(command);
        // falling edge that latches the nibble: enable low, register-select
        // cleared, backlight preserved
        let latch = self.backlight_bit();

        let mut result = Ok(());
        for tx in [most, latch, least, latch] {
            if self.i2c.write(self.address, &[tx]).is_err() {
                result = result.and(Err(Error::BusWriteIncomplete));
            }
            delayer.delay_us(LATCH_SETTLE_US);
        }
        result
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Error> {
        self.backlight = backlight;
        // push the new level out immediately; enable stays low so the
        // controller latches nothing
        self.i2c
            .write(self.address, &[self.backlight_bit()])
            .map_err(|_| Error::BusWriteIncomplete)
    }

    fn get_backlight(&self) -> State {
        self.backlight
    }
}
