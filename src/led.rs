//! Auxiliary indicator LED, independent of display state.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

const FLASH_COUNT: u8 = 10;
const FLASH_INTERVAL_MS: u32 = 50;

/// An indicator LED on a digital output pin.
pub struct IndicatorLed<Pin: OutputPin> {
    pin: Pin,
}

impl<Pin: OutputPin> IndicatorLed<Pin> {
    /// Take ownership of an already-configured output pin.
    pub fn new(pin: Pin) -> Self {
        Self { pin }
    }

    /// Ten on/off toggles at 50 ms intervals.
    pub fn flash(&mut self, delayer: &mut impl DelayNs) -> Result<(), Pin::Error> {
        for _ in 0..FLASH_COUNT {
            self.pin.set_high()?;
            delayer.delay_ms(FLASH_INTERVAL_MS);
            self.pin.set_low()?;
            delayer.delay_ms(FLASH_INTERVAL_MS);
        }
        Ok(())
    }

    /// Release the pin.
    pub fn free(self) -> Pin {
        self.pin
    }
}
