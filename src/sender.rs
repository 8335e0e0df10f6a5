//! Built-in sender
//! If you want to drive the controller through a different adapter, implement
//! the [`SendCommand`] trait for it.

use embedded_hal::delay::DelayNs;

use crate::command::{Command, State};

mod i2c_sender;

pub use i2c_sender::{I2cSender, DEFAULT_ADDRESS};

/// Errors surfaced by a sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The transport reported sending fewer bytes than requested.
    ///
    /// The 4-bit wiring carries no acknowledgment channel, so a short write
    /// never aborts an in-progress sequence; senders keep transmitting and
    /// report the first failure when the sequence completes.
    BusWriteIncomplete,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BusWriteIncomplete => write!(f, "bus transmitted fewer bytes than requested"),
        }
    }
}

/// [`SendCommand`] is the trait a sender implements to put framed controller
/// instructions on the wire.
pub trait SendCommand<Delayer: DelayNs> {
    /// Transmit one [`Command`], honoring the controller's latch timing.
    ///
    /// Senders are best-effort: a failed transmission is reported through the
    /// return value but never cuts the transmission sequence short.
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Error>;

    /// Wait the specified duration, then send the command. Used for the
    /// initialization steps whose delays the controller mandates.
    fn delay_and_send(
        &mut self,
        command: Command,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Error> {
        delayer.delay_us(delay_us);
        self.send(command, delayer)
    }

    /// Set the backlight control line.
    ///
    /// Note:
    /// If a sender doesn't support backlight control, just silently bypass it.
    #[allow(unused_variables)]
    fn set_backlight(&mut self, backlight: State) -> Result<(), Error> {
        Ok(())
    }

    /// Get the backlight state last written.
    fn get_backlight(&self) -> State {
        State::default()
    }
}
