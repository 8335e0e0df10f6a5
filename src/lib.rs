/*!
# Character LCD over I2C

Driver for HD44780-family character displays wired through a PCF8574-style
4-bit I2C backpack.

Basic Usage:

1. Initialize an I2C bus with your platform HAL (clock setup and pin-function
    assignment happen there), plus a delay provider implementing
    [`embedded_hal::delay::DelayNs`].
<br/>
<br/>
2. Wrap the bus in a [`sender::I2cSender`] at the backpack's address
    ([`sender::DEFAULT_ADDRESS`] on unmodified boards, see [lcd address] for
    finding yours), or any other sender implementing
    [`sender::SendCommand`].
<br/>
<br/>
3. Create a [`lcd::Lcd`] with a [`lcd::Config`] describing the panel
    geometry, run [`lcd::Lcd::init()`], and use its methods to drive the
    display.

```ignore
use char_lcd_i2c::{
    lcd::{Config, Lcd},
    sender::{I2cSender, DEFAULT_ADDRESS},
};

let mut sender = I2cSender::new(&mut i2c, DEFAULT_ADDRESS);
let mut lcd = Lcd::new(&mut sender, &mut delay, Config::default());
lcd.init()?;

lcd.print("Hello")?; // space-padded to the row width
lcd.move_cursor(1, 0)?;
lcd.print("a string longer than the row scrolls by itself")?;
```

The driver is blocking and single-owner: operations run to completion on the
calling thread, sleeping through the controller's mandated settle times, and
`&mut` access rules out concurrent use. Transmission failures are reported as
[`sender::Error::BusWriteIncomplete`] but never abort a multi-step sequence;
the wiring has no acknowledgment channel, so the protocol is fire-and-forget
by nature.

[lcd address]: https://www.ardumotive.com/i2clcden.html
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod led;
pub mod sender;
mod state;
pub mod utils;
