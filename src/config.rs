//! Board and timing constants.
//!
//! # Pin Mapping
//! - **Button A**: GPIO 5 (pull-up, falling edge)
//! - **Button B**: GPIO 6 (pull-up, falling edge)
//! - **Joystick button**: GPIO 22 (pull-up, falling edge)
//! - **Joystick X axis**: GPIO 26 (ADC channel 0)
//! - **OLED**: I2C1, SDA = GPIO 14, SCL = GPIO 15
//! - **Buzzer**: GPIO 21
//! - **RGB LED**: red = GPIO 13, green = GPIO 11, blue = GPIO 12

/// External crystal frequency used by the Raspberry Pi Pico 2.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

/// ADC channel wired to the joystick X axis (GPIO 26).
pub const JOYSTICK_X_CHANNEL: u8 = 0;

/// Largest value the 12-bit ADC can report.
pub const ADC_MAX: u16 = 4095;

/// Readings above this move the cursor forward.
pub const AXIS_HIGH_THRESHOLD: u16 = 2700;

/// Readings below this move the cursor back.
pub const AXIS_LOW_THRESHOLD: u16 = 1500;

/// Pause after every joystick poll. Caps cursor movement at ~10 steps/s.
pub const AXIS_SETTLE_MS: u32 = 100;

/// Minimum spacing between two accepted button edges, any input.
pub const DEBOUNCE_US: u64 = 200_000;

/// Period of the countdown tick.
pub const MINUTE_TICK_MS: u32 = 60_000;

/// SSD1306 I2C address.
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// I2C bus speed for the display.
pub const I2C_FREQ_HZ: u32 = 400_000;

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
