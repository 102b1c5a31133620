//! Hardware Abstraction Module
//!
//! This module handles the low-level configuration of the RP2350 peripherals.
//! It encapsulates the setup of Clocks, PLLs, Timer, GPIOs, ADC and I2C,
//! exposing a `Hardware` struct to the main application.

use rp235x_hal as hal;
use hal::Clock;
use hal::fugit::RateExtU32;
use hal::gpio::bank0::{Gpio11, Gpio12, Gpio13, Gpio14, Gpio15, Gpio21, Gpio26};
use hal::gpio::{FunctionI2C, FunctionNull, FunctionSio, Pin, PullDown, PullUp, SioOutput};
use hal::pac;
use hal::timer::{Alarm0, CopyableTimer0};

use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use pomodoro_pico::config::{DISPLAY_ADDRESS, I2C_FREQ_HZ, JOYSTICK_X_CHANNEL, XTAL_FREQ_HZ};

use super::inputs::ButtonPins;
use super::usb_module;

pub type Timer = hal::Timer<CopyableTimer0>;
pub type MinuteAlarm = Alarm0<CopyableTimer0>;

pub type PushPull<I> = Pin<I, FunctionSio<SioOutput>, PullDown>;

pub type BuzzerPin = PushPull<Gpio21>;
pub type RedLed = PushPull<Gpio13>;
pub type GreenLed = PushPull<Gpio11>;
pub type BlueLed = PushPull<Gpio12>;

pub type I2cPins = (
    Pin<Gpio14, FunctionI2C, PullUp>,
    Pin<Gpio15, FunctionI2C, PullUp>,
);
pub type I2cBus = hal::I2C<pac::I2C1, I2cPins>;

pub type Display =
    Ssd1306<I2CInterface<I2cBus>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

type JoystickPin = hal::adc::AdcPin<Pin<Gpio26, FunctionNull, PullDown>>;

/// Joystick X axis on the ADC, sampled in blocking single-shot mode.
pub struct Joystick {
    _adc: hal::Adc,
    _pin: JoystickPin,
    channel: u8,
}

impl Joystick {
    pub fn select_channel(&mut self, channel: u8) {
        self.channel = channel;
    }

    /// Starts one conversion on the selected channel and waits for it.
    pub fn read(&mut self) -> u16 {
        unsafe {
            let adc_regs = &(*pac::ADC::ptr());

            adc_regs.cs().modify(|_, w| {
                w.ainsel().bits(self.channel)
                 .start_once().set_bit()
            });
            while adc_regs.cs().read().ready().bit_is_clear() {}

            adc_regs.result().read().result().bits()
        }
    }
}

/// Everything `main` needs after bring-up.
pub struct Hardware {
    pub timer: Timer,
    pub alarm: MinuteAlarm,
    pub display: Display,
    pub joystick: Joystick,
    pub buttons: ButtonPins,
    pub buzzer: BuzzerPin,
    pub leds: (RedLed, GreenLed, BlueLed),
}

/// Initializes the entire hardware stack.
///
/// This function:
/// 1.  Takes ownership of the raw PAC peripherals.
/// 2.  Configures the Watchdog and Clocks (System & USB).
/// 3.  Initializes the Microsecond Timer and its first alarm.
/// 4.  Configures GPIO pins (buttons, buzzer, RGB LED).
/// 5.  Sets up the ADC for blocking single-shot reads of the joystick.
/// 6.  Brings up I2C1 and the SSD1306 display.
/// 7.  Initializes the USB Serial module.
///
/// Any failure here is a wiring or singleton bug and panics.
pub fn init() -> Hardware {
    // 1. Take ownership of raw peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // 2. Configure Clocks
    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    // 3. Configure Timer (Microsecond precision)
    let mut timer = hal::Timer::new_timer0(pac.TIMER0, &mut pac.RESETS, &clocks);
    let alarm = timer.alarm_0().unwrap();

    // 4. Configure GPIOs
    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let buttons = ButtonPins {
        a: pins.gpio5.into_pull_up_input(),
        b: pins.gpio6.into_pull_up_input(),
        joystick: pins.gpio22.into_pull_up_input(),
        timer,
    };

    let buzzer = pins.gpio21.into_push_pull_output();
    let leds = (
        pins.gpio13.into_push_pull_output(),
        pins.gpio11.into_push_pull_output(),
        pins.gpio12.into_push_pull_output(),
    );

    // 5. Configure ADC (blocking single-shot on the joystick channel)
    let adc = hal::Adc::new(pac.ADC, &mut pac.RESETS);
    let adc_pin = hal::adc::AdcPin::new(pins.gpio26).unwrap();
    let mut joystick = Joystick {
        _adc: adc,
        _pin: adc_pin,
        channel: 0,
    };
    joystick.select_channel(JOYSTICK_X_CHANNEL);

    // 6. Configure I2C1 and the display
    let sda: Pin<Gpio14, FunctionI2C, PullUp> = pins.gpio14.reconfigure();
    let scl: Pin<Gpio15, FunctionI2C, PullUp> = pins.gpio15.reconfigure();
    let i2c = hal::I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        I2C_FREQ_HZ.Hz(),
        &mut pac.RESETS,
        clocks.system_clock.freq(),
    );

    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().unwrap();
    display.flush().unwrap();

    // 7. Configure USB Serial (via module)
    usb_module::init(
        pac.USB,
        pac.USB_DPRAM,
        clocks.usb_clock,
        &mut pac.RESETS,
    );

    // Return ready-to-use hardware
    Hardware {
        timer,
        alarm,
        display,
        joystick,
        buttons,
        buzzer,
        leds,
    }
}
