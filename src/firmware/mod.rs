//! Firmware entry point, shared state and the presentation loop.

// --- Imports ---
use core::cell::RefCell;
use critical_section::Mutex;
use defmt::*;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use panic_probe as _;

use pomodoro_pico::config::AXIS_SETTLE_MS;
use pomodoro_pico::controller::Controller;
use pomodoro_pico::countdown::{Countdown, Phase};
use pomodoro_pico::tone::{Buzzer, Melody};
use pomodoro_pico::view;

// --- Modules ---
mod hardware;
mod inputs;
mod ticker;
mod usb_module;

use hardware::{BlueLed, GreenLed, RedLed};

// --- HAL Selection ---
use rp235x_hal as hal;
use hal::entry;

// --- Bootloader Configuration ---

#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: hal::block::ImageDef = hal::block::ImageDef::secure_exe();

// --- Shared State ---

// Countdown engine, shared between the main loop and the minute tick ISR
static COUNTDOWN: Mutex<RefCell<Option<Countdown>>> = Mutex::new(RefCell::new(None));

/// Entry point.
#[entry]
fn main() -> ! {
    info!("Program start");

    // 1. Initialize Hardware Stack (Clocks, GPIO, Timer, ADC, I2C, USB)
    let hw = hardware::init();
    let mut timer = hw.timer;
    let mut display = hw.display;
    let mut joystick = hw.joystick;
    let mut leds = hw.leds;
    let mut buzzer = Buzzer::new(hw.buzzer);

    // 2. Publish the countdown before any ISR can touch it
    critical_section::with(|cs| {
        COUNTDOWN.borrow_ref_mut(cs).replace(Countdown::new());
    });

    // 3. Hand interrupt-side peripherals to their modules
    ticker::init(hw.alarm);
    inputs::init(hw.buttons);

    let mut controller = Controller::new();
    let mut last_phase: Option<Phase> = None;

    // 4. Presentation Loop
    loop {
        let pressed = inputs::take_pressed();

        let Some((snapshot, started)) = critical_section::with(|cs| {
            let mut guard = COUNTDOWN.borrow_ref_mut(cs);
            let countdown = guard.as_mut()?;
            controller.sync(countdown.is_active());
            let started = controller.handle_presses(pressed, countdown);
            Some((countdown.snapshot(), started))
        }) else {
            continue;
        };

        if let Some(plan) = started {
            info!("Session start: {}", plan);
            ticker::start();
        }

        if last_phase != Some(snapshot.phase) {
            info!("State: {}", snapshot.phase);
            show_phase(&mut leds, snapshot.phase);
            usb_module::write_status(&snapshot);
            last_phase = Some(snapshot.phase);
        }

        if snapshot.is_active() {
            view::draw_countdown(&mut display, &snapshot).ok();
            display.flush().ok();
        } else {
            let reading = joystick.read();
            controller.poll_axis(reading);
            view::draw_menu(&mut display, controller.menu()).ok();
            display.flush().ok();
            timer.delay_ms(AXIS_SETTLE_MS);
        }

        if snapshot.sound_requested {
            buzzer.play(&mut timer, Melody::for_request(snapshot.is_active()));
            critical_section::with(|cs| {
                if let Some(countdown) = COUNTDOWN.borrow_ref_mut(cs).as_mut() {
                    countdown.clear_sound_request();
                }
            });
        }
    }
}

/// Green while working, blue on break, red while configuring.
fn show_phase(leds: &mut (RedLed, GreenLed, BlueLed), phase: Phase) {
    let (red, green, blue) = leds;
    let _ = red.set_state((phase == Phase::Idle).into());
    let _ = green.set_state((phase == Phase::Working).into());
    let _ = blue.set_state((phase == Phase::OnBreak).into());
}

// --- Metadata ---

#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [hal::binary_info::EntryAddr; 4] = [
    hal::binary_info::rp_cargo_bin_name!(),
    hal::binary_info::rp_cargo_version!(),
    hal::binary_info::rp_program_description!(c"Pomodoro Timer"),
    hal::binary_info::rp_program_build_attribute!()
];
