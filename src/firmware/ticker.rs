//! Minute ticker.
//!
//! TIMER0 alarm 0 is a one-shot; the ISR re-arms it for another minute only
//! while the countdown reports it is still running. Starting a session arms
//! it again through [`start`].

use core::cell::RefCell;
use critical_section::Mutex;
use defmt::*;

use rp235x_hal as hal;
use hal::fugit::MicrosDurationU32;
use hal::pac;
use hal::timer::Alarm;

use rp235x_hal::pac::interrupt;

use pomodoro_pico::config::MINUTE_TICK_MS;

use super::COUNTDOWN;
use super::hardware::MinuteAlarm;

static ALARM: Mutex<RefCell<Option<MinuteAlarm>>> = Mutex::new(RefCell::new(None));

/// Publishes the alarm for the ISR and unmasks its interrupt.
pub fn init(alarm: MinuteAlarm) {
    critical_section::with(|cs| {
        ALARM.borrow_ref_mut(cs).replace(alarm);
    });

    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TIMER0_IRQ_0);
    }
}

/// Arms the first tick of a session, one full period from now.
pub fn start() {
    critical_section::with(|cs| {
        if let Some(alarm) = ALARM.borrow_ref_mut(cs).as_mut() {
            if arm(alarm) {
                info!("ticker: armed for {} ms", MINUTE_TICK_MS);
            }
        }
    });
}

fn arm(alarm: &mut MinuteAlarm) -> bool {
    match alarm.schedule(MicrosDurationU32::millis(MINUTE_TICK_MS)) {
        Ok(()) => {
            alarm.enable_interrupt();
            true
        }
        Err(_) => {
            warn!("ticker: alarm could not be scheduled, countdown halted");
            alarm.disable_interrupt();
            false
        }
    }
}

#[allow(non_snake_case)]
#[interrupt]
fn TIMER0_IRQ_0() {
    critical_section::with(|cs| {
        let mut alarm = ALARM.borrow_ref_mut(cs);
        let Some(alarm) = alarm.as_mut() else {
            return;
        };
        alarm.clear_interrupt();

        let keep_running = COUNTDOWN
            .borrow_ref_mut(cs)
            .as_mut()
            .is_some_and(|countdown| countdown.tick());

        if !keep_running || !arm(alarm) {
            alarm.disable_interrupt();
            info!("ticker: stopped");
        }
    });
}
