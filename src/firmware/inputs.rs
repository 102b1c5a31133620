//! Button interrupts.
//!
//! `IO_IRQ_BANK0` fires on the falling edge of any of the three buttons. The
//! handler only timestamps the edge and latches it in `EDGES`; the main loop
//! decides what the press means.

use core::cell::RefCell;
use critical_section::Mutex;
use defmt::*;

use rp235x_hal as hal;
use hal::gpio::bank0::{Gpio5, Gpio6, Gpio22};
use hal::gpio::{FunctionSio, Interrupt, Pin, PullUp, SioInput};
use hal::pac;

use rp235x_hal::pac::interrupt;

use pomodoro_pico::buttons::{Button, EdgeLatch, Pressed};

use super::hardware::Timer;

pub type InputPin<I> = Pin<I, FunctionSio<SioInput>, PullUp>;

/// The three monitored inputs plus a timer copy for timestamps.
pub struct ButtonPins {
    pub a: InputPin<Gpio5>,
    pub b: InputPin<Gpio6>,
    pub joystick: InputPin<Gpio22>,
    pub timer: Timer,
}

impl ButtonPins {
    fn enable_interrupts(&mut self) {
        self.a.set_interrupt_enabled(Interrupt::EdgeLow, true);
        self.b.set_interrupt_enabled(Interrupt::EdgeLow, true);
        self.joystick.set_interrupt_enabled(Interrupt::EdgeLow, true);
    }

    /// Acknowledges every pending edge and reports which pins fired.
    fn take_fired(&mut self) -> [(Button, bool); 3] {
        let a = self.a.interrupt_status(Interrupt::EdgeLow);
        let b = self.b.interrupt_status(Interrupt::EdgeLow);
        let joystick = self.joystick.interrupt_status(Interrupt::EdgeLow);
        self.a.clear_interrupt(Interrupt::EdgeLow);
        self.b.clear_interrupt(Interrupt::EdgeLow);
        self.joystick.clear_interrupt(Interrupt::EdgeLow);
        [(Button::A, a), (Button::B, b), (Button::Joystick, joystick)]
    }
}

static BUTTONS: Mutex<RefCell<Option<ButtonPins>>> = Mutex::new(RefCell::new(None));
static EDGES: Mutex<RefCell<EdgeLatch>> = Mutex::new(RefCell::new(EdgeLatch::new()));

/// Publishes the pins for the ISR and unmasks the bank 0 interrupt.
pub fn init(mut buttons: ButtonPins) {
    buttons.enable_interrupts();

    critical_section::with(|cs| {
        BUTTONS.borrow_ref_mut(cs).replace(buttons);
    });

    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }
}

/// Drains the presses accepted since the last call.
pub fn take_pressed() -> Pressed {
    critical_section::with(|cs| EDGES.borrow_ref_mut(cs).take())
}

#[allow(non_snake_case)]
#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        let mut buttons = BUTTONS.borrow_ref_mut(cs);
        let Some(buttons) = buttons.as_mut() else {
            return;
        };

        let now_us = buttons.timer.get_counter().ticks();
        let mut edges = EDGES.borrow_ref_mut(cs);
        for (button, fired) in buttons.take_fired() {
            if fired && !edges.record(button, now_us) {
                trace!("{} bounce dropped", button);
            }
        }
    });
}
