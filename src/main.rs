//! SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! # Pomodoro Timer Firmware
//!
//! Work/break cycle timer for the Raspberry Pi Pico 2 (RP2350):
//! - **Hardware Module:** clocks, GPIO, ADC, I2C display and buzzer (`firmware/hardware.rs`).
//! - **Inputs:** debounced button interrupts and joystick sampling (`firmware/inputs.rs`).
//! - **Ticker:** TIMER0 alarm driving the countdown once per minute (`firmware/ticker.rs`).
//! - **USB Module:** status lines over USB serial (`firmware/usb_module.rs`).
//!
//! The application logic lives in the `pomodoro_pico` library. On a host
//! target this binary is an empty stub so the library tests can run.

#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std, no_main)]

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod firmware;

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    eprintln!("pomodoro-pico is firmware: build with `cargo build --release --target thumbv8m.main-none-eabihf`");
}
