//! SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! # Pomodoro Timer Logic
//!
//! Board-independent core of the Pomodoro firmware:
//! - **Menu:** picks cycle count, work minutes and break minutes (`menu.rs`).
//! - **Countdown:** typed state machine driven by a minute tick (`countdown.rs`).
//! - **Buttons:** debounced edge latch shared with the GPIO interrupt (`buttons.rs`).
//! - **Tone:** square-wave melodies on a digital pin (`tone.rs`).
//! - **View:** `embedded-graphics` screens for the OLED (`view.rs`).
//!
//! Everything here is `no_std` and builds on the host so it can be unit tested.
//! The firmware binary wires it to the RP2350 peripherals.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod buttons;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod menu;
pub mod options;
pub mod tone;
pub mod view;
