//! Debounced button edges.
//!
//! The GPIO interrupt calls [`EdgeLatch::record`] with the current timer
//! value; the main loop drains the latch with [`EdgeLatch::take`]. Each input
//! has a single pending bit, so repeated presses before the loop catches up
//! collapse into one.

use crate::config::DEBOUNCE_US;

/// Monitored push buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Button {
    A,
    B,
    Joystick,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::A, Button::B, Button::Joystick];

    fn mask(self) -> u8 {
        match self {
            Button::A => 1 << 0,
            Button::B => 1 << 1,
            Button::Joystick => 1 << 2,
        }
    }
}

/// Set of buttons with an accepted, unconsumed press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pressed(u8);

impl Pressed {
    pub fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

/// Debounce filter plus pending-press latch.
///
/// One timestamp covers every input: a press on one button suppresses a
/// press on any other button within the debounce window.
#[derive(Debug, Default)]
pub struct EdgeLatch {
    last_accepted_us: Option<u64>,
    pending: u8,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            last_accepted_us: None,
            pending: 0,
        }
    }

    /// Records a falling edge seen at `now_us`. Returns `true` if accepted.
    pub fn record(&mut self, button: Button, now_us: u64) -> bool {
        if let Some(last) = self.last_accepted_us {
            if now_us.saturating_sub(last) <= DEBOUNCE_US {
                return false;
            }
        }
        self.last_accepted_us = Some(now_us);
        self.pending |= button.mask();
        debug!("button {} accepted at {}us", button, now_us);
        true
    }

    /// Returns and clears the pending presses.
    pub fn take(&mut self) -> Pressed {
        Pressed(core::mem::take(&mut self.pending))
    }
}
