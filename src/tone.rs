//! Buzzer melodies.
//!
//! Tones are bit-banged: the pin is driven high and low for one half-period
//! each, `frequency * duration / 1000` times. Integer division truncates
//! both the pair count and the half-period, so note lengths are slightly
//! short but always the same.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Note {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Note {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Number of high/low pairs driven for this note.
    pub const fn toggle_pairs(&self) -> u32 {
        self.frequency_hz * self.duration_ms / 1000
    }

    /// Length of each high or low half, in microseconds.
    pub const fn half_period_us(&self) -> u32 {
        if self.frequency_hz == 0 {
            0
        } else {
            1_000_000 / (self.frequency_hz * 2)
        }
    }
}

/// Three notes with a fixed silence after each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Melody {
    pub notes: [Note; 3],
    pub gap_ms: u32,
}

/// Played at every work/break boundary.
pub const PHASE_CHANGE: Melody = Melody {
    notes: [Note::new(132, 200), Note::new(165, 200), Note::new(247, 200)],
    gap_ms: 100,
};

/// Played when the last break of a session ends.
pub const SESSION_DONE: Melody = Melody {
    notes: [Note::new(247, 200), Note::new(165, 200), Note::new(132, 200)],
    gap_ms: 100,
};

impl Melody {
    /// Picks the melody for a sound request, given whether the engine is still running.
    pub fn for_request(still_active: bool) -> &'static Melody {
        if still_active {
            &PHASE_CHANGE
        } else {
            &SESSION_DONE
        }
    }
}

/// Square-wave buzzer on a single digital output.
pub struct Buzzer<P> {
    pin: P,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin }
    }

    /// Blocks for the length of the note.
    pub fn note<D: DelayNs>(&mut self, delay: &mut D, note: Note) {
        let half_period = note.half_period_us();
        if half_period == 0 {
            delay.delay_ms(note.duration_ms);
            return;
        }
        for _ in 0..note.toggle_pairs() {
            let _ = self.pin.set_high();
            delay.delay_us(half_period);
            let _ = self.pin.set_low();
            delay.delay_us(half_period);
        }
    }

    pub fn play<D: DelayNs>(&mut self, delay: &mut D, melody: &Melody) {
        debug!("buzzer: playing {} notes", melody.notes.len());
        for note in melody.notes {
            self.note(delay, note);
            delay.delay_ms(melody.gap_ms);
        }
    }

    #[cfg(test)]
    fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct MockPin {
        rising_edges: u32,
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_us: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_us += u64::from(ns) / 1000;
        }

        fn delay_us(&mut self, us: u32) {
            self.total_us += u64::from(us);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_us += u64::from(ms) * 1000;
        }
    }

    #[test]
    fn note_timing_truncates() {
        let note = Note::new(132, 200);
        assert_eq!(note.toggle_pairs(), 26);
        assert_eq!(note.half_period_us(), 3787);

        let note = Note::new(247, 200);
        assert_eq!(note.toggle_pairs(), 49);
        assert_eq!(note.half_period_us(), 2024);
    }

    #[test]
    fn note_drives_pin_for_each_pair() {
        let mut buzzer = Buzzer::new(MockPin::default());
        let mut delay = MockDelay::default();

        buzzer.note(&mut delay, Note::new(132, 200));

        assert_eq!(delay.total_us, 26 * 2 * 3787);
        let pin = buzzer.release();
        assert_eq!(pin.rising_edges, 26);
        assert!(!pin.high);
    }

    #[test]
    fn silent_note_only_waits() {
        let mut buzzer = Buzzer::new(MockPin::default());
        let mut delay = MockDelay::default();

        buzzer.note(&mut delay, Note::new(0, 150));

        assert_eq!(delay.total_us, 150_000);
        assert_eq!(buzzer.release().rising_edges, 0);
    }

    #[test]
    fn melody_plays_three_notes_with_gaps() {
        let mut buzzer = Buzzer::new(MockPin::default());
        let mut delay = MockDelay::default();

        buzzer.play(&mut delay, &PHASE_CHANGE);

        let tones: u64 = PHASE_CHANGE
            .notes
            .iter()
            .map(|n| u64::from(n.toggle_pairs()) * 2 * u64::from(n.half_period_us()))
            .sum();
        assert_eq!(delay.total_us, tones + 3 * 100_000);
        assert_eq!(buzzer.release().rising_edges, 26 + 33 + 49);
    }

    #[test]
    fn finished_session_gets_its_own_melody() {
        assert_eq!(Melody::for_request(true), &PHASE_CHANGE);
        assert_eq!(Melody::for_request(false), &SESSION_DONE);
    }
}
