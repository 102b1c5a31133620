//! Configuration menu.
//!
//! The joystick X axis moves a wrapping cursor over the option list of the
//! parameter being edited. A commit stores the cursor and moves on to the
//! next parameter. After the third commit the menu yields a `SessionPlan`.

use crate::config::{ADC_MAX, AXIS_HIGH_THRESHOLD, AXIS_LOW_THRESHOLD};
use crate::options::{Parameter, SessionPlan};

/// Cursor movement requested by a joystick reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    /// Maps a raw ADC reading to a movement.
    ///
    /// Readings between the thresholds are the stick's dead zone. Anything
    /// above `ADC_MAX` is not a valid sample and is treated the same way.
    pub fn from_reading(reading: u16) -> Option<Self> {
        match reading {
            r if r > ADC_MAX => None,
            r if r > AXIS_HIGH_THRESHOLD => Some(Direction::Forward),
            r if r < AXIS_LOW_THRESHOLD => Some(Direction::Back),
            _ => None,
        }
    }
}

/// Index into an option list, always in `0..len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    fn at(index: usize, len: usize) -> Self {
        Self {
            index: if index < len { index } else { 0 },
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves one step, wrapping at both ends.
    pub fn step(&mut self, direction: Direction) {
        if self.len == 0 {
            return;
        }
        self.index = match direction {
            Direction::Forward => (self.index + 1) % self.len,
            Direction::Back if self.index == 0 => self.len - 1,
            Direction::Back => self.index - 1,
        };
    }
}

/// Result of a commit press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Value stored; the menu now edits this parameter.
    Next(Parameter),
    /// Third value stored; the session can start.
    Complete(SessionPlan),
    /// Every parameter was already committed.
    Ignored,
}

/// Menu state: the ordinal being edited, its cursor and the committed indices.
#[derive(Clone, Debug)]
pub struct ConfigMenu {
    ordinal: usize,
    cursor: Cursor,
    committed: [usize; 3],
}

impl Default for ConfigMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMenu {
    pub fn new() -> Self {
        Self {
            ordinal: 0,
            cursor: Cursor::new(Parameter::Cycles.options().len()),
            committed: [0; 3],
        }
    }

    /// Parameter being edited, or `None` once all three are committed.
    pub fn parameter(&self) -> Option<Parameter> {
        Parameter::from_ordinal(self.ordinal)
    }

    pub fn is_complete(&self) -> bool {
        self.parameter().is_none()
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor.index()
    }

    /// Option value under the cursor.
    pub fn current_value(&self) -> Option<u8> {
        let parameter = self.parameter()?;
        parameter.options().get(self.cursor.index()).copied()
    }

    /// Applies one joystick sample. Returns `true` if the cursor moved.
    pub fn apply_reading(&mut self, reading: u16) -> bool {
        if self.is_complete() {
            return false;
        }
        match Direction::from_reading(reading) {
            Some(direction) => {
                self.cursor.step(direction);
                true
            }
            None => false,
        }
    }

    pub fn commit(&mut self) -> CommitOutcome {
        let Some(parameter) = self.parameter() else {
            return CommitOutcome::Ignored;
        };

        self.committed[self.ordinal] = self.cursor.index();
        debug!("menu: committed index {} for ordinal {}", self.cursor.index(), self.ordinal);
        self.ordinal += 1;

        match Parameter::from_ordinal(self.ordinal) {
            Some(next) => {
                self.cursor = Cursor::new(next.options().len());
                CommitOutcome::Next(next)
            }
            None => {
                self.cursor = Cursor::new(parameter.options().len());
                match self.plan() {
                    Some(plan) => CommitOutcome::Complete(plan),
                    None => CommitOutcome::Ignored,
                }
            }
        }
    }

    /// Reopens the previous parameter with its committed index under the cursor.
    ///
    /// Has no effect on the first parameter or once the menu is complete.
    pub fn step_back(&mut self) -> bool {
        if self.ordinal == 0 || self.is_complete() {
            return false;
        }
        self.ordinal -= 1;
        let len = Parameter::ALL[self.ordinal].options().len();
        self.cursor = Cursor::at(self.committed[self.ordinal], len);
        true
    }

    /// The committed plan, available once the menu is complete.
    pub fn plan(&self) -> Option<SessionPlan> {
        if !self.is_complete() {
            return None;
        }
        let [cycle, work, rest] = self.committed;
        SessionPlan::from_indices(cycle, work, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{BREAK_MINUTE_OPTIONS, CYCLE_OPTIONS, WORK_MINUTE_OPTIONS};

    const FORWARD: u16 = 4000;
    const BACK: u16 = 100;
    const CENTER: u16 = 2048;

    #[test]
    fn readings_map_to_directions() {
        assert_eq!(Direction::from_reading(2701), Some(Direction::Forward));
        assert_eq!(Direction::from_reading(2700), None);
        assert_eq!(Direction::from_reading(1500), None);
        assert_eq!(Direction::from_reading(1499), Some(Direction::Back));
        assert_eq!(Direction::from_reading(0), Some(Direction::Back));
        assert_eq!(Direction::from_reading(4095), Some(Direction::Forward));
    }

    #[test]
    fn out_of_range_reading_is_dead_zone() {
        assert_eq!(Direction::from_reading(4096), None);
        assert_eq!(Direction::from_reading(u16::MAX), None);

        let mut menu = ConfigMenu::new();
        assert!(!menu.apply_reading(u16::MAX));
        assert_eq!(menu.cursor_index(), 0);
    }

    #[test]
    fn cursor_wraps_at_both_ends() {
        let mut cursor = Cursor::new(4);
        cursor.step(Direction::Back);
        assert_eq!(cursor.index(), 3);
        cursor.step(Direction::Forward);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn cursor_stays_in_range_over_many_moves() {
        let mut cursor = Cursor::new(6);
        for step in 0..50 {
            let direction = if step % 7 < 4 {
                Direction::Forward
            } else {
                Direction::Back
            };
            cursor.step(direction);
            assert!(cursor.index() < 6);
        }
    }

    #[test]
    fn dead_zone_leaves_cursor_alone() {
        let mut menu = ConfigMenu::new();
        menu.apply_reading(FORWARD);
        assert!(!menu.apply_reading(CENTER));
        assert_eq!(menu.cursor_index(), 1);
        assert_eq!(menu.current_value(), Some(CYCLE_OPTIONS[1]));
    }

    #[test]
    fn three_commits_complete_the_plan() {
        let mut menu = ConfigMenu::new();

        menu.apply_reading(FORWARD);
        assert_eq!(menu.commit(), CommitOutcome::Next(Parameter::WorkMinutes));
        assert_eq!(menu.cursor_index(), 0);

        menu.apply_reading(BACK);
        assert_eq!(menu.current_value(), Some(60));
        assert_eq!(menu.commit(), CommitOutcome::Next(Parameter::BreakMinutes));

        menu.apply_reading(FORWARD);
        menu.apply_reading(FORWARD);
        let outcome = menu.commit();
        assert_eq!(
            outcome,
            CommitOutcome::Complete(SessionPlan {
                cycles: CYCLE_OPTIONS[1],
                work_minutes: WORK_MINUTE_OPTIONS[5],
                break_minutes: BREAK_MINUTE_OPTIONS[2],
            })
        );
        assert!(menu.is_complete());
    }

    #[test]
    fn commit_after_completion_is_ignored() {
        let mut menu = ConfigMenu::new();
        for _ in 0..3 {
            menu.commit();
        }
        let plan = menu.plan();
        assert_eq!(menu.commit(), CommitOutcome::Ignored);
        assert_eq!(menu.plan(), plan);
        assert!(!menu.apply_reading(FORWARD));
    }

    #[test]
    fn step_back_restores_previous_index() {
        let mut menu = ConfigMenu::new();
        assert!(!menu.step_back());

        menu.apply_reading(FORWARD);
        menu.apply_reading(FORWARD);
        menu.commit();
        assert_eq!(menu.parameter(), Some(Parameter::WorkMinutes));

        assert!(menu.step_back());
        assert_eq!(menu.parameter(), Some(Parameter::Cycles));
        assert_eq!(menu.cursor_index(), 2);
        assert_eq!(menu.current_value(), Some(4));
    }
}
