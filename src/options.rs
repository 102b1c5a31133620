//! Fixed option lists and the plan they produce.

/// Number of work/break cycles in a session.
pub const CYCLE_OPTIONS: [u8; 4] = [2, 3, 4, 5];

/// Work phase length in minutes.
pub const WORK_MINUTE_OPTIONS: [u8; 6] = [20, 25, 30, 40, 50, 60];

/// Break phase length in minutes.
pub const BREAK_MINUTE_OPTIONS: [u8; 3] = [5, 10, 15];

/// The three values dialed in through the menu, in edit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Parameter {
    Cycles,
    WorkMinutes,
    BreakMinutes,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [
        Parameter::Cycles,
        Parameter::WorkMinutes,
        Parameter::BreakMinutes,
    ];

    /// Parameter edited at menu step `ordinal`, if any.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn ordinal(self) -> usize {
        match self {
            Parameter::Cycles => 0,
            Parameter::WorkMinutes => 1,
            Parameter::BreakMinutes => 2,
        }
    }

    pub fn options(self) -> &'static [u8] {
        match self {
            Parameter::Cycles => &CYCLE_OPTIONS,
            Parameter::WorkMinutes => &WORK_MINUTE_OPTIONS,
            Parameter::BreakMinutes => &BREAK_MINUTE_OPTIONS,
        }
    }

    /// Short label shown on the menu screen.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::Cycles => "Cycles",
            Parameter::WorkMinutes => "Work min",
            Parameter::BreakMinutes => "Break min",
        }
    }
}

/// Session settings resolved from the committed menu indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct SessionPlan {
    pub cycles: u8,
    pub work_minutes: u8,
    pub break_minutes: u8,
}

impl SessionPlan {
    /// Resolves committed indices against the option lists.
    ///
    /// Returns `None` if any index is outside its list.
    pub fn from_indices(cycle: usize, work: usize, rest: usize) -> Option<Self> {
        Some(Self {
            cycles: *CYCLE_OPTIONS.get(cycle)?,
            work_minutes: *WORK_MINUTE_OPTIONS.get(work)?,
            break_minutes: *BREAK_MINUTE_OPTIONS.get(rest)?,
        })
    }
}
