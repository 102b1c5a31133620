//! Countdown engine.
//!
//! A typed state machine (`Idle`, `Working`, `OnBreak`) advanced once per
//! external minute tick. Work time counts up to the target; break time is
//! loaded with the break length and counts down to zero.

use typed_fsm::{Transition, state_machine};

use crate::options::SessionPlan;

// FSM Context
#[derive(Clone, Copy, Debug, Default)]
pub struct CountdownContext {
    pub plan: SessionPlan,
    pub is_active: bool,
    pub cycles_remaining: u8,
    pub elapsed_work_minutes: u8,
    /// Minutes of break left. Zero outside the break phase.
    pub elapsed_break_minutes: u8,
    /// Set on every phase boundary, cleared by whoever plays the tone.
    pub sound_requested: bool,
}

// FSM Events
#[derive(Clone, Copy, Debug)]
pub enum CountdownEvent {
    Start(SessionPlan),
    MinuteTick,
}

state_machine! {
    Name: CountdownFsm,
    Context: CountdownContext,
    Event: CountdownEvent,
    States: {
        // Waiting for the menu to hand over a plan
        Idle => {
            entry: |ctx| {
                ctx.is_active = false;
                ctx.cycles_remaining = 0;
                ctx.elapsed_work_minutes = 0;
                ctx.elapsed_break_minutes = 0;
            }
            process: |ctx, evt| {
                match evt {
                    CountdownEvent::Start(plan) => {
                        ctx.plan = *plan;
                        ctx.cycles_remaining = plan.cycles;
                        ctx.elapsed_work_minutes = 0;
                        ctx.elapsed_break_minutes = 0;
                        if plan.cycles == 0 {
                            Transition::None // Nothing to run
                        } else {
                            Transition::To(CountdownFsm::Working)
                        }
                    }
                    CountdownEvent::MinuteTick => Transition::None, // Stopped countdown does not advance
                }
            }
        },

        // Counting work minutes up to the target
        Working => {
            entry: |ctx| {
                ctx.is_active = true;
            }
            process: |ctx, evt| {
                match evt {
                    CountdownEvent::MinuteTick => {
                        if ctx.cycles_remaining == 0 {
                            Transition::To(CountdownFsm::Idle)
                        } else {
                            ctx.elapsed_work_minutes += 1;
                            // Exact match: every minute must be ticked
                            if ctx.elapsed_work_minutes == ctx.plan.work_minutes {
                                ctx.elapsed_break_minutes = ctx.plan.break_minutes;
                                ctx.sound_requested = true;
                                Transition::To(CountdownFsm::OnBreak)
                            } else {
                                Transition::None
                            }
                        }
                    }
                    CountdownEvent::Start(_) => Transition::None, // Already running
                }
            }
        },

        // Counting break minutes down to zero
        OnBreak => {
            entry: |ctx| {
                ctx.is_active = true;
            }
            process: |ctx, evt| {
                match evt {
                    CountdownEvent::MinuteTick => {
                        if ctx.cycles_remaining == 0 {
                            Transition::To(CountdownFsm::Idle)
                        } else {
                            ctx.elapsed_break_minutes = ctx.elapsed_break_minutes.saturating_sub(1);
                            if ctx.elapsed_break_minutes == 0 {
                                ctx.elapsed_work_minutes = 0;
                                ctx.sound_requested = true;
                                ctx.cycles_remaining -= 1;
                                if ctx.cycles_remaining == 0 {
                                    Transition::To(CountdownFsm::Idle)
                                } else {
                                    Transition::To(CountdownFsm::Working)
                                }
                            } else {
                                Transition::None
                            }
                        }
                    }
                    CountdownEvent::Start(_) => Transition::None,
                }
            }
        }
    }
}

/// Which state the engine is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Phase {
    Idle,
    Working,
    OnBreak,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Working => "WORKING",
            Phase::OnBreak => "ON_BREAK",
        }
    }
}

/// Copy of the countdown state taken for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct CountdownSnapshot {
    pub phase: Phase,
    pub plan: SessionPlan,
    pub cycles_remaining: u8,
    pub elapsed_work_minutes: u8,
    pub elapsed_break_minutes: u8,
    pub sound_requested: bool,
}

impl CountdownSnapshot {
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }
}

/// The state machine together with its context.
pub struct Countdown {
    fsm: CountdownFsm,
    ctx: CountdownContext,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        let mut ctx = CountdownContext::default();
        let mut fsm = CountdownFsm::Idle;
        fsm.init(&mut ctx);
        Self { fsm, ctx }
    }

    pub fn phase(&self) -> Phase {
        match self.fsm {
            CountdownFsm::Idle => Phase::Idle,
            CountdownFsm::Working => Phase::Working,
            CountdownFsm::OnBreak => Phase::OnBreak,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ctx.is_active
    }

    pub fn context(&self) -> &CountdownContext {
        &self.ctx
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            phase: self.phase(),
            plan: self.ctx.plan,
            cycles_remaining: self.ctx.cycles_remaining,
            elapsed_work_minutes: self.ctx.elapsed_work_minutes,
            elapsed_break_minutes: self.ctx.elapsed_break_minutes,
            sound_requested: self.ctx.sound_requested,
        }
    }

    /// Starts a session. Returns `true` if the engine is now running.
    pub fn activate(&mut self, plan: SessionPlan) -> bool {
        self.fsm.dispatch(&mut self.ctx, &CountdownEvent::Start(plan));
        info!(
            "countdown: start cycles={} work={} break={} active={}",
            plan.cycles,
            plan.work_minutes,
            plan.break_minutes,
            self.ctx.is_active
        );
        self.ctx.is_active
    }

    /// Advances one minute.
    ///
    /// Returns `true` while the periodic tick should keep firing. A tick
    /// while idle changes nothing and returns `false`.
    pub fn tick(&mut self) -> bool {
        if !self.ctx.is_active {
            return false;
        }

        let before = self.phase();
        self.fsm.dispatch(&mut self.ctx, &CountdownEvent::MinuteTick);
        let after = self.phase();

        if before != after {
            info!(
                "countdown: {} -> {} cycles_remaining={}",
                before.name(),
                after.name(),
                self.ctx.cycles_remaining
            );
        }
        self.ctx.is_active
    }

    pub fn sound_requested(&self) -> bool {
        self.ctx.sound_requested
    }

    pub fn clear_sound_request(&mut self) {
        self.ctx.sound_requested = false;
    }
}
