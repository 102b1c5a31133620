//! Main-loop glue between the buttons, the menu and the countdown.

use crate::buttons::{Button, Pressed};
use crate::countdown::Countdown;
use crate::menu::{CommitOutcome, ConfigMenu};
use crate::options::SessionPlan;

/// Owns the menu and routes button presses while the countdown is idle.
#[derive(Debug, Default)]
pub struct Controller {
    menu: ConfigMenu,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            menu: ConfigMenu::new(),
        }
    }

    pub fn menu(&self) -> &ConfigMenu {
        &self.menu
    }

    /// Opens a fresh menu once a finished session has left the engine idle.
    pub fn sync(&mut self, countdown_active: bool) {
        if !countdown_active && self.menu.is_complete() {
            debug!("controller: session over, reopening menu");
            self.menu = ConfigMenu::new();
        }
    }

    /// Feeds one joystick sample to the menu.
    pub fn poll_axis(&mut self, reading: u16) -> bool {
        self.menu.apply_reading(reading)
    }

    /// Applies drained button presses.
    ///
    /// Returns the plan when this call started a session, so the caller can
    /// arm the minute tick. Presses are ignored while the countdown runs.
    pub fn handle_presses(
        &mut self,
        pressed: Pressed,
        countdown: &mut Countdown,
    ) -> Option<SessionPlan> {
        if pressed.is_empty() {
            return None;
        }
        let mut started = None;

        for button in pressed.iter() {
            if countdown.is_active() {
                debug!("controller: {} ignored while running", button);
                continue;
            }
            match button {
                Button::A | Button::Joystick => match self.menu.commit() {
                    CommitOutcome::Complete(plan) => {
                        if countdown.activate(plan) {
                            started = Some(plan);
                        }
                    }
                    CommitOutcome::Next(parameter) => {
                        info!("controller: editing {}", parameter.label());
                    }
                    CommitOutcome::Ignored => {}
                },
                Button::B => {
                    if let (true, Some(parameter)) = (self.menu.step_back(), self.menu.parameter()) {
                        info!("controller: back to {}", parameter.label());
                    }
                }
            }
        }
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::EdgeLatch;
    use crate::countdown::Phase;
    use crate::options::{CYCLE_OPTIONS, Parameter};

    const FORWARD: u16 = 3500;

    fn press(button: Button) -> Pressed {
        let mut latch = EdgeLatch::new();
        latch.record(button, 0);
        latch.take()
    }

    #[test]
    fn three_commits_start_the_countdown() {
        let mut controller = Controller::new();
        let mut countdown = Countdown::new();

        controller.poll_axis(FORWARD);
        controller.poll_axis(FORWARD);
        assert_eq!(controller.handle_presses(press(Button::A), &mut countdown), None);
        assert_eq!(controller.handle_presses(press(Button::Joystick), &mut countdown), None);
        assert!(!countdown.is_active());

        let plan = controller
            .handle_presses(press(Button::A), &mut countdown)
            .unwrap();
        assert!(countdown.is_active());
        assert_eq!(countdown.phase(), Phase::Working);
        assert_eq!(plan.cycles, CYCLE_OPTIONS[2]);
        assert_eq!(countdown.context().cycles_remaining, CYCLE_OPTIONS[2]);
        assert_eq!(plan.work_minutes, 20);
        assert_eq!(plan.break_minutes, 5);
    }

    #[test]
    fn presses_are_ignored_while_running() {
        let mut controller = Controller::new();
        let mut countdown = Countdown::new();
        for _ in 0..3 {
            controller.handle_presses(press(Button::A), &mut countdown);
        }
        assert!(countdown.is_active());

        let before = countdown.snapshot();
        assert_eq!(controller.handle_presses(press(Button::A), &mut countdown), None);
        assert_eq!(controller.handle_presses(press(Button::B), &mut countdown), None);
        assert_eq!(countdown.snapshot(), before);
        assert!(controller.menu().is_complete());
    }

    #[test]
    fn menu_reopens_after_session_ends() {
        let mut controller = Controller::new();
        let mut countdown = Countdown::new();
        for _ in 0..3 {
            controller.handle_presses(press(Button::A), &mut countdown);
        }

        controller.sync(countdown.is_active());
        assert!(controller.menu().is_complete());

        while countdown.tick() {}
        controller.sync(countdown.is_active());
        assert_eq!(controller.menu().parameter(), Some(Parameter::Cycles));
        assert_eq!(controller.menu().cursor_index(), 0);
    }

    #[test]
    fn no_presses_leave_menu_untouched() {
        let mut controller = Controller::new();
        let mut countdown = Countdown::new();
        controller.poll_axis(FORWARD);

        assert_eq!(controller.handle_presses(Pressed::default(), &mut countdown), None);
        assert_eq!(controller.menu().parameter(), Some(Parameter::Cycles));
        assert_eq!(controller.menu().cursor_index(), 1);
    }

    #[test]
    fn button_b_steps_back_while_configuring() {
        let mut controller = Controller::new();
        let mut countdown = Countdown::new();

        controller.handle_presses(press(Button::A), &mut countdown);
        assert_eq!(controller.menu().parameter(), Some(Parameter::WorkMinutes));

        controller.handle_presses(press(Button::B), &mut countdown);
        assert_eq!(controller.menu().parameter(), Some(Parameter::Cycles));
        assert!(!countdown.is_active());
    }
}
