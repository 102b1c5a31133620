//! OLED screens.
//!
//! Drawing is generic over any `BinaryColor` draw target, so the firmware
//! renders into the SSD1306 frame buffer and tests render into memory.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::countdown::CountdownSnapshot;
use crate::menu::ConfigMenu;

/// One line of text; 21 characters fit across the panel at 6 px each.
pub type Line = String<24>;

const FRAME_ORIGIN: Point = Point::new(3, 3);
const FRAME_SIZE: Size = Size::new(DISPLAY_WIDTH - 4, DISPLAY_HEIGHT - 4);
const TEXT_X: i32 = 10;
const LINE_Y: [i32; 3] = [10, 26, 42];

/// Title, parameter label and cursor value for the menu screen.
pub fn menu_lines(menu: &ConfigMenu) -> [Line; 3] {
    let mut title = Line::new();
    let mut label = Line::new();
    let mut value = Line::new();

    let _ = title.push_str("POMODORO");
    match (menu.parameter(), menu.current_value()) {
        (Some(parameter), Some(current)) => {
            let _ = write!(label, "{}/3 {}", parameter.ordinal() + 1, parameter.label());
            let _ = write!(value, "<  {}  >", current);
        }
        _ => {
            let _ = label.push_str("Starting...");
        }
    }
    [title, label, value]
}

/// Cycles left, work progress and break progress.
pub fn countdown_lines(snapshot: &CountdownSnapshot) -> [Line; 3] {
    let mut cycles = Line::new();
    let mut work = Line::new();
    let mut rest = Line::new();

    let _ = write!(cycles, "Cycles left: {}", snapshot.cycles_remaining);
    let _ = write!(
        work,
        "Work: {}/{} min",
        snapshot.elapsed_work_minutes, snapshot.plan.work_minutes
    );
    let _ = write!(
        rest,
        "Break: {}/{} min",
        snapshot.elapsed_break_minutes, snapshot.plan.break_minutes
    );
    [cycles, work, rest]
}

/// Serial status report, e.g. `State: WORKING cycles=2 work=3/25 break=0/5`.
pub fn status_line(snapshot: &CountdownSnapshot) -> String<64> {
    let mut line = String::new();
    let _ = write!(
        line,
        "State: {} cycles={} work={}/{} break={}/{}",
        snapshot.phase.name(),
        snapshot.cycles_remaining,
        snapshot.elapsed_work_minutes,
        snapshot.plan.work_minutes,
        snapshot.elapsed_break_minutes,
        snapshot.plan.break_minutes,
    );
    line
}

pub fn draw_menu<D>(target: &mut D, menu: &ConfigMenu) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_screen(target, &menu_lines(menu))
}

pub fn draw_countdown<D>(target: &mut D, snapshot: &CountdownSnapshot) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_screen(target, &countdown_lines(snapshot))
}

fn draw_screen<D>(target: &mut D, lines: &[Line; 3]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    let frame = PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::On)
        .stroke_width(1)
        .fill_color(BinaryColor::Off)
        .build();
    Rectangle::new(FRAME_ORIGIN, FRAME_SIZE)
        .into_styled(frame)
        .draw(target)?;

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    for (line, y) in lines.iter().zip(LINE_Y) {
        Text::with_baseline(line, Point::new(TEXT_X, y), style, Baseline::Top).draw(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::Phase;
    use crate::options::SessionPlan;
    use core::convert::Infallible;

    struct Canvas {
        pixels: [[bool; 128]; 64],
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                pixels: [[true; 128]; 64],
            }
        }

        fn lit(&self, x: usize, y: usize) -> bool {
            self.pixels[y][x]
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
        where
            I: IntoIterator<Item = Pixel<BinaryColor>>,
        {
            for Pixel(point, color) in pixels {
                if (0..128).contains(&point.x) && (0..64).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    fn snapshot() -> CountdownSnapshot {
        CountdownSnapshot {
            phase: Phase::OnBreak,
            plan: SessionPlan {
                cycles: 4,
                work_minutes: 25,
                break_minutes: 10,
            },
            cycles_remaining: 3,
            elapsed_work_minutes: 25,
            elapsed_break_minutes: 7,
            sound_requested: false,
        }
    }

    #[test]
    fn countdown_lines_show_progress() {
        let [cycles, work, rest] = countdown_lines(&snapshot());
        assert_eq!(cycles.as_str(), "Cycles left: 3");
        assert_eq!(work.as_str(), "Work: 25/25 min");
        assert_eq!(rest.as_str(), "Break: 7/10 min");
    }

    #[test]
    fn status_line_names_the_phase() {
        assert_eq!(
            status_line(&snapshot()).as_str(),
            "State: ON_BREAK cycles=3 work=25/25 break=7/10"
        );
    }

    #[test]
    fn menu_lines_show_parameter_and_value() {
        let mut menu = ConfigMenu::new();
        menu.commit();
        menu.apply_reading(4000);

        let [title, label, value] = menu_lines(&menu);
        assert_eq!(title.as_str(), "POMODORO");
        assert_eq!(label.as_str(), "2/3 Work min");
        assert_eq!(value.as_str(), "<  25  >");
    }

    #[test]
    fn screen_clears_and_draws_frame() {
        let mut canvas = Canvas::new();
        draw_countdown(&mut canvas, &snapshot()).unwrap();

        assert!(!canvas.lit(0, 0));
        assert!(!canvas.lit(127, 63));
        assert!(canvas.lit(3, 3));
        assert!(canvas.lit(126, 62));
        assert!(canvas.lit(3, 40));
        assert!(!canvas.lit(5, 60));
    }
}
