//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::iter::{Rev, StepBy};
use core::ops::{Range, RangeInclusive};

use rgb::RGB8;

use crate::types::DUTY_MAX;

/// Begrenzt einen Duty-Wert auf `0..=DUTY_MAX`
pub fn clamp_duty(duty: u16) -> u16 {
    duty.min(DUTY_MAX)
}

/// Skaliert eine Vollfarbe linear mit dem Duty-Wert
///
/// Die WS2812 LED auf dem ESP32-C6 Board hat kein PWM-Tastverhältnis,
/// daher wird die Helligkeit über die Farbkanäle nachgebildet.
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use esp_core::duty_to_color;
/// let full = RGB8 { r: 40, g: 40, b: 40 };
/// assert_eq!(duty_to_color(0, full), RGB8 { r: 0, g: 0, b: 0 });
/// assert_eq!(duty_to_color(1023, full), full);
/// ```
pub fn duty_to_color(duty: u16, full: RGB8) -> RGB8 {
    let duty = u32::from(clamp_duty(duty));
    let max = u32::from(DUTY_MAX);
    let scale = |c: u8| (u32::from(c) * duty / max) as u8;
    RGB8 {
        r: scale(full.r),
        g: scale(full.g),
        b: scale(full.b),
    }
}

/// Rampe nach oben: `min, min + speed, ...` solange `< max`
///
/// Bei `speed == 0` oder `min >= max` ist die Rampe leer.
pub fn fade_in_steps(speed: u16, min_duty: u16, max_duty: u16) -> StepBy<Range<u16>> {
    let range = if is_degenerate_ramp(speed, min_duty, max_duty) {
        0..0
    } else {
        min_duty..max_duty
    };
    range.step_by(usize::from(speed.max(1)))
}

/// Rampe nach unten: `max, max - speed, ...` solange `> min`
///
/// Bei `speed == 0` oder `min >= max` ist die Rampe leer.
pub fn fade_out_steps(speed: u16, min_duty: u16, max_duty: u16) -> StepBy<Rev<RangeInclusive<u16>>> {
    #[allow(clippy::reversed_empty_ranges)]
    let range = if is_degenerate_ramp(speed, min_duty, max_duty) {
        1..=0
    } else {
        min_duty + 1..=max_duty
    };
    range.rev().step_by(usize::from(speed.max(1)))
}

/// Rampe ohne Stufen (`speed == 0` oder `min >= max`)
pub fn is_degenerate_ramp(speed: u16, min_duty: u16, max_duty: u16) -> bool {
    speed == 0 || min_duty >= max_duty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_duty() {
        assert_eq!(clamp_duty(0), 0);
        assert_eq!(clamp_duty(1023), 1023);
        assert_eq!(clamp_duty(4000), 1023);
    }

    #[test]
    fn test_duty_to_color_half() {
        let full = RGB8 { r: 200, g: 100, b: 0 };
        let half = duty_to_color(512, full);
        assert_eq!(half, RGB8 { r: 100, g: 50, b: 0 });
    }

    #[test]
    fn test_duty_to_color_clamps_overflow() {
        let full = RGB8 { r: 10, g: 20, b: 30 };
        assert_eq!(duty_to_color(u16::MAX, full), full);
    }

    #[test]
    fn test_fade_in_steps() {
        let mut steps = fade_in_steps(20, 0, 100);
        for expected in [0, 20, 40, 60, 80] {
            assert_eq!(steps.next(), Some(expected));
        }
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_fade_out_steps() {
        let mut steps = fade_out_steps(20, 0, 100);
        for expected in [100, 80, 60, 40, 20] {
            assert_eq!(steps.next(), Some(expected));
        }
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_fade_steps_uneven_speed() {
        // Wie range(min, max, speed): der Endwert wird nicht erreicht
        assert_eq!(fade_in_steps(30, 0, 100).count(), 4); // 0, 30, 60, 90
        assert_eq!(fade_out_steps(30, 0, 100).count(), 4); // 100, 70, 40, 10
    }

    #[test]
    fn test_degenerate_ramps_are_empty() {
        assert_eq!(fade_in_steps(0, 0, 1023).count(), 0);
        assert_eq!(fade_out_steps(0, 0, 1023).count(), 0);
        assert_eq!(fade_in_steps(20, 500, 500).count(), 0);
        assert_eq!(fade_out_steps(20, 800, 100).count(), 0);
    }
}
