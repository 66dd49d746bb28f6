//! Aktor-Primitive
//!
//! Deterministische, zeitgesteuerte Sequenzen auf dem Duty-Treiber.
//! Jedes Primitiv läuft bis zum Ende durch; ein Hardware-Fehler bricht
//! nur die restlichen Schritte dieses Primitivs ab.

use crate::logic::{fade_in_steps, fade_out_steps, is_degenerate_ramp};
use crate::morse::{Level, MorseEncoder, MorseTable};
use crate::traits::{ActuatorDelay, DutyWriter, LedError};
use crate::types::{DUTY_MAX, MorseTiming, PULSE_STEP_MS};

/// Duty-Wert für einen Dauerzustand
pub const fn steady_duty(on: bool) -> u16 {
    if on { DUTY_MAX } else { 0 }
}

/// Setzt die LED sofort auf voll an oder aus
pub fn set_steady<D: DutyWriter>(led: &mut D, on: bool) -> Result<(), LedError> {
    led.set_duty(steady_duty(on))
}

/// Blinkt `count` mal: je `interval_ms / 2` an, dann `interval_ms / 2` aus
///
/// Danach wird der Dauerzustand `steady_on` wiederhergestellt, auch wenn
/// `count == 0` ist.
pub async fn blink<D: DutyWriter, T: ActuatorDelay>(
    led: &mut D,
    delay: &mut T,
    count: u32,
    interval_ms: u32,
    steady_on: bool,
) -> Result<(), LedError> {
    let half = interval_ms / 2;
    for _ in 0..count {
        led.set_duty(DUTY_MAX)?;
        delay.delay_ms(half).await;
        led.set_duty(0)?;
        delay.delay_ms(half).await;
    }
    set_steady(led, steady_on)
}

/// Atmender Helligkeitsverlauf
///
/// Pro Durchlauf: Rampe von `min_duty` nach `max_duty` in Schritten von
/// `speed`, dann zurück. Jede Stufe wird `PULSE_STEP_MS` gehalten.
/// Bei `speed == 0` oder `min_duty >= max_duty` gibt es keine Stufen.
/// Am Ende ist die LED immer aus (kein Wiederherstellen des Dauerzustands).
pub async fn pulse<D: DutyWriter, T: ActuatorDelay>(
    led: &mut D,
    delay: &mut T,
    speed: u16,
    min_duty: u16,
    max_duty: u16,
    times: u32,
) -> Result<(), LedError> {
    if is_degenerate_ramp(speed, min_duty, max_duty) {
        return led.set_duty(0);
    }

    for _ in 0..times {
        for duty in fade_in_steps(speed, min_duty, max_duty) {
            led.set_duty(duty)?;
            delay.delay_ms(PULSE_STEP_MS).await;
        }
        for duty in fade_out_steps(speed, min_duty, max_duty) {
            led.set_duty(duty)?;
            delay.delay_ms(PULSE_STEP_MS).await;
        }
    }
    led.set_duty(0)
}

/// Spielt einen Text als Morse-Code ab
///
/// Unbekannte Zeichen werden übersprungen. Am Ende ist die LED aus.
pub async fn play_morse<D: DutyWriter, T: ActuatorDelay>(
    led: &mut D,
    delay: &mut T,
    text: &str,
    timing: MorseTiming,
    table: MorseTable,
) -> Result<(), LedError> {
    for element in MorseEncoder::with_table(text, timing, table) {
        let duty = match element.level {
            Level::On => DUTY_MAX,
            Level::Off => 0,
        };
        led.set_duty(duty)?;
        delay.delay_ms(element.ms).await;
    }
    led.set_duty(0)
}
