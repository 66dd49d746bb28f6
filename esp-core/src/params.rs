//! Query-Parameter der HTTP-Endpunkte
//!
//! Der Router deserialisiert die Query-Strings in diese Structs (Feature
//! `serde`). `to_command()` setzt Defaults für fehlende Werte und prüft die
//! Grenzen, bevor etwas in die Queue gelangt.

use crate::error::RequestError;
use crate::types::*;

/// Parameter für `/led/blink?count=..&interval=..`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct BlinkQuery {
    pub count: Option<u32>,
    pub interval: Option<u32>,
}

/// Parameter für `/led/pulse?speed=..&min=..&max=..&times=..`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct PulseQuery {
    pub speed: Option<u16>,
    pub min: Option<u16>,
    pub max: Option<u16>,
    pub times: Option<u32>,
}

/// Parameter für `/led/morse?text=..&dot=..&dash=..&gap=..&letter_gap=..&word_gap=..`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct MorseQuery {
    pub text: Option<MorseText>,
    pub dot: Option<u32>,
    pub dash: Option<u32>,
    pub gap: Option<u32>,
    pub letter_gap: Option<u32>,
    pub word_gap: Option<u32>,
}

impl BlinkQuery {
    pub fn to_command(&self) -> Result<Command, RequestError> {
        let count = self.count.unwrap_or(DEFAULT_BLINK_COUNT);
        let interval_ms = self.interval.unwrap_or(DEFAULT_BLINK_INTERVAL_MS);
        Ok(Command::Blink {
            count: limit_param("count", count, MAX_BLINK_COUNT)?,
            interval_ms: limit_param("interval", interval_ms, MAX_BLINK_INTERVAL_MS)?,
        })
    }
}

impl PulseQuery {
    pub fn to_command(&self) -> Result<Command, RequestError> {
        let min_duty = duty_param("min", self.min.unwrap_or(DEFAULT_PULSE_MIN_DUTY))?;
        let max_duty = duty_param("max", self.max.unwrap_or(DEFAULT_PULSE_MAX_DUTY))?;

        // 0 würde endlos pulsieren und den einzigen Worker blockieren
        let times = self.times.unwrap_or(DEFAULT_PULSE_TIMES);
        if times == 0 {
            return Err(RequestError::InvalidParameter("times"));
        }
        let times = limit_param("times", times, MAX_PULSE_TIMES)?;

        Ok(Command::Pulse {
            speed: self.speed.unwrap_or(DEFAULT_PULSE_SPEED),
            min_duty,
            max_duty,
            times,
        })
    }
}

impl MorseQuery {
    pub fn to_command(&self) -> Result<Command, RequestError> {
        let text = match &self.text {
            Some(text) => morse_text(text)?,
            None => return Err(RequestError::InvalidParameter("text")),
        };

        let defaults = MorseTiming::default();
        let timing = MorseTiming {
            dot_ms: duration_param("dot", self.dot.unwrap_or(defaults.dot_ms))?,
            dash_ms: duration_param("dash", self.dash.unwrap_or(defaults.dash_ms))?,
            element_gap_ms: duration_param("gap", self.gap.unwrap_or(defaults.element_gap_ms))?,
            letter_gap_ms: duration_param(
                "letter_gap",
                self.letter_gap.unwrap_or(defaults.letter_gap_ms),
            )?,
            word_gap_ms: duration_param("word_gap", self.word_gap.unwrap_or(defaults.word_gap_ms))?,
        };

        Ok(Command::Morse { text, timing })
    }
}

/// Prüft einen Morse-Text: nicht leer (nach Trim), höchstens `MORSE_TEXT_CAPACITY` Bytes
pub fn morse_text(text: &str) -> Result<MorseText, RequestError> {
    if text.trim().is_empty() {
        return Err(RequestError::InvalidParameter("text"));
    }
    MorseText::try_from(text).map_err(|_| RequestError::InvalidParameter("text"))
}

fn duty_param(name: &'static str, duty: u16) -> Result<u16, RequestError> {
    if duty > DUTY_MAX {
        return Err(RequestError::InvalidParameter(name));
    }
    Ok(duty)
}

fn duration_param(name: &'static str, ms: u32) -> Result<u32, RequestError> {
    if ms == 0 {
        return Err(RequestError::InvalidParameter(name));
    }
    limit_param(name, ms, MAX_MORSE_DURATION_MS)
}

fn limit_param(name: &'static str, value: u32, max: u32) -> Result<u32, RequestError> {
    if value > max {
        return Err(RequestError::InvalidParameter(name));
    }
    Ok(value)
}
