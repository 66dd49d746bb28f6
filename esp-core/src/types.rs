//! Core Types für die LED-Aktorik
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Maximaler Duty-Wert (10 Bit PWM-Skala)
pub const DUTY_MAX: u16 = 1023;

/// Kapazität der Command-Queue
pub const QUEUE_CAPACITY: usize = 20;

/// Maximale Länge eines Morse-Texts in Bytes
pub const MORSE_TEXT_CAPACITY: usize = 64;

/// Haltezeit pro Rampenstufe beim Pulsieren
pub const PULSE_STEP_MS: u32 = 10;

// Defaults für Parameter, die der Aufrufer weglässt
pub const DEFAULT_BLINK_COUNT: u32 = 3;
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 200;
pub const DEFAULT_PULSE_SPEED: u16 = 20;
pub const DEFAULT_PULSE_MIN_DUTY: u16 = 0;
pub const DEFAULT_PULSE_MAX_DUTY: u16 = DUTY_MAX;
pub const DEFAULT_PULSE_TIMES: u32 = 1;

// Obergrenzen für Query-Parameter: ein einzelnes Command darf den
// einzigen Worker nur begrenzt lange belegen
pub const MAX_BLINK_COUNT: u32 = 50;
pub const MAX_BLINK_INTERVAL_MS: u32 = 5_000;
pub const MAX_PULSE_TIMES: u32 = 20;
pub const MAX_MORSE_DURATION_MS: u32 = 2_000;

/// Morse-Text mit fester Kapazität (no_std, passt in einen Queue-Slot)
pub type MorseText = heapless::String<MORSE_TEXT_CAPACITY>;

/// Zeitparameter für die Morse-Ausgabe in Millisekunden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorseTiming {
    pub dot_ms: u32,
    pub dash_ms: u32,
    /// Pause zwischen Punkt/Strich innerhalb eines Zeichens
    pub element_gap_ms: u32,
    /// Pause zwischen zwei Zeichen
    pub letter_gap_ms: u32,
    /// Pause für ein Leerzeichen
    pub word_gap_ms: u32,
}

impl Default for MorseTiming {
    fn default() -> Self {
        Self {
            dot_ms: 100,
            dash_ms: 300,
            element_gap_ms: 100,
            letter_gap_ms: 300,
            word_gap_ms: 700,
        }
    }
}

/// Aktor-Kommando für die Queue
///
/// Wird vom HTTP-Router in die Queue gelegt und vom Worker ausgeführt.
/// Ownership geht vollständig vom Producer an die Queue und dann an den Worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// LED dauerhaft an oder aus
    SetSteady { on: bool },
    /// `count` mal blinken, je Phase `interval_ms / 2`
    Blink { count: u32, interval_ms: u32 },
    /// Atmender Helligkeitsverlauf zwischen `min_duty` und `max_duty`
    Pulse {
        speed: u16,
        min_duty: u16,
        max_duty: u16,
        times: u32,
    },
    /// Text als Morse-Code blinken
    Morse { text: MorseText, timing: MorseTiming },
}

/// Diskriminante eines Commands (für Logging und Status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    SetSteady,
    Blink,
    Pulse,
    Morse,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SetSteady { .. } => CommandKind::SetSteady,
            Command::Blink { .. } => CommandKind::Blink,
            Command::Pulse { .. } => CommandKind::Pulse,
            Command::Morse { .. } => CommandKind::Morse,
        }
    }
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::SetSteady => "set_steady",
            CommandKind::Blink => "blink",
            CommandKind::Pulse => "pulse",
            CommandKind::Morse => "morse",
        }
    }
}

/// Momentaufnahme des Engine-Zustands für Status-Reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineStatus {
    /// Zuletzt gesetzter Dauerzustand (LedState)
    pub led_on: bool,
    pub queue_depth: usize,
    pub queue_capacity: usize,
    pub worker_running: bool,
    /// Worker führt gerade ein Command aus
    pub busy: bool,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Command::SetSteady { on } => defmt::write!(fmt, "SetSteady {{ on: {} }}", on),
            Command::Blink { count, interval_ms } => {
                defmt::write!(
                    fmt,
                    "Blink {{ count: {}, interval_ms: {} }}",
                    count,
                    interval_ms
                )
            }
            Command::Pulse {
                speed,
                min_duty,
                max_duty,
                times,
            } => {
                defmt::write!(
                    fmt,
                    "Pulse {{ speed: {}, duty: {}..{}, times: {} }}",
                    speed,
                    min_duty,
                    max_duty,
                    times
                )
            }
            Command::Morse { text, timing } => {
                defmt::write!(
                    fmt,
                    "Morse {{ text: {}, dot: {}ms, dash: {}ms }}",
                    text.as_str(),
                    timing.dot_ms,
                    timing.dash_ms
                )
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandKind {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}
