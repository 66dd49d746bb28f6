//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Command-Queue, den Aktor-Worker, die zeitgesteuerten
//! LED-Primitive (Blink, Pulse, Morse) und die Traits für den Hardware-Zugriff.

#![no_std]

// Muss vor den anderen Modulen stehen (Makros)
#[macro_use]
mod fmt;

pub mod engine;
pub mod error;
pub mod logic;
pub mod morse;
pub mod params;
pub mod primitives;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use engine::{ActuationEngine, ActuationWorker};
pub use error::{QueueFull, RequestError, WorkerError};
pub use logic::{clamp_duty, duty_to_color};
pub use morse::{Element, Level, MorseEncoder, MorseTable};
pub use params::{BlinkQuery, MorseQuery, PulseQuery};
pub use traits::{ActuatorDelay, DutyWriter, LedError};
pub use types::{Command, CommandKind, EngineStatus, MorseText, MorseTiming};
