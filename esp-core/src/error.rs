//! Fehler-Typen für Queue, Request-Parameter und Worker

use core::fmt;

/// Queue ist voll, das Command wurde abgelehnt
///
/// Wird nie automatisch wiederholt. Der Router meldet es dem Aufrufer
/// (HTTP 503 "Server busy").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

/// Fehler beim Annehmen eines Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Parameter fehlerhaft (Name des Query-Parameters)
    InvalidParameter(&'static str),
    /// Queue ist voll
    QueueFull,
}

/// Fehler beim Erzeugen des Workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerError {
    /// Es existiert bereits ein Worker für diese Engine
    AlreadyRunning,
}

impl From<QueueFull> for RequestError {
    fn from(_: QueueFull) -> Self {
        RequestError::QueueFull
    }
}

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command queue full")
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidParameter(name) => write!(f, "invalid parameter: {}", name),
            RequestError::QueueFull => f.write_str("command queue full"),
        }
    }
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::AlreadyRunning => f.write_str("worker already running"),
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for QueueFull {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Queue full")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RequestError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RequestError::InvalidParameter(name) => {
                defmt::write!(fmt, "Invalid parameter: {}", name)
            }
            RequestError::QueueFull => defmt::write!(fmt, "Queue full"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WorkerError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            WorkerError::AlreadyRunning => defmt::write!(fmt, "Worker already running"),
        }
    }
}
