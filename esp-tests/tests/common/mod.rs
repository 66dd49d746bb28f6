//! Gemeinsame Mocks für die Integration Tests
//!
//! Alle Mocks teilen sich eine virtuelle Uhr: `MockDelay` schaltet sie weiter,
//! `MockDutyWriter` stempelt jeden Schreibzugriff mit der aktuellen Zeit.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esp_core::{ActuationEngine, ActuatorDelay, DutyWriter, LedError};

pub type Engine = ActuationEngine<CriticalSectionRawMutex>;

// ============================================================================
// Virtuelle Uhr
// ============================================================================

#[derive(Clone, Default)]
pub struct VirtualClock(Arc<AtomicU64>);

impl VirtualClock {
    pub fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn advance(&self, ms: u32) {
        self.0.fetch_add(u64::from(ms), Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Duty Writer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyEvent {
    pub at_ms: u64,
    pub duty: u16,
}

#[derive(Default)]
pub struct MockDutyWriter {
    pub clock: VirtualClock,
    pub events: Vec<DutyEvent>,
    pub last_duty: Option<u16>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockDutyWriter {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Nur die geschriebenen Duty-Werte, ohne Zeitstempel
    pub fn duties(&self) -> Vec<u16> {
        self.events.iter().map(|e| e.duty).collect()
    }

    /// (Duty, Haltedauer) für jeden Schreibzugriff außer dem letzten
    pub fn phases(&self) -> Vec<(u16, u64)> {
        self.events
            .windows(2)
            .map(|w| (w[0].duty, w[1].at_ms - w[0].at_ms))
            .collect()
    }
}

impl DutyWriter for MockDutyWriter {
    fn set_duty(&mut self, duty: u16) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.events.push(DutyEvent {
            at_ms: self.clock.now_ms(),
            duty,
        });
        self.last_duty = Some(duty);
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Delays
// ============================================================================

/// Wartet nicht wirklich, sondern schaltet die virtuelle Uhr weiter
#[derive(Default)]
pub struct MockDelay {
    pub clock: VirtualClock,
    pub calls: Vec<u32>,
}

impl MockDelay {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            calls: Vec::new(),
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.calls.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl ActuatorDelay for MockDelay {
    async fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(ms);
        self.calls.push(ms);
    }
}

/// Echte Wartezeit über `std::thread::sleep`
pub struct StdDelay;

impl ActuatorDelay for StdDelay {
    async fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// LED-Mock und Delay auf derselben virtuellen Uhr
pub fn mock_pair() -> (MockDutyWriter, MockDelay) {
    let clock = VirtualClock::default();
    (MockDutyWriter::new(clock.clone()), MockDelay::new(clock))
}
