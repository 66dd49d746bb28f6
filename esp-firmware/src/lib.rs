// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// HTTP-Antworten werden auf dem Heap gebaut (esp-alloc)
extern crate alloc;

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von esp-core
pub use esp_core::{
    ActuationEngine, Command, DutyWriter, EngineStatus, LedError, QueueFull, RequestError,
};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

// ============================================================================
// Type-Aliase für geteilte Ressourcen
// ============================================================================

/// Die eine Actuation Engine des Geräts (Queue + LedState)
///
/// CriticalSectionRawMutex, da HTTP-Tasks (Producer) und Aktor-Task
/// (Consumer) über `&'static` Referenz zugreifen.
pub type LedEngine = ActuationEngine<CriticalSectionRawMutex>;

/// Signal für verzögerten Neustart (HTTP /restart → Restart-Task)
pub type RestartSignal = Signal<CriticalSectionRawMutex, ()>;
