// JSON-Antworten der HTTP-Endpunkte
// Feldnamen entsprechen dem bestehenden Remote-Tool (led_state, uptime_seconds, ...)

use esp_core::EngineStatus;
use serde::Serialize;

/// Antwort auf GET /status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusResponse<'a> {
    /// "ON" oder "OFF" (LedState, nicht der momentane Pegel)
    pub led_state: &'static str,
    pub uptime_seconds: u64,
    /// IPv4-Adresse oder "Not connected"
    pub ip_address: &'a str,
    pub queue_depth: usize,
    pub queue_capacity: usize,
    pub worker_running: bool,
    pub busy: bool,
}

impl<'a> StatusResponse<'a> {
    pub fn new(status: EngineStatus, uptime_seconds: u64, ip_address: &'a str) -> Self {
        Self {
            led_state: if status.led_on { "ON" } else { "OFF" },
            uptime_seconds,
            ip_address,
            queue_depth: status.queue_depth,
            queue_capacity: status.queue_capacity,
            worker_running: status.worker_running,
            busy: status.busy,
        }
    }
}

/// Antwort auf GET /memory (Heap-Statistik von esp-alloc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryResponse {
    pub free: usize,
    pub allocated: usize,
    pub total: usize,
    /// Freier Anteil in Promille / 10, z.B. "73.4"
    pub free_percent: FreePercent,
}

impl MemoryResponse {
    pub fn new(free: usize, allocated: usize) -> Self {
        let total = free + allocated;
        let permille = if total == 0 {
            0
        } else {
            (free as u64 * 1000 / total as u64) as u32
        };
        Self {
            free,
            allocated,
            total,
            free_percent: FreePercent(permille),
        }
    }
}

/// Prozentwert mit einer Nachkommastelle, als JSON-String serialisiert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreePercent(pub u32);

impl Serialize for FreePercent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = alloc::format!("{}.{}", self.0 / 10, self.0 % 10);
        serializer.serialize_str(&text)
    }
}
