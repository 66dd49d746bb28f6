// Wartezeiten der Aktor-Primitive über embassy-time

use embassy_time::Timer;
use esp_core::ActuatorDelay;

/// Async Delay: gibt die CPU während der Haltezeiten an andere Tasks zurück
pub struct EmbassyDelay;

impl ActuatorDelay for EmbassyDelay {
    async fn delay_ms(&mut self, ms: u32) {
        Timer::after_millis(u64::from(ms)).await;
    }
}
