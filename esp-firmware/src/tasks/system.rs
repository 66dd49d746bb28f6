// System Task - verzögerter Software-Reset nach /restart
use defmt::{info, warn};
use embassy_time::Timer;

use crate::RestartSignal;
use crate::config::RESTART_DELAY_MS;

/// Wartet auf das Restart-Signal des HTTP-Servers
///
/// Die Verzögerung gibt dem HTTP-Task Zeit, die Antwort noch zu senden.
#[embassy_executor::task]
pub async fn restart_task(signal: &'static RestartSignal) {
    signal.wait().await;
    warn!("System: restart requested, resetting in {} ms", RESTART_DELAY_MS);

    Timer::after_millis(RESTART_DELAY_MS).await;
    info!("System: software reset");
    esp_hal::system::software_reset()
}
