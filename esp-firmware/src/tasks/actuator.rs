// Aktor-Task - einziger Consumer der Command-Queue
use defmt::{error, info};
use esp_hal_smartled::smart_led_buffer;

use crate::LedEngine;
use crate::config::{LED_COUNT, LED_FULL_COLOR, RMT_CLOCK_MHZ};
use crate::hal::{EmbassyDelay, RmtDutyWriter};
use esp_core::{ActuatorDelay, DutyWriter};

/// Aktor-Logik - Testbar ohne Hardware-Abhängigkeit
///
/// Schaltet die LED aus, beansprucht den Worker der Engine und arbeitet
/// danach Commands in FIFO-Reihenfolge ab. Kehrt nur zurück, wenn bereits
/// ein anderer Worker läuft.
///
/// # Parameter
/// - `engine`: geteilte Engine (Queue + LedState)
/// - `led`: Duty-Writer (Hardware oder Mock)
/// - `delay`: Wartezeiten der Primitive
pub async fn actuator_logic<D: DutyWriter, T: ActuatorDelay>(
    engine: &LedEngine,
    mut led: D,
    delay: T,
) {
    // Definierter Startzustand: LED aus, passend zu LedState = OFF
    if let Err(e) = led.set_duty(0) {
        error!("Actuator: initial write failed: {}", e);
    }

    let worker = match engine.worker(led, delay) {
        Ok(worker) => worker,
        Err(e) => {
            error!("Actuator: {}", e);
            return;
        }
    };

    info!("Actuator: worker running, waiting for commands");
    worker.run().await
}

/// Aktor Task - Embassy Task Wrapper
///
/// Erstellt den RmtDutyWriter und ruft `actuator_logic` auf.
#[embassy_executor::task]
pub async fn actuator_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    engine: &'static LedEngine,
) {
    info!("Actuator: task starting");

    let mut buffer = smart_led_buffer!(LED_COUNT);

    let led = match RmtDutyWriter::new(
        gpio8,
        rmt_peripheral,
        RMT_CLOCK_MHZ,
        &mut buffer,
        LED_FULL_COLOR,
    ) {
        Ok(led) => led,
        Err(e) => {
            error!("Actuator: LED init failed: {}", e);
            return;
        }
    };

    actuator_logic(engine, led, EmbassyDelay).await
}
