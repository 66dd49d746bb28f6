// Duty-Writer für die WS2812 LED auf dem ESP32-C6 Board
//
// Die Board-LED hat kein PWM. Der Duty-Wert (0-1023) wird über
// esp_core::duty_to_color auf die Farbkanäle abgebildet und per RMT geschrieben.

use esp_core::{DutyWriter, LedError, duty_to_color};
use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::LED_BUFFER_SIZE;

/// Duty-Writer über das RMT Peripheral
///
/// Der Buffer muss im Task leben (smart_led_buffer!) und wird als
/// Parameter übergeben.
pub struct RmtDutyWriter<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    full_color: RGB8,
    last_duty: Option<u16>,
}

impl<'a> RmtDutyWriter<'a> {
    /// Erstellt einen neuen RmtDutyWriter
    ///
    /// # Parameter
    /// - `gpio8`: GPIO8 Peripheral für LED-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(LED_COUNT))
    /// - `full_color`: Farbe bei Duty = 1023
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; LED_BUFFER_SIZE],
        full_color: RGB8,
    ) -> Result<Self, LedError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| LedError::InitFailed)?;
        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Ok(Self {
            led,
            full_color,
            last_duty: None,
        })
    }
}

impl DutyWriter for RmtDutyWriter<'_> {
    fn set_duty(&mut self, duty: u16) -> Result<(), LedError> {
        // Gleicher Wert: kein erneuter RMT-Transfer (Pulse-Rampen mit kleinem speed)
        if self.last_duty == Some(duty) {
            return Ok(());
        }

        let color = duty_to_color(duty, self.full_color);
        self.led
            .write([color].into_iter())
            .map_err(|_| LedError::WriteFailed)?;
        self.last_duty = Some(duty);
        Ok(())
    }
}
