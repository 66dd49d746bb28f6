//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// Peripheral konnte nicht initialisiert werden
    InitFailed,
    WriteFailed,
}

/// Trait für den Duty-Treiber der LED
///
/// Abstrahiert die proportionale Ansteuerung (0 = aus, `DUTY_MAX` = voll an).
///
/// # Implementierungen
/// - **Production:** RmtDutyWriter (WS2812 über ESP32 RMT Peripheral)
/// - **Testing:** MockDutyWriter (in-memory Mock mit Trace)
pub trait DutyWriter: Send {
    /// Setzt die Helligkeit der LED
    ///
    /// Werte über `DUTY_MAX` werden von der Implementierung begrenzt.
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set_duty(&mut self, duty: u16) -> Result<(), LedError>;
}

impl<T: DutyWriter + ?Sized> DutyWriter for &mut T {
    fn set_duty(&mut self, duty: u16) -> Result<(), LedError> {
        (**self).set_duty(duty)
    }
}

/// Trait für Wartezeiten innerhalb der Primitive
///
/// Im Firmware-Build über `embassy_time::Timer`, in Tests über eine
/// virtuelle Uhr oder `std::thread::sleep`.
#[allow(async_fn_in_trait)]
pub trait ActuatorDelay {
    async fn delay_ms(&mut self, ms: u32);
}

impl<T: ActuatorDelay + ?Sized> ActuatorDelay for &mut T {
    async fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms).await
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::InitFailed => defmt::write!(fmt, "LED init failed"),
            LedError::WriteFailed => defmt::write!(fmt, "LED write failed"),
        }
    }
}
