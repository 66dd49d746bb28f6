// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus esp-core (DutyWriter, ActuatorDelay)
// für die echte Hardware.

pub mod delay;
pub mod led_writer;

pub use delay::EmbassyDelay;
pub use led_writer::RmtDutyWriter;
