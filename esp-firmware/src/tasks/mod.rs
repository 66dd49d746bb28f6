// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// HTTP-Tasks legen Commands in die Engine-Queue, der Aktor-Task arbeitet sie ab.

pub mod actuator;
pub mod http;
pub mod system;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use actuator::{actuator_logic, actuator_task};
pub use http::http_server_task;
pub use system::restart_task;
pub use wifi::{connection_task, dhcp_task, net_task};
