// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use rgb::RGB8;

// ============================================================================
// LED Konfiguration
// ============================================================================

// Datenleitung der RGB LED (WS2812) ist GPIO8, siehe actuator_task

/// Helligkeits-Level für die LED bei Duty = 1023 (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 40;

/// Farbe der LED bei voller Aussteuerung (weiß, gedimmt)
/// Zwischenwerte (Pulse) werden linear skaliert
pub const LED_FULL_COLOR: RGB8 = RGB8 {
    r: LED_BRIGHTNESS,
    g: LED_BRIGHTNESS,
    b: LED_BRIGHTNESS,
};

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Anzahl der LEDs im Strip
pub const LED_COUNT: usize = 1;

/// RMT-Buffer: 24 Pulse pro LED (3 Farben * 8 Bits) + 1 Reset
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Polling-Intervall beim Warten auf Link/DHCP
pub const NETWORK_POLL_MS: u64 = 500;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
/// Antwort-Strings der HTTP-Handler werden hier allokiert
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// TCP-Port des HTTP-Servers
pub const HTTP_PORT: u16 = 80;

/// HTTP Buffer-Größe in Bytes
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// JSON Serialisierungs-Buffer für /status und /memory
pub const JSON_BUFFER_SIZE: usize = 256;

/// Retry-After Header (Sekunden) bei voller Command-Queue
pub const BUSY_RETRY_AFTER: &str = "2";

// ============================================================================
// System
// ============================================================================

/// Verzögerung zwischen /restart-Antwort und Software-Reset
/// Damit die HTTP-Antwort noch rausgeht
pub const RESTART_DELAY_MS: u64 = 1000;
