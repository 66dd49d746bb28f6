// WiFi Tasks - Station-Verbindung, Netzwerk-Stack und DHCP-Überwachung
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::config::{NETWORK_POLL_MS, WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// Startet den Controller im Station-Modus, falls noch nicht geschehen
async fn ensure_started(controller: &mut WifiController<'static>) -> bool {
    if !matches!(controller.is_started(), Ok(false)) {
        return true;
    }

    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    );
    if let Err(e) = controller.set_config(&client_config) {
        error!("WiFi: invalid configuration: {}", Debug2Format(&e));
        return false;
    }
    if let Err(e) = controller.start_async().await {
        error!("WiFi: start failed: {}", Debug2Format(&e));
        return false;
    }

    info!("WiFi: station started");
    true
}

/// WiFi Connection Task
///
/// Verbindet mit dem Access Point und verbindet nach einem Abbruch
/// erneut. Fehlgeschlagene Versuche werden nach `WIFI_RETRY_DELAY_SECS`
/// wiederholt. Der Aktor-Task läuft unabhängig davon weiter.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    let retry_delay = Duration::from_secs(WIFI_RETRY_DELAY_SECS);

    loop {
        if !ensure_started(&mut controller).await {
            Timer::after(retry_delay).await;
            continue;
        }

        info!("WiFi: connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            warn!("WiFi: connection failed: {}", Debug2Format(&e));
            Timer::after(retry_delay).await;
            continue;
        }
        info!("WiFi: connected");

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: disconnected from AP, reconnecting");
        Timer::after(retry_delay).await;
    }
}

/// Network Task - treibt den embassy-net Stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Loggt die per DHCP erhaltene Adresse. Die Steuerseite ist danach
/// unter `http://<ip>/` erreichbar.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    let poll = Duration::from_millis(NETWORK_POLL_MS);

    while !stack.is_link_up() {
        Timer::after(poll).await;
    }
    info!("WiFi: link up, waiting for DHCP lease...");

    let config = loop {
        if let Some(config) = stack.config_v4() {
            break config;
        }
        Timer::after(poll).await;
    };

    info!("WiFi: IP {}", Debug2Format(&config.address.address()));
    info!("WiFi: Gateway {}", Debug2Format(&config.gateway));
    info!("HTTP: control page at http://{}/", Debug2Format(&config.address.address()));
}
