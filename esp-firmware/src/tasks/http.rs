// HTTP Server Task - Serviert die Steuerseite und die LED-Endpunkte
use alloc::string::{String, ToString};
use defmt::{info, warn};
use embassy_net::Stack;
use embassy_time::{Duration, Instant};
use picoserve::extract::Query;
use picoserve::response::{IntoResponse, Response, StatusCode};
use picoserve::{io::embedded_io_async, routing::get};
use serde::Serialize;

use crate::config::*;
use crate::web::{
    INDEX_HTML,
    protocol::{MemoryResponse, StatusResponse},
};
use crate::{LedEngine, RestartSignal};
use esp_core::{BlinkQuery, Command, MorseQuery, PulseQuery, RequestError};

/// Response-Enum für alle Endpunkte
///
/// Bündelt Erfolgs- und Fehlerfälle, damit jeder Handler einen
/// einheitlichen Rückgabetyp hat.
enum ApiResponse {
    /// 200 mit Klartext-Bestätigung
    Text(&'static str),
    /// 200 mit JSON-Body
    Json(String),
    /// 503 bei voller Command-Queue
    Busy,
    /// 400 bei ungültigem Parameter
    BadRequest(&'static str),
    /// 500 wenn die Antwort nicht serialisiert werden konnte
    InternalError,
}

impl ApiResponse {
    /// Legt ein Command in die Queue und bestätigt mit `ok`
    fn enqueue(engine: &LedEngine, command: Command, ok: &'static str) -> Self {
        match engine.enqueue(command) {
            Ok(()) => ApiResponse::Text(ok),
            Err(_) => ApiResponse::Busy,
        }
    }

    /// Validiert die Query und legt das Command in die Queue
    fn enqueue_checked(
        engine: &LedEngine,
        command: Result<Command, RequestError>,
        ok: &'static str,
    ) -> Self {
        match command {
            Ok(command) => Self::enqueue(engine, command, ok),
            Err(e) => Self::from(e),
        }
    }

    /// Serialisiert `value` als JSON
    fn json<T: Serialize>(value: &T) -> Self {
        let mut buffer = [0u8; JSON_BUFFER_SIZE];
        let Ok(n) = serde_json_core::to_slice(value, &mut buffer) else {
            warn!("HTTP: JSON buffer too small");
            return ApiResponse::InternalError;
        };
        match core::str::from_utf8(&buffer[..n]) {
            Ok(json) => ApiResponse::Json(json.to_string()),
            Err(_) => ApiResponse::InternalError,
        }
    }
}

impl From<RequestError> for ApiResponse {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::InvalidParameter(name) => {
                info!("HTTP: rejecting request, invalid parameter '{}'", name);
                ApiResponse::BadRequest(name)
            }
            RequestError::QueueFull => ApiResponse::Busy,
        }
    }
}

impl IntoResponse for ApiResponse {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        match self {
            ApiResponse::Text(body) => {
                Response::new(StatusCode::OK, body)
                    .with_header("Content-Type", "text/plain; charset=utf-8")
                    .write_to(connection, response_writer)
                    .await
            }
            ApiResponse::Json(body) => {
                Response::new(StatusCode::OK, body)
                    .with_header("Content-Type", "application/json")
                    .write_to(connection, response_writer)
                    .await
            }
            ApiResponse::Busy => {
                Response::new(
                    StatusCode::new(503),
                    "Server busy: command queue full",
                )
                .with_header("Retry-After", BUSY_RETRY_AFTER)
                .write_to(connection, response_writer)
                .await
            }
            ApiResponse::BadRequest(name) => {
                let mut body = String::from("Invalid parameter: ");
                body.push_str(name);
                Response::new(StatusCode::BAD_REQUEST, body)
                    .write_to(connection, response_writer)
                    .await
            }
            ApiResponse::InternalError => {
                Response::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
                    .write_to(connection, response_writer)
                    .await
            }
        }
    }
}

/// HTTP Server Task - läuft parallel zu anderen Tasks
///
/// Endpunkte:
/// - `GET /` Steuerseite (index.html)
/// - `GET /led/on`, `/led/off` Dauerzustand setzen
/// - `GET /led/blink?count=&interval=`
/// - `GET /led/pulse?speed=&min=&max=&times=`
/// - `GET /led/morse?text=&dot=&dash=&gap=&letter_gap=&word_gap=`
/// - `GET /status`, `/memory` JSON-Berichte
/// - `GET /restart` Neustart nach kurzer Verzögerung
///
/// LED-Endpunkte antworten sofort nach dem Enqueue, nicht nach der Ausführung.
///
/// **Task Pool:** Diese Task wird 4x gespawnt für concurrent connections.
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz (0..3)
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `engine`: geteilte Actuation Engine (Producer-Seite)
/// - `restart`: Signal an den Restart-Task
#[embassy_executor::task(pool_size = 4)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    engine: &'static LedEngine,
    restart: &'static RestartSignal,
) {
    info!("HTTP: Server task {} starting on port {}...", task_id, HTTP_PORT);

    let app = picoserve::Router::new()
        .route("/", get(serve_html))
        .route(
            "/led/on",
            get(move || async move {
                ApiResponse::enqueue(engine, Command::SetSteady { on: true }, "LED ON")
            }),
        )
        .route(
            "/led/off",
            get(move || async move {
                ApiResponse::enqueue(engine, Command::SetSteady { on: false }, "LED OFF")
            }),
        )
        .route(
            "/led/blink",
            get(move |Query(query): Query<BlinkQuery>| async move {
                ApiResponse::enqueue_checked(engine, query.to_command(), "LED BLINKING")
            }),
        )
        .route(
            "/led/pulse",
            get(move |Query(query): Query<PulseQuery>| async move {
                ApiResponse::enqueue_checked(engine, query.to_command(), "LED PULSING")
            }),
        )
        .route(
            "/led/morse",
            get(move |Query(query): Query<MorseQuery>| async move {
                ApiResponse::enqueue_checked(engine, query.to_command(), "LED MORSE")
            }),
        )
        .route(
            "/status",
            get(move || async move { status_report(engine, stack) }),
        )
        .route("/memory", get(|| async { memory_report() }))
        .route(
            "/restart",
            get(move || async move {
                warn!("HTTP: restart requested");
                restart.signal(());
                ApiResponse::Text("Restarting ESP32...")
            }),
        );

    // Server-Konfiguration
    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    // HTTP-Buffer für Requests/Responses
    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];

    // TCP-Buffers für Socket
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    // task_id ermöglicht mehrere concurrent Server-Instanzen
    let _ = server
        .listen_and_serve(task_id, *stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Serviert die HTML-Steuerseite
async fn serve_html() -> impl IntoResponse {
    Response::new(StatusCode::OK, INDEX_HTML).with_header("Content-Type", "text/html; charset=utf-8")
}

/// GET /status
fn status_report(engine: &LedEngine, stack: &Stack<'static>) -> ApiResponse {
    let ip = stack
        .config_v4()
        .map(|config| config.address.address().to_string());
    let ip_address = ip.as_deref().unwrap_or("Not connected");
    let uptime_seconds = Instant::now().as_secs();

    ApiResponse::json(&StatusResponse::new(
        engine.status(),
        uptime_seconds,
        ip_address,
    ))
}

/// GET /memory
fn memory_report() -> ApiResponse {
    ApiResponse::json(&MemoryResponse::new(
        esp_alloc::HEAP.free(),
        esp_alloc::HEAP.used(),
    ))
}
