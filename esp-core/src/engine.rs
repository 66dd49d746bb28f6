//! Actuation Engine - Command-Queue und Aktor-Worker
//!
//! Die Engine wird einmal beim Start erzeugt und per `&'static` Referenz
//! an alle HTTP-Tasks (Producer) und den einen Worker (Consumer) verteilt.
//!
//! # Nebenläufigkeit
//! - Producer blockieren nie: `enqueue` ist ein `try_send` und schlägt bei
//!   voller Queue sofort mit `QueueFull` fehl.
//! - Der Worker wartet blockierend (`receive().await`) statt zu pollen.
//! - Während ein Command läuft, wird kein Lock gehalten. Eine lange
//!   Morse-Sequenz blockiert also keinen Producer.
//! - LedState wird nur vom Worker geschrieben (beim Ausführen von
//!   `SetSteady`), zusammen mit dem Schreibzugriff auf die LED unter dem
//!   State-Lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::error::{QueueFull, RequestError, WorkerError};
use crate::morse::MorseTable;
use crate::params::morse_text;
use crate::primitives::{blink, play_morse, pulse, set_steady};
use crate::traits::{ActuatorDelay, DutyWriter};
use crate::types::{Command, EngineStatus, MorseTiming, QUEUE_CAPACITY};

/// Gemeinsamer Zustand hinter dem State-Lock
#[derive(Default)]
struct EngineState {
    /// LedState: zuletzt explizit gesetzter Dauerzustand
    led_on: bool,
    worker_running: bool,
    busy: bool,
}

/// Command-Queue plus gemeinsamer LED-Zustand
pub struct ActuationEngine<M: RawMutex> {
    queue: Channel<M, Command, QUEUE_CAPACITY>,
    state: Mutex<M, RefCell<EngineState>>,
}

impl<M: RawMutex> ActuationEngine<M> {
    pub fn new() -> Self {
        Self {
            queue: Channel::new(),
            state: Mutex::new(RefCell::new(EngineState::default())),
        }
    }

    /// Legt ein Command ans Ende der Queue (non-blocking)
    pub fn enqueue(&self, command: Command) -> Result<(), QueueFull> {
        let kind = command.kind();
        match self.queue.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("Queue: full ({} slots), rejecting {}", QUEUE_CAPACITY, kind);
                Err(QueueFull)
            }
        }
    }

    /// Entnimmt das älteste Command, falls vorhanden (non-blocking)
    pub fn try_dequeue(&self) -> Option<Command> {
        self.queue.try_receive().ok()
    }

    pub fn enqueue_set_steady(&self, on: bool) -> Result<(), QueueFull> {
        self.enqueue(Command::SetSteady { on })
    }

    pub fn enqueue_blink(&self, count: u32, interval_ms: u32) -> Result<(), QueueFull> {
        self.enqueue(Command::Blink { count, interval_ms })
    }

    pub fn enqueue_pulse(
        &self,
        speed: u16,
        min_duty: u16,
        max_duty: u16,
        times: u32,
    ) -> Result<(), QueueFull> {
        self.enqueue(Command::Pulse {
            speed,
            min_duty,
            max_duty,
            times,
        })
    }

    /// Legt einen Morse-Text in die Queue
    ///
    /// Leerer oder zu langer Text wird mit `InvalidParameter("text")` abgelehnt.
    pub fn enqueue_morse(&self, text: &str, timing: MorseTiming) -> Result<(), RequestError> {
        let text = morse_text(text)?;
        self.enqueue(Command::Morse { text, timing })?;
        Ok(())
    }

    /// LedState für Status-Reports (entnimmt nichts aus der Queue)
    pub fn read_led_state(&self) -> bool {
        self.state.lock(|state| state.borrow().led_on)
    }

    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    pub fn is_worker_running(&self) -> bool {
        self.state.lock(|state| state.borrow().worker_running)
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock(|state| state.borrow().busy)
    }

    pub fn status(&self) -> EngineStatus {
        let (led_on, worker_running, busy) = self.state.lock(|state| {
            let state = state.borrow();
            (state.led_on, state.worker_running, state.busy)
        });
        EngineStatus {
            led_on,
            queue_depth: self.queue.len(),
            queue_capacity: QUEUE_CAPACITY,
            worker_running,
            busy,
        }
    }

    /// Erzeugt den einzigen Consumer dieser Engine
    ///
    /// Ein zweiter Aufruf schlägt fehl, solange der erste Worker existiert.
    pub fn worker<D: DutyWriter, T: ActuatorDelay>(
        &self,
        led: D,
        delay: T,
    ) -> Result<ActuationWorker<'_, M, D, T>, WorkerError> {
        let claimed = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            !core::mem::replace(&mut state.worker_running, true)
        });
        if !claimed {
            return Err(WorkerError::AlreadyRunning);
        }

        Ok(ActuationWorker {
            engine: self,
            led,
            delay,
            table: MorseTable::STANDARD,
        })
    }

    fn set_busy(&self, busy: bool) {
        self.state.lock(|state| state.borrow_mut().busy = busy);
    }
}

impl<M: RawMutex> Default for ActuationEngine<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Der Aktor-Worker: einziger Consumer der Queue
///
/// Besitzt den Duty-Treiber exklusiv und führt Commands strikt
/// nacheinander in FIFO-Reihenfolge aus.
pub struct ActuationWorker<'a, M: RawMutex, D: DutyWriter, T: ActuatorDelay> {
    engine: &'a ActuationEngine<M>,
    led: D,
    delay: T,
    table: MorseTable,
}

impl<'a, M: RawMutex, D: DutyWriter, T: ActuatorDelay> ActuationWorker<'a, M, D, T> {
    /// Ersetzt die Morse-Tabelle (Standard: ITU)
    pub fn with_morse_table(mut self, table: MorseTable) -> Self {
        self.table = table;
        self
    }

    /// Zugriff auf den Treiber (für Tests und Diagnose)
    pub fn led(&self) -> &D {
        &self.led
    }

    /// Endlosschleife: wartet auf Commands und führt sie aus
    pub async fn run(mut self) -> ! {
        info!("Worker: started");
        loop {
            self.process_next().await;
        }
    }

    /// Wartet auf das nächste Command und führt es vollständig aus
    pub async fn process_next(&mut self) {
        let command = self.engine.queue.receive().await;
        self.execute(command).await;
    }

    /// Führt das nächste Command aus, falls die Queue nicht leer ist
    pub async fn try_process_next(&mut self) -> bool {
        match self.engine.try_dequeue() {
            Some(command) => {
                self.execute(command).await;
                true
            }
            None => false,
        }
    }

    async fn execute(&mut self, command: Command) {
        let kind = command.kind();
        info!("Worker: executing {}", command);
        self.engine.set_busy(true);

        let result = match command {
            Command::SetSteady { on } => {
                let led = &mut self.led;
                self.engine.state.lock(|state| {
                    state.borrow_mut().led_on = on;
                    set_steady(led, on)
                })
            }
            Command::Blink { count, interval_ms } => {
                let steady_on = self.engine.read_led_state();
                blink(&mut self.led, &mut self.delay, count, interval_ms, steady_on).await
            }
            Command::Pulse {
                speed,
                min_duty,
                max_duty,
                times,
            } => {
                pulse(
                    &mut self.led,
                    &mut self.delay,
                    speed,
                    min_duty,
                    max_duty,
                    times,
                )
                .await
            }
            Command::Morse { text, timing } => {
                play_morse(
                    &mut self.led,
                    &mut self.delay,
                    text.as_str(),
                    timing,
                    self.table,
                )
                .await
            }
        };

        if let Err(e) = result {
            error!("Worker: {} aborted: {}", kind, e);
        }

        self.engine.set_busy(false);
    }
}

impl<M: RawMutex, D: DutyWriter, T: ActuatorDelay> Drop for ActuationWorker<'_, M, D, T> {
    fn drop(&mut self) {
        self.engine.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.worker_running = false;
            state.busy = false;
        });
    }
}
