//! Integration Tests für den Aktor-Worker
//!
//! Der Worker besitzt den MockDutyWriter, dessen Trace zeigt Reihenfolge
//! und Zeitverhalten aller ausgeführten Commands.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use common::{Engine, MockDelay, MockDutyWriter, VirtualClock, mock_pair};
use embassy_futures::block_on;
use esp_core::{Command, MorseTable, MorseTiming, QueueFull};

const ON: u16 = 1023;

#[test]
fn test_executes_in_fifo_order() {
    let engine = Engine::new();
    let (led, delay) = mock_pair();
    let mut worker = engine.worker(led, delay).unwrap();

    engine.enqueue_set_steady(true).unwrap();
    engine.enqueue_set_steady(false).unwrap();
    engine.enqueue_blink(1, 100).unwrap();

    block_on(async {
        while worker.try_process_next().await {}
    });

    // on, off, blink(an 50ms, aus 50ms), Wiederherstellen "aus"
    assert_eq!(worker.led().duties(), vec![ON, 0, ON, 0, 0]);
    assert_eq!(worker.led().phases()[2..], [(ON, 50), (0, 50)]);
    assert!(!engine.read_led_state());
    assert_eq!(engine.queue_depth(), 0);
}

#[test]
fn test_set_steady_updates_led_state() {
    let engine = Engine::new();
    let mut worker = engine
        .worker(MockDutyWriter::default(), MockDelay::default())
        .unwrap();

    engine.enqueue_set_steady(true).unwrap();
    // Erst nach der Ausführung sichtbar
    assert!(!engine.read_led_state());

    assert!(block_on(worker.try_process_next()));
    assert!(engine.read_led_state());
    assert_eq!(worker.led().last_duty, Some(ON));
}

#[test]
fn test_blink_restores_led_state_on() {
    let engine = Engine::new();
    let (led, delay) = mock_pair();
    let mut worker = engine.worker(led, delay).unwrap();

    engine.enqueue_set_steady(true).unwrap();
    engine.enqueue_blink(3, 200).unwrap();
    block_on(async {
        while worker.try_process_next().await {}
    });

    let led = worker.led();
    assert_eq!(led.duties(), vec![ON, ON, 0, ON, 0, ON, 0, ON]);
    // 3 × (100ms an + 100ms aus)
    assert_eq!(led.events.last().unwrap().at_ms, 600);
    assert_eq!(led.last_duty, Some(ON));
}

#[test]
fn test_pulse_forces_off_without_touching_led_state() {
    let engine = Engine::new();
    let (led, delay) = mock_pair();
    let mut worker = engine.worker(led, delay).unwrap();

    engine.enqueue_set_steady(true).unwrap();
    engine.enqueue_pulse(512, 0, 1023, 1).unwrap();
    block_on(async {
        while worker.try_process_next().await {}
    });

    assert_eq!(worker.led().last_duty, Some(0));
    assert!(engine.read_led_state());
}

#[test]
fn test_morse_with_reduced_table() {
    const REDUCED: &[(char, &str)] = &[('A', ".-"), ('B', "-...")];
    let engine = Engine::new();
    let (led, delay) = mock_pair();
    let mut worker = engine
        .worker(led, delay)
        .unwrap()
        .with_morse_table(MorseTable::new(REDUCED));

    let timing = MorseTiming {
        dot_ms: 10,
        dash_ms: 30,
        element_gap_ms: 10,
        letter_gap_ms: 30,
        word_gap_ms: 70,
    };
    engine.enqueue_morse("A!B", timing).unwrap();
    assert!(block_on(worker.try_process_next()));

    let letter_gaps = worker
        .led()
        .phases()
        .iter()
        .filter(|&&(duty, ms)| duty == 0 && ms == 30)
        .count();
    assert_eq!(letter_gaps, 1);
    assert_eq!(worker.led().last_duty, Some(0));
}

#[test]
fn test_worker_survives_primitive_failure() {
    let engine = Engine::new();
    let clock = VirtualClock::default();
    let mut led = MockDutyWriter::new(clock.clone());
    led.fail_next_write = true;
    let mut worker = engine.worker(led, MockDelay::new(clock)).unwrap();

    engine.enqueue_blink(2, 100).unwrap();
    engine.enqueue_set_steady(true).unwrap();
    block_on(async {
        while worker.try_process_next().await {}
    });

    // Blink bricht beim ersten Schreiben ab, SetSteady läuft trotzdem
    assert_eq!(worker.led().duties(), vec![ON]);
    assert!(engine.read_led_state());
    assert!(!engine.is_busy());
}

#[test]
fn test_try_process_next_on_empty_queue() {
    let engine = Engine::new();
    let mut worker = engine
        .worker(MockDutyWriter::default(), MockDelay::default())
        .unwrap();

    assert!(!block_on(worker.try_process_next()));
    assert_eq!(worker.led().write_count, 0);
}

#[test]
fn test_status_snapshot() {
    let engine = Engine::new();
    let mut worker = engine
        .worker(MockDutyWriter::default(), MockDelay::default())
        .unwrap();

    engine.enqueue_set_steady(true).unwrap();
    engine.enqueue_blink(1, 10).unwrap();
    let status = engine.status();
    assert_eq!(status.queue_depth, 2);
    assert!(status.worker_running);
    assert!(!status.led_on);

    block_on(worker.try_process_next());
    let status = engine.status();
    assert_eq!(status.queue_depth, 1);
    assert!(status.led_on);
    assert!(!status.busy);
}

/// Kodiert (Producer, laufende Nummer) in die Haltedauer eines Blinks
fn tagged_half_ms(producer: usize, seq: usize) -> u32 {
    (producer * 100 + seq + 1) as u32
}

#[test]
fn test_concurrent_producers_single_consumer() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 5;
    const TOTAL: usize = PRODUCERS * PER_PRODUCER;

    let engine = Engine::new();
    let clock = VirtualClock::default();
    let worker = engine
        .worker(MockDutyWriter::new(clock.clone()), MockDelay::new(clock))
        .unwrap();
    let accepted = AtomicUsize::new(0);

    let worker = thread::scope(|s| {
        let consumer = s.spawn(move || {
            let mut worker = worker;
            block_on(async {
                for _ in 0..TOTAL {
                    worker.process_next().await;
                }
            });
            worker
        });

        for producer in 0..PRODUCERS {
            let engine = &engine;
            let accepted = &accepted;
            s.spawn(move || {
                for seq in 0..PER_PRODUCER {
                    let command = Command::Blink {
                        count: 1,
                        interval_ms: 2 * tagged_half_ms(producer, seq),
                    };
                    // Bei voller Queue erneut versuchen, bis angenommen
                    while let Err(QueueFull) = engine.enqueue(command.clone()) {
                        thread::yield_now();
                    }
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        consumer.join().unwrap()
    });

    // Jedes Blink ist ein zusammenhängender Block: an, aus, Wiederherstellen
    let events = &worker.led().events;
    assert_eq!(events.len(), TOTAL * 3);
    let mut executed: Vec<(usize, usize)> = Vec::new();
    for block in events.chunks(3) {
        assert_eq!([block[0].duty, block[1].duty, block[2].duty], [ON, 0, 0]);
        let on_ms = block[1].at_ms - block[0].at_ms;
        let off_ms = block[2].at_ms - block[1].at_ms;
        assert_eq!(on_ms, off_ms, "interleaved block: {:?}", block);

        let tag = on_ms as usize - 1;
        executed.push((tag / 100, tag % 100));
    }

    // Pro Producer in Einreichungsreihenfolge, jedes Command genau einmal
    for producer in 0..PRODUCERS {
        let order: Vec<usize> = executed
            .iter()
            .filter(|(p, _)| *p == producer)
            .map(|(_, seq)| *seq)
            .collect();
        assert_eq!(order, (0..PER_PRODUCER).collect::<Vec<_>>());
    }
    assert_eq!(executed.len(), accepted.load(Ordering::SeqCst));
    assert_eq!(engine.queue_depth(), 0);
}

#[test]
fn test_concurrent_set_steady_producers() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 10;

    let engine = Engine::new();
    let mut worker = engine
        .worker(MockDutyWriter::default(), MockDelay::default())
        .unwrap();
    let accepted = AtomicUsize::new(0);

    thread::scope(|s| {
        for producer in 0..PRODUCERS {
            let engine = &engine;
            let accepted = &accepted;
            s.spawn(move || {
                for i in 0..PER_PRODUCER {
                    // Abwechselnd an/aus, je Producer versetzt
                    if engine.enqueue_set_steady((producer + i) % 2 == 0).is_ok() {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    let accepted = accepted.load(Ordering::SeqCst);
    assert_eq!(engine.queue_depth(), accepted);

    block_on(async {
        while worker.try_process_next().await {}
    });

    // Jeder angenommene SetSteady genau einmal ausgeführt
    assert_eq!(worker.led().write_count, accepted);
    assert!(worker.led().duties().iter().all(|&d| d == ON || d == 0));
    let expected = if engine.read_led_state() { ON } else { 0 };
    assert_eq!(worker.led().last_duty, Some(expected));
    assert_eq!(engine.queue_depth(), 0);
}
