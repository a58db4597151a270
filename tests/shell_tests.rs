//! Tests for the Tokio host and the timed fault auto-clear.
//!
//! Time is paused, so sleeps advance the clock instantly and the auto-clear
//! task fires exactly at its deadline.

use keycalc::core::{EvaluatorState, View};
use keycalc::feedback::{Observer, Tone, Waveform};
use keycalc::{Calculator, Evaluator, EvaluatorBuilder, Key};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn feed(calc: &mut Calculator, keys: &str) {
    for c in keys.chars() {
        calc.press(Key::from_char(c).expect("mapped key"));
    }
}

fn initial_view() -> View {
    Evaluator::new().view()
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn fault_clears_after_delay() {
    let mut calc = Calculator::new(Evaluator::new());
    feed(&mut calc, "5/0=");

    let view = calc.view();
    assert!(view.faulted);
    assert_eq!(view.display, "Error");

    advance(1499).await;
    assert!(calc.view().faulted);

    advance(2).await;
    assert_eq!(calc.view(), initial_view());
    assert_eq!(calc.snapshot(), EvaluatorState::default());
}

#[tokio::test(start_paused = true)]
async fn input_during_fault_is_ignored() {
    let mut calc = Calculator::new(Evaluator::new());
    feed(&mut calc, "5/0=");
    feed(&mut calc, "123+");
    assert_eq!(calc.view().display, "Error");

    advance(1600).await;
    feed(&mut calc, "7");
    assert_eq!(calc.view().display, "7");
}

#[tokio::test(start_paused = true)]
async fn manual_clear_cancels_pending_auto_clear() {
    let mut calc = Calculator::new(Evaluator::new());
    feed(&mut calc, "5/0=");

    advance(1000).await;
    calc.press(Key::ClearAll);
    feed(&mut calc, "7+2");

    advance(1000).await;
    let view = calc.view();
    assert_eq!(view.display, "2");
    assert_eq!(view.trace, "7 +");
}

#[tokio::test(start_paused = true)]
async fn new_fault_gets_full_delay() {
    let mut calc = Calculator::new(Evaluator::new());
    feed(&mut calc, "5/0=");

    advance(1000).await;
    calc.press(Key::ClearAll);
    feed(&mut calc, "1/0=");

    advance(600).await;
    assert!(calc.view().faulted, "old timer must not clear the new fault");

    advance(1000).await;
    assert!(!calc.view().faulted);
}

#[tokio::test(start_paused = true)]
async fn configured_delay_is_used() {
    let evaluator = EvaluatorBuilder::new()
        .fault_delay(Duration::from_millis(300))
        .build()
        .unwrap();
    let mut calc = Calculator::new(evaluator);
    feed(&mut calc, "9/0=");

    advance(299).await;
    assert!(calc.view().faulted);
    advance(2).await;
    assert!(!calc.view().faulted);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_the_auto_clear() {
    let mut calc = Calculator::new(Evaluator::new());
    let mut views = calc.subscribe();

    feed(&mut calc, "5/0=");
    assert!(views.borrow_and_update().faulted);

    views.changed().await.unwrap();
    assert_eq!(*views.borrow(), initial_view());
}

#[derive(Clone, Default)]
struct Recorder {
    tones: Arc<Mutex<Vec<Tone>>>,
    faults: Arc<Mutex<usize>>,
}

impl Observer for Recorder {
    fn key_pressed(&mut self, key: Key, _view: &View) {
        self.tones.lock().unwrap().push(Tone::for_key(key));
    }

    fn fault_raised(&mut self, _view: &View) {
        *self.faults.lock().unwrap() += 1;
        self.tones.lock().unwrap().push(Tone::FAULT);
    }
}

#[tokio::test(start_paused = true)]
async fn observers_hear_every_event_and_one_fault() {
    let recorder = Recorder::default();
    let mut calc = Calculator::new(Evaluator::new());
    calc.add_observer(recorder.clone());

    feed(&mut calc, "5/0=");
    feed(&mut calc, "1");

    let tones = recorder.tones.lock().unwrap().clone();
    assert_eq!(tones.len(), 6);
    assert_eq!(tones[1].waveform, Waveform::Sawtooth);
    assert_eq!(tones[3], Tone::new(440.0, Waveform::Triangle));
    assert_eq!(tones[4], Tone::FAULT);
    assert_eq!(*recorder.faults.lock().unwrap(), 1);
}
