//! Keypad Session
//!
//! This demo drives the calculator the way a presentation layer would:
//! keyboard key names go in, and every published view is rendered as a
//! two-line display (trace above, value below).
//!
//! Key concepts:
//! - Keyboard names mapped to keypad events
//! - Views observed through a watch channel
//! - Division by zero clearing itself after the configured delay
//! - Audio cues computed by an observer
//!
//! Run with: cargo run --example keypad_session
//! Set RUST_LOG=keycalc=debug to see state machine logging.

use chrono::Utc;
use keycalc::config::EvaluatorConfig;
use keycalc::core::View;
use keycalc::feedback::{Observer, Tone};
use keycalc::{Calculator, EvaluatorBuilder, Key};
use tracing_subscriber::EnvFilter;

struct ToneLogger;

impl Observer for ToneLogger {
    fn key_pressed(&mut self, key: Key, _view: &View) {
        let tone = Tone::for_key(key);
        println!(
            "  [{:>3}] {:.0} Hz {:?}",
            key.label(),
            tone.frequency_hz,
            tone.waveform
        );
    }

    fn fault_raised(&mut self, _view: &View) {
        println!("  [!!!] {:.0} Hz {:?}", Tone::FAULT.frequency_hz, Tone::FAULT.waveform);
    }
}

fn render(view: &View) {
    println!("  | {:>16} |", view.trace);
    println!("  | {:>16} |", view.display);
}

fn type_keys(calc: &mut Calculator, names: &[&str]) {
    for name in names {
        match Key::from_keyboard(name) {
            Some(key) => calc.press(key),
            None => println!("  (ignored key {name:?})"),
        }
    }
    render(&calc.view());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Keypad Session ===\n");

    let config = EvaluatorConfig::from_env()?;
    let mut calc = Calculator::new(EvaluatorBuilder::from_config(config).build()?);
    calc.add_observer(ToneLogger);

    println!("Chained operation: 5 + 3 x 2 =");
    type_keys(&mut calc, &["5", "+", "3", "x", "2", "Enter"]);

    println!("\nPercentage of the left operand: 200 + 10 %");
    type_keys(&mut calc, &["Escape", "2", "0", "0", "+", "1", "0", "%"]);

    println!("\nOperator pressed twice: 9 + - 4 =");
    type_keys(&mut calc, &["Escape", "9", "+", "-", "4", "="]);

    println!("\nLong result: 1 / 3 =");
    type_keys(&mut calc, &["Escape", "1", "/", "3", "="]);

    println!("\nDivision by zero: 5 / 0 =");
    let mut views = calc.subscribe();
    type_keys(&mut calc, &["Escape", "5", "/", "0", "="]);
    views.borrow_and_update();

    if let Some(left) = calc.fault_remaining(Utc::now()) {
        println!("\nWaiting {} ms for the automatic clear...", left.as_millis());
    }
    views.changed().await?;
    render(&views.borrow());

    println!("\n=== Session Complete ===");
    Ok(())
}
