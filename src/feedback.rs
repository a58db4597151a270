//! Reactive collaborators: audio cues and event observers.
//!
//! Observers never influence the evaluator. They are told about each event
//! after it has been applied, together with the resulting view.

use crate::core::View;
use crate::input::Key;
use serde::{Deserialize, Serialize};

/// Oscillator shape of a cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A short audible cue.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub waveform: Waveform,
}

impl Tone {
    /// Cue played when a fault is raised.
    pub const FAULT: Tone = Tone::new(150.0, Waveform::Square);

    pub const fn new(frequency_hz: f32, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            waveform,
        }
    }

    /// Cue for a keypad event.
    pub fn for_key(key: Key) -> Self {
        match key {
            Key::Digit(_) => Self::new(330.0, Waveform::Sine),
            Key::DecimalPoint => Self::new(350.0, Waveform::Sine),
            Key::ClearAll => Self::new(220.0, Waveform::Square),
            Key::ClearEntry => Self::new(250.0, Waveform::Square),
            Key::Evaluate => Self::new(440.0, Waveform::Triangle),
            Key::ToggleSign => Self::new(380.0, Waveform::Sine),
            Key::Percent => Self::new(400.0, Waveform::Sine),
            Key::Operator(_) => Self::new(400.0, Waveform::Sawtooth),
        }
    }
}

/// Receives events after the evaluator has applied them.
pub trait Observer: Send {
    fn key_pressed(&mut self, key: Key, view: &View);

    /// Called once when an event raises a fault.
    fn fault_raised(&mut self, _view: &View) {}
}
