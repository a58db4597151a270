//! The `State` trait shared by every state enum in the crate.
//!
//! States are plain values. Inspecting one never mutates anything, which
//! keeps the input gate and the fault transition easy to reason about.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. A state describes where the machine currently is,
/// it never performs the transition itself.
///
/// # Required Traits
///
/// - `Clone`: states are copied into snapshots handed to observers
/// - `PartialEq`: states are compared by guards
/// - `Debug`: states show up in log fields
/// - `Serialize` + `Deserialize`: states travel inside serialized views
///
/// # Example
///
/// ```rust
/// use keycalc::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Backlight {
///     On,
///     Dimmed,
///     Broken,
/// }
///
/// impl State for Backlight {
///     fn name(&self) -> &str {
///         match self {
///             Self::On => "On",
///             Self::Dimmed => "Dimmed",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert!(Backlight::Broken.is_error());
/// assert!(!Backlight::Dimmed.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the state for display and log fields.
    fn name(&self) -> &str;

    /// Check if this is an error state.
    ///
    /// Error states are the ones in which user input is rejected.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Lamp {
        Off,
        Lit,
        Burnt,
    }

    impl State for Lamp {
        fn name(&self) -> &str {
            match self {
                Self::Off => "Off",
                Self::Lit => "Lit",
                Self::Burnt => "Burnt",
            }
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Burnt)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(Lamp::Off.name(), "Off");
        assert_eq!(Lamp::Lit.name(), "Lit");
        assert_eq!(Lamp::Burnt.name(), "Burnt");
    }

    #[test]
    fn default_is_error_is_false() {
        #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
        struct Plain;

        impl State for Plain {
            fn name(&self) -> &str {
                "Plain"
            }
        }

        assert!(!Plain.is_error());
    }

    #[test]
    fn overridden_methods_are_respected() {
        assert!(!Lamp::Lit.is_error());
        assert!(Lamp::Burnt.is_error());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&Lamp::Lit).unwrap();
        let back: Lamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Lamp::Lit);
    }
}
