//! Macros for declaring state enums.

/// Generate a `State` implementation for a simple enum.
///
/// Variants listed under `error:` report `true` from `is_error`. Extra
/// attributes placed before the enum, such as additional derives, are
/// forwarded.
///
/// # Example
///
/// ```
/// use keycalc::core::State;
/// use keycalc::state_enum;
///
/// state_enum! {
///     pub enum Indicator {
///         Idle,
///         Busy,
///         Error,
///     }
///     error: [Error]
/// }
///
/// assert_eq!(Indicator::Busy.name(), "Busy");
/// assert!(Indicator::Error.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
