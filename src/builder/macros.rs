//! Macros for declaring closed state enums.

/// Declare a closed, code-addressable state enum and its `State` impl.
///
/// Every variant takes an explicit `u8` code. The macro generates:
/// - the `#[repr(u8)]` enum with the usual value derives
/// - `ALL`, `code()` and `from_code()`
/// - `TryFrom<u8>` returning the rejected code on failure
/// - `Display` using the state name
/// - the `State` impl, with optional `final` and `error` lists
///
/// Attributes on the enum and its variants are forwarded, so an initial
/// state can be marked with `#[derive(Default)]` and `#[default]`.
///
/// # Example
///
/// ```
/// use device_lifecycle::state_enum;
/// use device_lifecycle::core::State;
///
/// state_enum! {
///     pub enum PumpState {
///         Stopped = 0,
///         Priming = 1,
///         Running = 2,
///         Jammed = 9,
///     }
///     final: [Jammed]
///     error: [Jammed]
/// }
///
/// assert_eq!(PumpState::Running.code(), 2);
/// assert_eq!(PumpState::try_from(9), Ok(PumpState::Jammed));
/// assert!(PumpState::from_code(3).is_none());
/// assert!(PumpState::Jammed.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        #[repr(u8)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $code
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            /// Raw code of this state.
            pub const fn code(self) -> u8 {
                self as u8
            }

            /// Look up the state for a raw code.
            pub const fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl ::std::convert::TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(code: u8) -> Result<Self, u8> {
                Self::from_code(code).ok_or(code)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad($crate::core::State::name(self))
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
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
