//! Macros for ergonomic machine construction.

/// Generate a state enum with its `State` trait implementation, a
/// `Display` impl printing the variant name, and an `ALL` constant.
///
/// # Example
///
/// ```
/// use session_machine::state_enum;
///
/// state_enum! {
///     pub enum ConnectionState {
///         Disconnected,
///         Connected,
///         Closed,
///     }
/// }
///
/// assert_eq!(ConnectionState::ALL.len(), 3);
/// assert_eq!(ConnectionState::Closed.to_string(), "Closed");
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
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
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
