//! Macros for ergonomic identifier declarations.

/// Declare a plain enum usable as a state or event identifier.
///
/// The generated enum derives the traits rule tables need, prints as its
/// variant name, and can be passed as a single identifier to registration
/// operations.
///
/// # Example
///
/// ```
/// use statewise::core::Rule;
/// use statewise::engine::TransitionEngine;
/// use statewise::identifier_enum;
///
/// identifier_enum! {
///     pub enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// identifier_enum! {
///     pub enum Signal {
///         Tick,
///     }
/// }
///
/// let mut engine: TransitionEngine<Light, Signal> = TransitionEngine::new(Light::Red);
/// engine.register_transition(Signal::Tick, Light::Red, Rule::to(Light::Green));
/// engine.register_transition(Signal::Tick, Light::Green, Rule::to(Light::Yellow));
/// engine.register_transition(Signal::Tick, Light::Yellow, Rule::to(Light::Red));
///
/// engine.dispatch(Signal::Tick).unwrap();
/// assert_eq!(*engine.current_state(), Light::Green);
/// assert_eq!(Light::Green.to_string(), "Green");
/// ```
#[macro_export]
macro_rules! identifier_enum {
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

        impl $name {
            /// Variant name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::core::IntoIdentifiers<$name> for $name {
            fn into_identifiers(self) -> ::std::vec::Vec<$name> {
                ::std::vec![self]
            }
        }
    };
}
