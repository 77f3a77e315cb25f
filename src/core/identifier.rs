//! Identifier traits for states and events.
//!
//! States and events are opaque values. The engine only needs to hash,
//! compare and print them, so any type meeting those bounds can be used.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait for state and event identifiers.
///
/// Blanket-implemented for every type with the required bounds, so
/// `String`, `&'static str`, integers and plain enums all qualify.
/// The engine never validates identifiers against a declared set.
///
/// # Required Traits
///
/// - `Clone`: identifiers are stored in rule tables and copied on resolution
/// - `Eq` + `Hash`: identifiers form lookup keys
/// - `Debug` + `Display`: identifiers appear in errors and diagnostics
///
/// # Example
///
/// ```rust
/// use statewise::core::Identifier;
///
/// fn assert_identifier<T: Identifier>() {}
///
/// assert_identifier::<String>();
/// assert_identifier::<&'static str>();
/// assert_identifier::<u32>();
/// ```
pub trait Identifier: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {}

/// Conversion from "one or many" identifiers into an ordered list.
///
/// Registration operations accept either a single identifier or a
/// collection of them. Single values normalize to a one-element list;
/// collections keep their order.
///
/// # Example
///
/// ```rust
/// use statewise::core::IntoIdentifiers;
///
/// let one: Vec<String> = "draft".into_identifiers();
/// assert_eq!(one, vec!["draft".to_string()]);
///
/// let many: Vec<String> = ["draft", "review"].into_identifiers();
/// assert_eq!(many, vec!["draft".to_string(), "review".to_string()]);
/// ```
pub trait IntoIdentifiers<T> {
    /// Normalize into an ordered list of identifiers.
    fn into_identifiers(self) -> Vec<T>;
}

impl<'a, T: From<&'a str>> IntoIdentifiers<T> for &'a str {
    fn into_identifiers(self) -> Vec<T> {
        vec![T::from(self)]
    }
}

impl<T: From<String>> IntoIdentifiers<T> for String {
    fn into_identifiers(self) -> Vec<T> {
        vec![T::from(self)]
    }
}

impl<T, U: Into<T>, const N: usize> IntoIdentifiers<T> for [U; N] {
    fn into_identifiers(self) -> Vec<T> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T, U: Into<T>> IntoIdentifiers<T> for Vec<U> {
    fn into_identifiers(self) -> Vec<T> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T, U: Into<T> + Clone> IntoIdentifiers<T> for &[U] {
    fn into_identifiers(self) -> Vec<T> {
        self.iter().cloned().map(Into::into).collect()
    }
}
