//! Contains implementations of the `Board` trait.

/// A `Board` implementation for the game of NoGo.
pub mod nogo;
