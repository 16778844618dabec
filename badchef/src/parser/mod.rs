//! Parsers for recipe text fields.

pub mod ingredients;
pub mod instructions;

pub use ingredients::{capitalize, parse_ingredients};
pub use instructions::{Instructions, Section};
