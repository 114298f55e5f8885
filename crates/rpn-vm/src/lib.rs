//! Value model and data stack for the RPN word interpreter.
//!
//! This crate knows nothing about words or dispatch. It provides:
//! - `Value`, the tagged union every stack slot holds, and its kinds
//! - the numeric companions `Vec3`, `Fraction` and `Timecode`
//! - `CompiledBody`, the captured token list behind user-defined words
//! - `Stack`, with the classic RPN manipulation primitives

mod body;
mod error;
mod fraction;
mod stack;
mod timecode;
mod value;
mod vec3;

pub use body::{BodyItem, BodyKind, CompiledBody};
pub use error::StackError;
pub use fraction::{Fraction, MAX_DENOMINATOR, PRECISION};
pub use stack::{KindList, Stack};
pub use timecode::Timecode;
pub use value::{Value, ValueKind};
pub use vec3::{Axis, Vec3};
