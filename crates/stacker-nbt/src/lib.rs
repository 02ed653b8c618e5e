//! NBT (Named Binary Tag) document model.
//!
//! This crate provides the canonical persisted-state format for one entity:
//! a mutable, insertion-ordered tree of typed values with structural
//! equality, deep merge, and a big-endian binary codec. The stacking engine
//! stores one base tag-tree per storage plus one sparse diff per stacked
//! member, so the model here is deliberately small: get/set/remove by key,
//! deep copy, merge, and serialize/deserialize.

use std::io;

use thiserror::Error;

mod compound;
mod value;

pub use compound::NbtCompound;
pub use value::{NbtList, NbtValue};

/// Failures from the binary tag codec.
///
/// Every variant is fatal to the read or write that produced it; nothing in
/// this crate retries or recovers internally.
#[derive(Debug, Error)]
pub enum NbtError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("unknown tag id: {0}")]
    UnknownTagId(u8),
    #[error("expected tag id {expected}, found {found}")]
    UnexpectedTagId { expected: u8, found: u8 },
    #[error("invalid tag length: {0}")]
    InvalidLength(i32),
    #[error("invalid utf-8 in string tag: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for tag codec operations.
pub type NbtResult<T> = Result<T, NbtError>;

/// Macro for building NBT compounds ergonomically
///
/// # Example
/// ```
/// use stacker_nbt::nbt;
///
/// let compound = nbt! {
///     "Health" => 20.0f32,
///     "Age" => 0i32,
///     "CustomName" => "Jeb",
///     "Brain" => nbt! {
///         "memories" => nbt! {},
///     },
/// };
/// ```
#[macro_export]
macro_rules! nbt {
    // Empty compound
    () => {
        $crate::NbtCompound::new()
    };

    // Compound with entries
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut compound = $crate::NbtCompound::new();
        $(
            compound.insert($key, $value);
        )*
        compound
    }};
}
