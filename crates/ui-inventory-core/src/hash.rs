//! Stable string → ID hashing.
//!
//! A 32-bit multiply-add hash (`hash = hash * 33 + code_unit`, seed 5381),
//! hex-encoded and prefixed with an entity tag. The input is walked as
//! UTF-16 code units so that IDs agree with implementations that hash
//! JavaScript `charCodeAt` values. IDs are part of the export contract:
//! changing the recurrence changes every component and style id.
//!
//! # Example
//!
//! ```rust
//! use ui_inventory_core::hash::{stable_id, IdKind};
//!
//! let a = stable_id(IdKind::Component, "button|button|Save");
//! let b = stable_id(IdKind::Component, "button|button|Save");
//! assert_eq!(a, b);
//! assert!(a.starts_with("comp_"));
//! ```

const SEED: u32 = 5381;

/// Entity type encoded in an ID prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Component,
    Style,
    Location,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Component => "comp_",
            IdKind::Style => "style_",
            IdKind::Location => "loc_",
        }
    }
}

/// Raw 32-bit hash of `input`.
pub fn hash_str(input: &str) -> u32 {
    input.encode_utf16().fold(SEED, |hash, unit| {
        hash.wrapping_mul(33).wrapping_add(u32::from(unit))
    })
}

/// Prefixed, lowercase-hex ID for `input`.
pub fn stable_id(kind: IdKind, input: &str) -> String {
    format!("{}{:x}", kind.prefix(), hash_str(input))
}
