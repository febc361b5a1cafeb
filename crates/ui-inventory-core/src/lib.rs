//! # UI Inventory Core
//!
//! The derivation and grouping engine behind UI Inventory: turns an
//! unordered set of immutable evidence records into de-duplicated
//! components and styles, and answers drill-down queries over them.
//!
//! Every function is pure and synchronous. Nothing is cached and nothing
//! is written back to the evidence; callers pass the full, already-scoped
//! record slice on every call and own the returned values.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Evidence record types |
//! | [`hash`] | Stable string → id hashing |
//! | [`signature`] | Component signatures and role inference |
//! | [`classify`] | Category, page label, token and style-kind helpers |
//! | [`components`] | Component aggregation |
//! | [`styles`] | Style facts and exact-match style aggregation |
//! | [`drilldown`] | Captures, locations and related components |
//! | [`essentials`] | Visual essentials table |
//! | [`buckets`] | Bucketed variant grouping |
//! | [`scope`] | Project scoping |
//! | [`export`] | Versioned export payload |

pub mod buckets;
pub mod classify;
pub mod components;
pub mod drilldown;
pub mod essentials;
pub mod export;
pub mod hash;
pub mod models;
pub mod scope;
pub mod signature;
pub mod styles;
