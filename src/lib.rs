//! # UI Inventory
//!
//! Turns captured UI evidence (screenshots, computed style primitives and
//! DOM identity of elements on live webpages) into a browsable inventory
//! of de-duplicated components and styles.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │  Evidence    │──▶│  Derivation core │──▶│  CLI / JSON  │
//! │  (JSON file) │   │ (pure, no cache) │   │   export     │
//! └──────────────┘   └──────────────────┘   └──────────────┘
//! ```
//!
//! The derivation engine lives in the `ui-inventory-core` crate and does
//! no I/O. This crate loads configuration and evidence, applies project
//! scoping, and presents or exports the engine's results.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`evidence`] | Evidence loading and project scoping |
//! | [`inspect`] | Component/style listings and drill-downs |
//! | [`groups`] | Bucketed grouping, explain, variants |
//! | [`stats`] | Inventory summary |
//! | [`export`] | Versioned JSON export |

pub mod config;
pub mod evidence;
pub mod export;
pub mod groups;
pub mod inspect;
pub mod stats;

pub use ui_inventory_core as engine;
