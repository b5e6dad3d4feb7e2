//! Validation profiles for dynamodel.
//!
//! A [`ValidationProfile`] keeps a model configuration and its rule
//! descriptors in a JSON or TOML document, so rule sets can be changed
//! without recompiling.
//!
//! ```
//! use dynamodel_config::{FileFormat, ValidationProfile};
//!
//! let profile = ValidationProfile::parse(
//!     r#"
//!     [[rules]]
//!     attributes = "name, email"
//!     kind = "required"
//!     "#,
//!     FileFormat::Toml,
//! )
//! .unwrap();
//!
//! assert_eq!(profile.rules.len(), 1);
//! ```
//!
//! One file may also hold several named profiles; see [`ProfileDocument`]
//! and [`ValidationProfile::load_named`].

pub mod error;
pub mod document;
pub mod profile;

pub use error::{ConfigError, Result};
pub use document::{FileFormat, ProfileDocument};
pub use profile::ValidationProfile;
