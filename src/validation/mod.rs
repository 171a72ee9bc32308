//! Error model and validation context.
//!
//! Validation never stops at the first problem. Every check appends to a
//! [`ValidationErrors`] collection and traversal carries on, so a single
//! malformed subtree does not hide findings elsewhere in the model.
//!
//! # Example
//!
//! ```rust
//! use statewise::validation::{ErrorKind, ObjectType, ValidationContext, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! let ctx = ValidationContext::new().with_index("Regions", 0);
//!
//! errors.add(ctx.error(ErrorKind::Required, ObjectType::Region, "ID", "ID is required"));
//!
//! assert_eq!(errors.count(ErrorKind::Required), 1);
//! assert_eq!(errors.iter().next().map(|e| e.path.as_str()), Some("Regions[0]"));
//! assert!(errors.into_result().is_err());
//! ```

pub mod context;
pub mod error;
pub mod options;

pub use context::ValidationContext;
pub use error::{ErrorKind, ObjectType, ValidationError, ValidationErrors};
pub use options::{ValidationOptions, DEFAULT_MAX_CYCLE_DEPTH};
