//! Onboard Schema - step schemas and entity drafts
//!
//! The data layer of the onboarding wizards:
//! - Field catalogs with declared kinds and constraints
//! - Conditional visibility and requirement predicates
//! - Step descriptors and the per-wizard step registry
//! - The accumulating [`EntityDraft`] and subset-scoped validation
//!
//! # Example
//!
//! ```rust
//! use onboard_schema::{StepRegistry, WizardKind, WizardMode};
//!
//! let registry = StepRegistry::for_wizard(WizardKind::Property, WizardMode::Create)?;
//! assert_eq!(registry.steps().first().unwrap().title, "Basics");
//! # Ok::<(), onboard_schema::SchemaError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod condition;
pub mod error;
pub mod field;
pub mod fields;
pub mod registry;
pub mod step;
pub mod validate;
pub mod value;

// Re-exports for convenience
pub use condition::Condition;
pub use error::{FieldError, SchemaError};
pub use field::{FieldKind, FieldName, FieldSpec, Pattern, Requirement};
pub use registry::{StepRegistry, WizardKind, WizardMode};
pub use step::{SeedFn, StepSpec};
pub use validate::validate_subset;
pub use value::{Attachment, ChildDraft, EntityDraft, FieldValue, FileHandle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
