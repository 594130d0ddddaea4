//! Onboard Wizard - session state machine
//!
//! Drives one mounted onboarding wizard:
//! - Step cursor over the registry's visible steps
//! - Step-scoped validation on `advance()`, none on `retreat()`
//! - Whole-entity validation on `begin_submit()`
//! - Phase machine guarding edits while a submission is in flight
//!
//! # Example
//!
//! ```rust
//! use onboard_schema::WizardKind;
//! use onboard_wizard::WizardSession;
//!
//! let session = WizardSession::create(WizardKind::Property)?;
//! assert_eq!(session.current_step().title, "Basics");
//! # Ok::<(), onboard_schema::SchemaError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod phase;
pub mod session;

// Re-exports for convenience
pub use error::WizardError;
pub use phase::{allowed_transitions, validate_transition, PhaseKind, WizardPhase};
pub use session::WizardSession;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
