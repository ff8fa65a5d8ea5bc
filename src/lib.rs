//! # Reinhardt Form State
//!
//! Submission state for form actions.
//!
//! A form action receives the previous [`FormState`] and the submitted input,
//! validates the input, and returns the next state. This crate provides the
//! state type and the conversions around it:
//!
//! - [`issue_to_form_error`]: projects one validation issue onto a [`FormError`]
//! - [`error_to_form_state`]: turns a validation error plus the raw input into
//!   a failure state
//! - [`form_state_schema`]: a [`Schema`] validating a serialized `FormState`
//! - [`validate_form`]: runs a schema over raw input and returns the next state
//!
//! ## Wire shape
//!
//! ```json
//! { "success": true, "message": "Saved", "data": { ... } }
//! { "success": false, "message": "Validation failed", "errors": [...], "error": "...", "data": { ... } }
//! ```
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("email", Schema::string().email())
//!     .field("password", Schema::string().min_length(8))
//!     .into_schema();
//!
//! let raw = json!({ "email": "a", "password": "short" });
//! let state: FormState<serde_json::Value> = match schema.parse(&raw) {
//!     Ok(data) => FormState::success(data),
//!     Err(error) => error_to_form_state(&error, raw),
//! };
//!
//! match &state {
//!     FormState::Success(_) => unreachable!(),
//!     FormState::Failure(failure) => {
//!         assert_eq!(failure.message.as_deref(), Some("Validation failed"));
//!         assert_eq!(failure.error_list().len(), 2);
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `validator` - conversion from `validator::ValidationErrors`

pub mod config;
pub mod form_error;
pub mod issue;
pub mod mapping;
pub mod schema;
pub mod state;
pub mod submission;

#[cfg(feature = "validator")]
pub mod validator_compat;

pub use config::{ConfigError, ConfigResult, FormStateConfig, VALIDATION_FAILED_MESSAGE};
pub use form_error::{FormError, NON_FIELD_ERRORS_KEY};
pub use issue::{Issue, IssueCode, IssueSource, PathSegment, ValidationError, ValidationIssue};
pub use mapping::{
	error_to_form_failure, error_to_form_state, error_to_form_state_with, issue_to_form_error,
};
pub use schema::{
	ArraySchema, DEFAULT_FORM_STATE_SCHEMA, DiscriminatedUnion, ObjectSchema, ParseError, Schema,
	SchemaError, SchemaResult, StringSchema, form_error_schema, form_state_schema,
};
pub use state::{FormFailure, FormState, FormSuccess};
pub use submission::validate_form;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::config::FormStateConfig;
	pub use crate::form_error::FormError;
	pub use crate::issue::{Issue, IssueSource, PathSegment, ValidationError, ValidationIssue};
	pub use crate::mapping::{error_to_form_state, issue_to_form_error};
	pub use crate::path;
	pub use crate::schema::{DEFAULT_FORM_STATE_SCHEMA, Schema, form_state_schema};
	pub use crate::state::{FormFailure, FormState, FormSuccess};
	pub use crate::submission::validate_form;
}
