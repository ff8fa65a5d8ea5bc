//! Simplified, serializable form errors

use crate::issue::{Issue, PathSegment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key under which whole-object errors are grouped.
///
/// In Django, this is `"__all__"`; a single underscore is used here to follow
/// Rust conventions for internal identifiers.
pub const NON_FIELD_ERRORS_KEY: &str = "_all";

/// One field-level or whole-object validation failure.
///
/// `path` locates the offending value inside the submitted data; an empty
/// path means the error applies to the submission as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormError {
	pub code: String,
	pub path: Vec<PathSegment>,
	pub message: String,
}

impl FormError {
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::{path, FormError};
	///
	/// let error = FormError::new("too_small", path!["password"], "Too short");
	/// assert_eq!(error.dotted_path(), "password");
	/// assert!(!error.is_non_field());
	/// ```
	pub fn new(
		code: impl Into<String>,
		path: Vec<PathSegment>,
		message: impl Into<String>,
	) -> Self {
		Self {
			code: code.into(),
			path,
			message: message.into(),
		}
	}

	pub fn is_non_field(&self) -> bool {
		self.path.is_empty()
	}

	/// Joins the path with dots, e.g. `items.0.name`. Empty for whole-object errors.
	pub fn dotted_path(&self) -> String {
		self.path
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(".")
	}
}

impl fmt::Display for FormError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_non_field() {
			f.write_str(&self.message)
		} else {
			write!(f, "{}: {}", self.dotted_path(), self.message)
		}
	}
}

impl Issue for FormError {
	fn code(&self) -> &str {
		&self.code
	}

	fn path(&self) -> &[PathSegment] {
		&self.path
	}

	fn message(&self) -> &str {
		&self.message
	}
}
