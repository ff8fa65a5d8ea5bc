//! String schema and its checks

use super::{ParseContext, Schema};
use crate::issue::IssueCode;
use regex::Regex;
use std::sync::LazyLock;

// Practical email pattern: local part, `@`, dotted domain with a 2+ letter TLD.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

#[derive(Debug, Clone)]
enum StringCheck {
	MinLength(usize),
	MaxLength(usize),
	Email,
	Pattern(Regex),
}

#[derive(Debug, Clone)]
struct Check {
	kind: StringCheck,
	message: Option<String>,
}

/// Schema for JSON strings with optional length, email and pattern checks.
///
/// Lengths count Unicode scalar values. Every failing check is reported.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::Schema;
/// use serde_json::json;
///
/// let password = Schema::from(Schema::string().min_length(8));
/// let error = password.parse(&json!("short")).unwrap_err();
/// assert_eq!(error.issues[0].message, "String must contain at least 8 character(s)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
	checks: Vec<Check>,
}

impl StringSchema {
	pub fn new() -> Self {
		Self::default()
	}

	fn push(mut self, kind: StringCheck) -> Self {
		self.checks.push(Check {
			kind,
			message: None,
		});
		self
	}

	pub fn min_length(self, min: usize) -> Self {
		self.push(StringCheck::MinLength(min))
	}

	pub fn max_length(self, max: usize) -> Self {
		self.push(StringCheck::MaxLength(max))
	}

	pub fn email(self) -> Self {
		self.push(StringCheck::Email)
	}

	/// Requires the whole value to match `pattern`.
	pub fn pattern(self, pattern: &str) -> Result<Self, regex::Error> {
		let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
		Ok(self.push(StringCheck::Pattern(anchored)))
	}

	/// Replaces the default message of the most recently added check.
	///
	/// Has no effect when no check has been added yet.
	pub fn message(mut self, message: impl Into<String>) -> Self {
		if let Some(last) = self.checks.last_mut() {
			last.message = Some(message.into());
		}
		self
	}

	pub fn optional(self) -> Schema {
		Schema::from(self).optional()
	}

	pub(super) fn check(&self, value: &str, ctx: &mut ParseContext) {
		let length = value.chars().count();
		for check in &self.checks {
			let mut issue = match &check.kind {
				StringCheck::MinLength(min) if length < *min => ctx
					.issue(
						IssueCode::TooSmall,
						format!("String must contain at least {} character(s)", min),
					)
					.with_param("minimum", *min)
					.with_param("type", "string")
					.with_param("inclusive", true),
				StringCheck::MaxLength(max) if length > *max => ctx
					.issue(
						IssueCode::TooBig,
						format!("String must contain at most {} character(s)", max),
					)
					.with_param("maximum", *max)
					.with_param("type", "string")
					.with_param("inclusive", true),
				StringCheck::Email if !EMAIL_REGEX.is_match(value) => ctx
					.issue(IssueCode::InvalidString, "Invalid email")
					.with_param("validation", "email"),
				StringCheck::Pattern(regex) if !regex.is_match(value) => ctx
					.issue(IssueCode::InvalidString, "Invalid")
					.with_param("validation", "regex"),
				_ => continue,
			};
			if let Some(message) = &check.message {
				issue.message = message.clone();
			}
			ctx.push(issue);
		}
	}
}

impl From<StringSchema> for Schema {
	fn from(schema: StringSchema) -> Self {
		Schema::String(schema)
	}
}
