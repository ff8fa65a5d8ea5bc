//! JSON schemas producing structured validation issues
//!
//! A [`Schema`] checks a [`serde_json::Value`] and, on failure, reports every
//! problem it found as a [`ValidationError`] whose issues carry a code, a path
//! and a message. Those issues feed straight into
//! [`error_to_form_state`](crate::mapping::error_to_form_state).
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::Schema;
//! use serde_json::json;
//!
//! let login = Schema::object()
//!     .field("email", Schema::string().email())
//!     .field("password", Schema::string().min_length(8))
//!     .into_schema();
//!
//! let error = login
//!     .parse(&json!({ "email": "a@example.com", "password": "short" }))
//!     .unwrap_err();
//! assert_eq!(error.issues[0].code.as_str(), "too_small");
//! ```
//!
//! Unknown object keys are stripped from the parsed value.

mod composite;
mod state;
mod string;

pub use composite::{ArraySchema, DiscriminatedUnion, ObjectSchema};
pub use state::{DEFAULT_FORM_STATE_SCHEMA, form_error_schema, form_state_schema};
pub use string::StringSchema;

use crate::issue::{IssueCode, PathSegment, ValidationError, ValidationIssue};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("Discriminated union needs at least one variant")]
	NoVariants,
	#[error("Variant {index} has no `{discriminator}` field")]
	MissingDiscriminator { index: usize, discriminator: String },
	#[error("Variant {index}: `{discriminator}` must be a literal")]
	NonLiteralDiscriminator { index: usize, discriminator: String },
	#[error("Duplicate discriminator value {value}")]
	DuplicateDiscriminator { value: Value },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failure of [`Schema::parse_into`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	#[error(transparent)]
	Invalid(#[from] ValidationError),
	#[error("Parsed value does not fit the target type: {0}")]
	Deserialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub enum Schema {
	/// Accepts any value, including an absent one.
	Any,
	String(StringSchema),
	Number,
	/// Whole number, optionally bounded below by `min`.
	Integer { min: Option<i64> },
	Boolean,
	Literal(Value),
	Array(ArraySchema),
	Object(ObjectSchema),
	/// Open key-value mapping whose values all match the inner schema.
	///
	/// Values are checked in key order (`serde_json::Map` is sorted), so
	/// issues follow the sorted keys rather than the submitted order.
	Record(Box<Schema>),
	/// Accepts an absent value; a present one must match the inner schema.
	Optional(Box<Schema>),
	/// First matching branch wins.
	Union(Vec<Schema>),
	DiscriminatedUnion(DiscriminatedUnion),
}

impl Schema {
	pub fn any() -> Self {
		Schema::Any
	}

	pub fn string() -> StringSchema {
		StringSchema::new()
	}

	pub fn number() -> Self {
		Schema::Number
	}

	pub fn integer() -> Self {
		Schema::Integer { min: None }
	}

	/// Whole number `>= 0`, such as an array index.
	pub fn non_negative_integer() -> Self {
		Schema::Integer { min: Some(0) }
	}

	pub fn boolean() -> Self {
		Schema::Boolean
	}

	pub fn literal(value: impl Into<Value>) -> Self {
		Schema::Literal(value.into())
	}

	pub fn array(element: impl Into<Schema>) -> ArraySchema {
		ArraySchema::new(element)
	}

	pub fn object() -> ObjectSchema {
		ObjectSchema::new()
	}

	pub fn record(values: impl Into<Schema>) -> Self {
		Schema::Record(Box::new(values.into()))
	}

	pub fn union(branches: impl IntoIterator<Item = Schema>) -> Self {
		Schema::Union(branches.into_iter().collect())
	}

	/// Builds a union selected by the literal value of `discriminator`.
	///
	/// Every variant must declare `discriminator` as a [`Schema::Literal`], and
	/// no two variants may share the same literal.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::Schema;
	/// use serde_json::json;
	///
	/// let shape = Schema::discriminated_union(
	///     "kind",
	///     [
	///         Schema::object()
	///             .field("kind", Schema::literal("circle"))
	///             .field("radius", Schema::number()),
	///         Schema::object()
	///             .field("kind", Schema::literal("square"))
	///             .field("side", Schema::number()),
	///     ],
	/// )
	/// .unwrap();
	///
	/// assert!(shape.parse(&json!({ "kind": "circle", "radius": 2.0 })).is_ok());
	/// assert!(shape.parse(&json!({ "kind": "triangle" })).is_err());
	/// ```
	pub fn discriminated_union(
		discriminator: impl Into<String>,
		variants: impl IntoIterator<Item = ObjectSchema>,
	) -> SchemaResult<Self> {
		DiscriminatedUnion::new(discriminator, variants).map(Schema::DiscriminatedUnion)
	}

	pub fn optional(self) -> Self {
		match self {
			Schema::Optional(_) => self,
			other => Schema::Optional(Box::new(other)),
		}
	}

	/// Validates `value`, returning the parsed value or every issue found.
	pub fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
		let mut ctx = ParseContext::default();
		let parsed = self.check(Some(value), &mut ctx);
		if ctx.issues.is_empty() {
			Ok(parsed.unwrap_or(Value::Null))
		} else {
			tracing::trace!(issue_count = ctx.issues.len(), "schema parse failed");
			Err(ValidationError::new(ctx.issues))
		}
	}

	/// Validates `value` and deserializes the parsed result into `T`.
	pub fn parse_into<T: DeserializeOwned>(&self, value: &Value) -> Result<T, ParseError> {
		let parsed = self.parse(value)?;
		Ok(serde_json::from_value(parsed)?)
	}

	/// Checks one (possibly absent) value. `None` in the result means the
	/// value is absent from the parsed output.
	pub(crate) fn check(&self, value: Option<&Value>, ctx: &mut ParseContext) -> Option<Value> {
		match self {
			Schema::Any => value.cloned(),
			Schema::Optional(inner) => value.and_then(|value| inner.check(Some(value), ctx)),
			Schema::Literal(expected) => {
				if value == Some(expected) {
					Some(expected.clone())
				} else {
					let issue = ctx
						.issue(
							IssueCode::InvalidLiteral,
							format!("Invalid literal value, expected {}", expected),
						)
						.with_param("expected", expected.clone());
					ctx.push(issue);
					None
				}
			}
			_ => {
				let Some(value) = value else {
					ctx.invalid_type(self.expected_type(), None);
					return None;
				};
				self.check_present(value, ctx)
			}
		}
	}

	fn check_present(&self, value: &Value, ctx: &mut ParseContext) -> Option<Value> {
		match self {
			Schema::String(schema) => match value.as_str() {
				Some(text) => {
					schema.check(text, ctx);
					Some(value.clone())
				}
				None => ctx.invalid_type("string", Some(value)),
			},
			Schema::Number if value.is_number() => Some(value.clone()),
			Schema::Integer { min } if value.is_i64() || value.is_u64() => {
				match (min, value.as_i64()) {
					(Some(min), Some(n)) if n < *min => {
						let issue = ctx
							.issue(
								IssueCode::TooSmall,
								format!("Number must be greater than or equal to {}", min),
							)
							.with_param("minimum", *min)
							.with_param("inclusive", true);
						ctx.push(issue);
						None
					}
					_ => Some(value.clone()),
				}
			}
			Schema::Integer { .. } if value.is_number() => {
				let issue = ctx
					.issue(IssueCode::InvalidType, "Expected integer, received float")
					.with_param("expected", "integer")
					.with_param("received", "float");
				ctx.push(issue);
				None
			}
			Schema::Boolean if value.is_boolean() => Some(value.clone()),
			Schema::Array(schema) => schema.check(value, ctx),
			Schema::Object(schema) => schema.check(value, ctx),
			Schema::DiscriminatedUnion(schema) => schema.check(value, ctx),
			Schema::Record(values) => match value.as_object() {
				Some(map) => {
					let mut parsed = serde_json::Map::new();
					for (key, item) in map {
						let checked = ctx.at(PathSegment::Key(key.clone()), |ctx| {
							values.check(Some(item), ctx)
						});
						if let Some(checked) = checked {
							parsed.insert(key.clone(), checked);
						}
					}
					Some(Value::Object(parsed))
				}
				None => ctx.invalid_type("object", Some(value)),
			},
			Schema::Union(branches) => {
				let mut failures = Vec::with_capacity(branches.len());
				for branch in branches {
					let mut branch_ctx = ParseContext {
						path: ctx.path.clone(),
						issues: Vec::new(),
					};
					let parsed = branch.check(Some(value), &mut branch_ctx);
					if branch_ctx.issues.is_empty() {
						return parsed;
					}
					failures.push(ValidationError::new(branch_ctx.issues));
				}
				let issue = ctx
					.issue(IssueCode::InvalidUnion, "Invalid input")
					.with_union_errors(failures);
				ctx.push(issue);
				None
			}
			_ => ctx.invalid_type(self.expected_type(), Some(value)),
		}
	}

	fn expected_type(&self) -> &'static str {
		match self {
			Schema::String(_) => "string",
			Schema::Number => "number",
			Schema::Integer { .. } => "integer",
			Schema::Boolean => "boolean",
			Schema::Array(_) => "array",
			Schema::Object(_) | Schema::Record(_) | Schema::DiscriminatedUnion(_) => "object",
			Schema::Any | Schema::Optional(_) | Schema::Literal(_) | Schema::Union(_) => "value",
		}
	}
}

/// Name of a JSON value's type as used in `invalid_type` messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Current path and the issues collected so far during one parse.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
	path: Vec<PathSegment>,
	issues: Vec<ValidationIssue>,
}

impl ParseContext {
	/// Builds an issue located at the current path. Call [`push`](Self::push) to record it.
	pub(crate) fn issue(&self, code: IssueCode, message: impl Into<String>) -> ValidationIssue {
		ValidationIssue::new(code, self.path.clone(), message)
	}

	pub(crate) fn push(&mut self, issue: ValidationIssue) {
		self.issues.push(issue);
	}

	pub(crate) fn at<T>(
		&mut self,
		segment: PathSegment,
		f: impl FnOnce(&mut ParseContext) -> T,
	) -> T {
		self.path.push(segment);
		let result = f(self);
		self.path.pop();
		result
	}

	/// Records an `invalid_type` issue; `None` means the value was absent.
	pub(crate) fn invalid_type(&mut self, expected: &str, received: Option<&Value>) -> Option<Value> {
		let issue = match received {
			None => self
				.issue(IssueCode::InvalidType, "Required")
				.with_param("received", "undefined"),
			Some(value) => self
				.issue(
					IssueCode::InvalidType,
					format!("Expected {}, received {}", expected, type_name(value)),
				)
				.with_param("received", type_name(value)),
		}
		.with_param("expected", expected);
		self.push(issue);
		None
	}
}
