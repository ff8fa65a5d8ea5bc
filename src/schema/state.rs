//! Schemas describing a serialized `FormState`
//!
//! These validate a state value that crossed a boundary (persisted,
//! transmitted, or read back from a client), not the form input itself.

use super::{DiscriminatedUnion, ObjectSchema, Schema};
use serde_json::Value;
use std::sync::LazyLock;

/// State schema whose success branch accepts any `data`.
pub static DEFAULT_FORM_STATE_SCHEMA: LazyLock<Schema> =
	LazyLock::new(|| form_state_schema(Schema::Any));

/// Schema of one serialized [`FormError`](crate::FormError).
pub fn form_error_schema() -> Schema {
	Schema::object()
		.field("code", Schema::string())
		.field(
			"path",
			Schema::array(Schema::union([
				Schema::from(Schema::string()),
				Schema::non_negative_integer(),
			])),
		)
		.field("message", Schema::string())
		.into_schema()
}

fn success_branch(data: Schema) -> ObjectSchema {
	Schema::object()
		.field("success", Schema::literal(true))
		.field("message", Schema::string().optional())
		.field("data", data)
		.field("errors", Schema::array(Schema::Any).max_length(0).optional())
}

fn failure_branch() -> ObjectSchema {
	Schema::object()
		.field("success", Schema::literal(false))
		.field("message", Schema::string().optional())
		.field("error", Schema::string().optional())
		.field("errors", Schema::array(form_error_schema()).optional())
		.field("data", Schema::record(Schema::Any).optional())
}

/// Builds a schema accepting either variant of a serialized form state.
///
/// The success branch requires `data` to match `data_schema`. The failure
/// branch only requires `data`, when present, to be an object: it holds raw
/// input, which is allowed to be invalid.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{form_state_schema, Schema};
/// use serde_json::json;
///
/// let schema = form_state_schema(
///     Schema::object()
///         .field("email", Schema::string().email())
///         .into_schema(),
/// );
///
/// assert!(schema.parse(&json!({ "success": true, "data": { "email": "a@example.com" } })).is_ok());
/// assert!(schema.parse(&json!({ "success": true, "data": { "email": "" } })).is_err());
/// assert!(schema.parse(&json!({ "success": false, "data": { "email": "" } })).is_ok());
/// ```
pub fn form_state_schema(data_schema: Schema) -> Schema {
	let union = DiscriminatedUnion {
		discriminator: "success".to_string(),
		variants: vec![
			(Value::Bool(true), success_branch(data_schema)),
			(Value::Bool(false), failure_branch()),
		],
	};
	Schema::DiscriminatedUnion(union)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::issue::IssueCode;
	use crate::path;
	use rstest::rstest;
	use serde_json::json;

	fn login_state_schema() -> Schema {
		form_state_schema(
			Schema::object()
				.field("email", Schema::string().email())
				.field("password", Schema::string().min_length(8))
				.into_schema(),
		)
	}

	#[rstest]
	#[case(json!({ "success": true, "data": { "email": "a@example.com", "password": "long enough" } }))]
	#[case(json!({ "success": true, "message": "Saved", "data": { "email": "a@example.com", "password": "long enough" }, "errors": [] }))]
	#[case(json!({ "success": false }))]
	#[case(json!({ "success": false, "data": { "email": "" } }))]
	#[case(json!({ "success": false, "error": "Server unavailable", "data": { "n": [1, { "x": null }] } }))]
	#[case(json!({ "success": false, "message": "Validation failed", "errors": [
		{ "code": "too_small", "path": ["password"], "message": "Too short" },
		{ "code": "invalid_type", "path": ["items", 0], "message": "Required" }
	] }))]
	fn test_state_schema_accepts(#[case] state: Value) {
		// Act
		let result = login_state_schema().parse(&state);

		// Assert
		assert!(result.is_ok(), "Expected {state} to validate: {result:?}");
	}

	#[rstest]
	#[case(json!({ "success": true, "data": { "email": "", "password": "long enough" } }), path!["data", "email"])]
	#[case(json!({ "success": true, "data": { "email": "a@example.com", "password": "long enough" }, "errors": [{}] }), path!["errors"])]
	#[case(json!({ "success": true }), path!["data"])]
	#[case(json!({ "success": false, "data": "raw" }), path!["data"])]
	#[case(json!({ "success": false, "errors": [{ "code": "x", "message": "y" }] }), path!["errors", 0, "path"])]
	#[case(json!({ "success": false, "message": 3 }), path!["message"])]
	#[case(json!({ "success": false, "errors": [{ "code": "x", "path": [-1], "message": "m" }] }), path!["errors", 0, "path", 0])]
	fn test_state_schema_rejects(
		#[case] state: Value,
		#[case] first_path: Vec<crate::PathSegment>,
	) {
		// Act
		let error = login_state_schema().parse(&state).unwrap_err();

		// Assert
		assert_eq!(error.issues[0].path, first_path);
	}

	#[rstest]
	#[case(json!(["items", 0, "name"]), true)]
	#[case(json!(["items", -1, "name"]), false)]
	fn test_error_paths_agree_with_form_state_type(#[case] path: Value, #[case] valid: bool) {
		// Arrange
		let state = json!({
			"success": false,
			"errors": [{ "code": "custom", "path": path, "message": "m" }]
		});

		// Act
		let checked = DEFAULT_FORM_STATE_SCHEMA.parse(&state);
		let typed = serde_json::from_value::<crate::FormState<Value>>(state);

		// Assert
		assert_eq!(checked.is_ok(), valid);
		assert_eq!(typed.is_ok(), valid);
	}

	#[rstest]
	fn test_state_schema_requires_boolean_discriminator() {
		// Act
		let error = login_state_schema()
			.parse(&json!({ "success": "true", "data": {} }))
			.unwrap_err();

		// Assert
		assert_eq!(error.issues[0].code, IssueCode::InvalidUnionDiscriminator);
		assert_eq!(
			error.issues[0].message,
			"Invalid discriminator value. Expected true | false"
		);
	}

	#[rstest]
	fn test_default_state_schema_accepts_any_success_data() {
		// Act + Assert
		for data in [json!(1), json!("x"), json!([1, 2]), json!({ "a": { "b": null } })] {
			let state = json!({ "success": true, "data": data });
			assert!(DEFAULT_FORM_STATE_SCHEMA.parse(&state).is_ok());
		}
	}

	#[rstest]
	fn test_parsed_state_strips_unknown_keys() {
		// Act
		let parsed = DEFAULT_FORM_STATE_SCHEMA
			.parse(&json!({ "success": false, "error": "boom", "extra": 1 }))
			.unwrap();

		// Assert
		assert_eq!(parsed, json!({ "success": false, "error": "boom" }));
	}
}
