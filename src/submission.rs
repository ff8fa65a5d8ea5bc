//! Validating a form submission into a `FormState`

use crate::mapping::error_to_form_state;
use crate::schema::{ParseError, Schema};
use crate::state::{FormFailure, FormState};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Validates `raw` against `schema` and returns the next form state.
///
/// Valid input becomes a success holding the parsed, typed data. Invalid
/// input becomes the failure built by
/// [`error_to_form_state`](crate::mapping::error_to_form_state), keeping
/// `raw` for re-display. When the parsed value cannot be deserialized into
/// `T`, the failure carries the deserializer's message in `error`.
///
/// `raw` is stored as given. A failure built from non-object input does not
/// pass [`form_state_schema`](crate::schema::form_state_schema), whose
/// failure branch only accepts an object as `data`.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{validate_form, FormState, Schema};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Login {
///     email: String,
/// }
///
/// let schema = Schema::object()
///     .field("email", Schema::string().email())
///     .into_schema();
///
/// let state: FormState<Login> = validate_form(&schema, json!({ "email": "nope" }));
/// match state {
///     FormState::Success(success) => println!("welcome {}", success.data.email),
///     FormState::Failure(failure) => assert_eq!(failure.error_list()[0].message, "Invalid email"),
/// }
/// ```
pub fn validate_form<T: DeserializeOwned>(schema: &Schema, raw: Value) -> FormState<T, Value> {
	match schema.parse_into::<T>(&raw) {
		Ok(data) => FormState::success(data),
		Err(ParseError::Invalid(error)) => error_to_form_state(&error, raw),
		Err(ParseError::Deserialize(error)) => {
			tracing::debug!(%error, "validated form data does not fit the target type");
			FormFailure::new()
				.with_error(error.to_string())
				.with_data(raw)
				.into()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::path;
	use assert_json_diff::assert_json_eq;
	use rstest::rstest;
	use serde::{Deserialize, Serialize};
	use serde_json::json;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Signup {
		email: String,
		password: String,
	}

	fn signup_schema() -> Schema {
		Schema::object()
			.field("email", Schema::string().email())
			.field("password", Schema::string().min_length(8))
			.into_schema()
	}

	#[rstest]
	fn test_valid_submission_becomes_success() {
		// Arrange
		let raw = json!({ "email": "a@example.com", "password": "long enough", "csrf": "t" });

		// Act
		let state: FormState<Signup> = validate_form(&signup_schema(), raw);

		// Assert
		assert_json_eq!(
			serde_json::to_value(&state).unwrap(),
			json!({
				"success": true,
				"data": { "email": "a@example.com", "password": "long enough" }
			})
		);
	}

	#[rstest]
	fn test_invalid_submission_keeps_raw_input() {
		// Arrange
		let raw = json!({ "email": "a", "password": "short" });

		// Act
		let state: FormState<Signup> = validate_form(&signup_schema(), raw.clone());

		// Assert
		let failure = state.into_result().unwrap_err();
		assert_eq!(failure.message.as_deref(), Some("Validation failed"));
		assert_eq!(failure.data, Some(raw));
		let paths: Vec<_> = failure.error_list().iter().map(|e| e.path.clone()).collect();
		assert_eq!(paths, vec![path!["email"], path!["password"]]);
	}

	#[rstest]
	fn test_non_object_input_is_kept_as_given() {
		// Arrange
		let raw = json!("email=a@example.com");

		// Act
		let state: FormState<Signup> = validate_form(&signup_schema(), raw.clone());

		// Assert
		assert_eq!(state.raw_input(), Some(&raw));
		assert_eq!(state.errors()[0].message, "Expected object, received string");
		let wire = serde_json::to_value(&state).unwrap();
		let error = crate::schema::DEFAULT_FORM_STATE_SCHEMA
			.parse(&wire)
			.unwrap_err();
		assert_eq!(error.issues[0].path, path!["data"]);
	}

	#[rstest]
	fn test_type_mismatch_fills_error_field() {
		// Arrange
		let schema = Schema::object().field("email", Schema::string()).into_schema();

		// Act
		let state: FormState<Signup> = validate_form(&schema, json!({ "email": "a@example.com" }));

		// Assert
		match state {
			FormState::Failure(failure) => {
				assert!(failure.errors.is_none());
				assert!(failure.error.is_some_and(|e| e.contains("password")));
			}
			FormState::Success(_) => panic!("expected a failure state"),
		}
	}
}
