//! Form state settings
//!
//! Host applications usually embed [`FormStateConfig`] in their own settings
//! and pass it to
//! [`error_to_form_state_with`](crate::mapping::error_to_form_state_with).

use serde::{Deserialize, Serialize};

/// Message attached to every failure assembled from validation issues.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid form state settings: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("failure_message must not be empty")]
	EmptyFailureMessage,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStateConfig {
	/// Message for failure states built from validation errors.
	pub failure_message: String,
}

impl Default for FormStateConfig {
	fn default() -> Self {
		Self {
			failure_message: VALIDATION_FAILED_MESSAGE.to_string(),
		}
	}
}

impl FormStateConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
		self.failure_message = message.into();
		self
	}

	/// Parses and validates a JSON settings fragment. Missing keys take defaults.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::FormStateConfig;
	///
	/// let config = FormStateConfig::from_json(r#"{ "failure_message": "Please fix the errors below" }"#).unwrap();
	/// assert_eq!(config.failure_message, "Please fix the errors below");
	///
	/// assert!(FormStateConfig::from_json(r#"{ "failure_message": "" }"#).is_err());
	/// ```
	pub fn from_json(raw: &str) -> ConfigResult<Self> {
		let config: Self = serde_json::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> ConfigResult<()> {
		if self.failure_message.trim().is_empty() {
			return Err(ConfigError::EmptyFailureMessage);
		}
		Ok(())
	}
}
