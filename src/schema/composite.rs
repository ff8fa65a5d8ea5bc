//! Array, object and discriminated-union schemas

use super::{ParseContext, Schema, SchemaError, SchemaResult};
use crate::issue::{IssueCode, PathSegment};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct ArraySchema {
	element: Box<Schema>,
	min: Option<usize>,
	max: Option<usize>,
}

impl ArraySchema {
	pub fn new(element: impl Into<Schema>) -> Self {
		Self {
			element: Box::new(element.into()),
			min: None,
			max: None,
		}
	}

	pub fn min_length(mut self, min: usize) -> Self {
		self.min = Some(min);
		self
	}

	pub fn max_length(mut self, max: usize) -> Self {
		self.max = Some(max);
		self
	}

	pub fn optional(self) -> Schema {
		Schema::from(self).optional()
	}

	pub(super) fn check(&self, value: &Value, ctx: &mut ParseContext) -> Option<Value> {
		let Some(items) = value.as_array() else {
			return ctx.invalid_type("array", Some(value));
		};
		if let Some(min) = self.min.filter(|min| items.len() < *min) {
			let issue = ctx
				.issue(
					IssueCode::TooSmall,
					format!("Array must contain at least {} element(s)", min),
				)
				.with_param("minimum", min)
				.with_param("type", "array")
				.with_param("inclusive", true);
			ctx.push(issue);
		}
		if let Some(max) = self.max.filter(|max| items.len() > *max) {
			let issue = ctx
				.issue(
					IssueCode::TooBig,
					format!("Array must contain at most {} element(s)", max),
				)
				.with_param("maximum", max)
				.with_param("type", "array")
				.with_param("inclusive", true);
			ctx.push(issue);
		}
		let parsed = items
			.iter()
			.enumerate()
			.map(|(index, item)| {
				ctx.at(PathSegment::Index(index), |ctx| self.element.check(Some(item), ctx))
					.unwrap_or(Value::Null)
			})
			.collect();
		Some(Value::Array(parsed))
	}
}

impl From<ArraySchema> for Schema {
	fn from(schema: ArraySchema) -> Self {
		Schema::Array(schema)
	}
}

/// Object with declared fields, checked in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
	fields: Vec<(String, Schema)>,
}

impl ObjectSchema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a field, replacing an earlier declaration with the same name.
	pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
		let name = name.into();
		let schema = schema.into();
		match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
			Some(slot) => slot.1 = schema,
			None => self.fields.push((name, schema)),
		}
		self
	}

	pub fn get(&self, name: &str) -> Option<&Schema> {
		self.fields
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, schema)| schema)
	}

	pub fn into_schema(self) -> Schema {
		Schema::Object(self)
	}

	pub fn optional(self) -> Schema {
		self.into_schema().optional()
	}

	pub(super) fn check(&self, value: &Value, ctx: &mut ParseContext) -> Option<Value> {
		let Some(map) = value.as_object() else {
			return ctx.invalid_type("object", Some(value));
		};
		let mut parsed = Map::new();
		for (name, schema) in &self.fields {
			let checked = ctx.at(PathSegment::Key(name.clone()), |ctx| {
				schema.check(map.get(name), ctx)
			});
			if let Some(checked) = checked {
				parsed.insert(name.clone(), checked);
			}
		}
		Some(Value::Object(parsed))
	}
}

impl From<ObjectSchema> for Schema {
	fn from(schema: ObjectSchema) -> Self {
		Schema::Object(schema)
	}
}

/// Object schemas selected by the literal value of one field.
#[derive(Debug, Clone)]
pub struct DiscriminatedUnion {
	pub(super) discriminator: String,
	pub(super) variants: Vec<(Value, ObjectSchema)>,
}

impl DiscriminatedUnion {
	pub fn new(
		discriminator: impl Into<String>,
		variants: impl IntoIterator<Item = ObjectSchema>,
	) -> SchemaResult<Self> {
		let discriminator = discriminator.into();
		let mut indexed: Vec<(Value, ObjectSchema)> = Vec::new();
		for (index, variant) in variants.into_iter().enumerate() {
			let tag = match variant.get(&discriminator) {
				Some(Schema::Literal(tag)) => tag.clone(),
				Some(_) => {
					return Err(SchemaError::NonLiteralDiscriminator {
						index,
						discriminator,
					});
				}
				None => {
					return Err(SchemaError::MissingDiscriminator {
						index,
						discriminator,
					});
				}
			};
			if indexed.iter().any(|(existing, _)| *existing == tag) {
				return Err(SchemaError::DuplicateDiscriminator { value: tag });
			}
			indexed.push((tag, variant));
		}
		if indexed.is_empty() {
			return Err(SchemaError::NoVariants);
		}
		Ok(Self {
			discriminator,
			variants: indexed,
		})
	}

	pub fn discriminator(&self) -> &str {
		&self.discriminator
	}

	/// Discriminator values in declaration order.
	pub fn options(&self) -> impl Iterator<Item = &Value> {
		self.variants.iter().map(|(tag, _)| tag)
	}

	pub(super) fn check(&self, value: &Value, ctx: &mut ParseContext) -> Option<Value> {
		let Some(map) = value.as_object() else {
			return ctx.invalid_type("object", Some(value));
		};
		let tag = map.get(&self.discriminator);
		match self
			.variants
			.iter()
			.find(|(expected, _)| Some(expected) == tag)
		{
			Some((_, variant)) => variant.check(value, ctx),
			None => {
				let options: Vec<Value> = self.options().cloned().collect();
				let expected = options
					.iter()
					.map(display_option)
					.collect::<Vec<_>>()
					.join(" | ");
				let issue = ctx.at(PathSegment::Key(self.discriminator.clone()), |ctx| {
					ctx.issue(
						IssueCode::InvalidUnionDiscriminator,
						format!("Invalid discriminator value. Expected {}", expected),
					)
				});
				ctx.push(issue.with_param("options", options));
				None
			}
		}
	}
}

impl From<DiscriminatedUnion> for Schema {
	fn from(schema: DiscriminatedUnion) -> Self {
		Schema::DiscriminatedUnion(schema)
	}
}

fn display_option(option: &Value) -> String {
	match option {
		Value::String(text) => format!("'{}'", text),
		other => other.to_string(),
	}
}
