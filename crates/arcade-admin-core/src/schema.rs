//! Model schemas
//!
//! A schema lists the fields a model stores. The registry checks every field
//! name in its configuration against these schemas when it is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field storage kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
	/// Text column
	String,
	/// Integer column
	Int,
	/// Floating point or decimal column
	Float,
	/// Boolean column
	Bool,
	/// Timestamp column
	DateTime,
	/// Free-form JSON column
	Json,
	/// Array of strings
	StringList,
	/// Enumeration with fixed variants
	Enum { variants: Vec<String> },
	/// Relation to another model
	Relation { target: String, many: bool },
}

impl FieldKind {
	/// Create a to-one relation kind
	pub fn relation(target: impl Into<String>) -> Self {
		FieldKind::Relation {
			target: target.into(),
			many: false,
		}
	}

	/// Create a to-many relation kind
	pub fn relation_many(target: impl Into<String>) -> Self {
		FieldKind::Relation {
			target: target.into(),
			many: true,
		}
	}

	/// Create an enumeration kind
	pub fn enumeration(variants: &[&str]) -> Self {
		FieldKind::Enum {
			variants: variants.iter().map(|v| v.to_string()).collect(),
		}
	}

	/// Target model of a relation field
	pub fn relation_target(&self) -> Option<&str> {
		match self {
			FieldKind::Relation { target, .. } => Some(target),
			_ => None,
		}
	}

	/// Check whether this is a to-many relation
	pub fn is_many(&self) -> bool {
		matches!(self, FieldKind::Relation { many: true, .. })
	}
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
	/// Field name
	pub name: String,
	/// Storage kind
	pub kind: FieldKind,
	/// Whether the field may be null
	pub optional: bool,
	/// Whether the field is the primary key
	pub primary_key: bool,
}

impl FieldDef {
	/// Create a required, non-key field
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			optional: false,
			primary_key: false,
		}
	}

	/// Mark the field as nullable
	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}

	/// Mark the field as the primary key
	pub fn primary_key(mut self) -> Self {
		self.primary_key = true;
		self
	}
}

/// The stored shape of a model
///
/// # Examples
///
/// ```
/// use arcade_admin_core::schema::{FieldDef, FieldKind, ModelSchema};
///
/// let schema = ModelSchema::new("Category")
///     .field(FieldDef::new("id", FieldKind::Int).primary_key())
///     .field(FieldDef::new("name", FieldKind::String));
///
/// assert_eq!(schema.primary_key(), "id");
/// assert!(schema.has_field("name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
	name: String,
	fields: IndexMap<String, FieldDef>,
}

impl ModelSchema {
	/// Create an empty schema
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: IndexMap::new(),
		}
	}

	/// Add a field
	pub fn field(mut self, field: FieldDef) -> Self {
		self.fields.insert(field.name.clone(), field);
		self
	}

	/// Get the model name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Get a field definition
	pub fn get(&self, name: &str) -> Option<&FieldDef> {
		self.fields.get(name)
	}

	/// Check whether a field exists
	pub fn has_field(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Iterate over fields in declaration order
	pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
		self.fields.values()
	}

	/// Get the primary key field name.
	///
	/// Falls back to `"id"` when no field is flagged.
	pub fn primary_key(&self) -> &str {
		self.fields
			.values()
			.find(|f| f.primary_key)
			.map(|f| f.name.as_str())
			.unwrap_or("id")
	}
}

/// All schemas known to a registry
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
	schemas: IndexMap<String, ModelSchema>,
}

impl SchemaSet {
	/// Create an empty set
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a schema, replacing any schema with the same name
	pub fn insert(&mut self, schema: ModelSchema) {
		self.schemas.insert(schema.name().to_string(), schema);
	}

	/// Get a schema by model name
	pub fn get(&self, model: &str) -> Option<&ModelSchema> {
		self.schemas.get(model)
	}

	/// Number of schemas
	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	/// Check whether the set is empty
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}

	/// Resolve a dotted field path starting at `model`.
	///
	/// Each segment but the last must be a relation; the walk continues in the
	/// relation's target schema.
	pub fn resolve_path(&self, model: &str, path: &str) -> Option<&FieldDef> {
		let mut schema = self.get(model)?;
		let mut segments = path.split('.').peekable();
		while let Some(segment) = segments.next() {
			let field = schema.get(segment)?;
			if segments.peek().is_none() {
				return Some(field);
			}
			schema = self.get(field.kind.relation_target()?)?;
		}
		None
	}
}

impl FromIterator<ModelSchema> for SchemaSet {
	fn from_iter<I: IntoIterator<Item = ModelSchema>>(iter: I) -> Self {
		let mut set = SchemaSet::new();
		for schema in iter {
			set.insert(schema);
		}
		set
	}
}

impl IntoIterator for SchemaSet {
	type Item = ModelSchema;
	type IntoIter = indexmap::map::IntoValues<String, ModelSchema>;

	fn into_iter(self) -> Self::IntoIter {
		self.schemas.into_values()
	}
}
