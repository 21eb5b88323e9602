//! List filtering for admin views
//!
//! A [`Predicate`] is a typed where-clause. It is evaluated against embedded
//! records by the in-memory store and serialized to a Prisma-style JSON
//! object for the rendering engine. Named filters come either from static
//! configuration or from a [`FilterResolver`] that queries live data each
//! time a list view is resolved.

use crate::error::AdminResult;
use crate::record::{Record, lookup_path, value_text};
use crate::schema::SchemaSet;
use async_trait::async_trait;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Condition applied to a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
	/// Exact equality (membership when the field is an array)
	Equals(Value),
	/// Case-sensitive prefix match
	StartsWith(String),
	/// Case-sensitive suffix match
	EndsWith(String),
	/// Case-insensitive substring match
	Contains(String),
	/// Value is one of the listed values
	In(Vec<Value>),
	/// At least one related record matches
	Some(Box<Predicate>),
}

impl Condition {
	fn matches(&self, value: &Value) -> bool {
		match self {
			Condition::Equals(expected) => match value {
				Value::Array(items) if !expected.is_array() => items.contains(expected),
				other => other == expected,
			},
			Condition::StartsWith(prefix) => {
				string_test(value, &|s: &str| s.starts_with(prefix.as_str()))
			}
			Condition::EndsWith(suffix) => {
				string_test(value, &|s: &str| s.ends_with(suffix.as_str()))
			}
			Condition::Contains(needle) => {
				let needle = needle.to_lowercase();
				string_test(value, &|s: &str| s.to_lowercase().contains(&needle))
			}
			Condition::In(values) => values.contains(value),
			Condition::Some(inner) => value
				.as_array()
				.map(|items| {
					items
						.iter()
						.filter_map(Value::as_object)
						.any(|item| inner.matches(item))
				})
				.unwrap_or(false),
		}
	}

	fn to_json(&self) -> Value {
		match self {
			Condition::Equals(v) => json!({ "equals": v }),
			Condition::StartsWith(s) => json!({ "startsWith": s }),
			Condition::EndsWith(s) => json!({ "endsWith": s }),
			Condition::Contains(s) => json!({ "contains": s, "mode": "insensitive" }),
			Condition::In(values) => json!({ "in": values }),
			Condition::Some(inner) => json!({ "some": inner.to_json() }),
		}
	}
}

// Arrays match when any element matches; null never matches.
fn string_test(value: &Value, test: &dyn Fn(&str) -> bool) -> bool {
	match value {
		Value::Null => false,
		Value::Array(items) => items.iter().any(|item| string_test(item, test)),
		Value::Object(_) => false,
		other => test(&value_text(other)),
	}
}

/// Typed where-clause
///
/// # Examples
///
/// ```
/// use arcade_admin_core::filters::Predicate;
/// use serde_json::json;
///
/// let is_admin = Predicate::equals("role", "ADMIN");
/// let record = json!({ "role": "ADMIN" });
///
/// assert!(is_admin.matches(record.as_object().unwrap()));
/// assert_eq!(is_admin.to_json(), json!({ "role": { "equals": "ADMIN" } }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	/// Every predicate must match
	All(Vec<Predicate>),
	/// At least one predicate must match
	Any(Vec<Predicate>),
	/// Condition on a field; dotted paths walk to-one relations
	Field { path: String, condition: Condition },
}

impl Predicate {
	/// Create a field predicate
	pub fn field(path: impl Into<String>, condition: Condition) -> Self {
		Predicate::Field {
			path: path.into(),
			condition,
		}
	}

	/// `path` equals `value`
	pub fn equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::field(path, Condition::Equals(value.into()))
	}

	/// `path` starts with `prefix`
	pub fn starts_with(path: impl Into<String>, prefix: impl Into<String>) -> Self {
		Self::field(path, Condition::StartsWith(prefix.into()))
	}

	/// `path` ends with `suffix`
	pub fn ends_with(path: impl Into<String>, suffix: impl Into<String>) -> Self {
		Self::field(path, Condition::EndsWith(suffix.into()))
	}

	/// `path` contains `needle`, ignoring case
	pub fn contains(path: impl Into<String>, needle: impl Into<String>) -> Self {
		Self::field(path, Condition::Contains(needle.into()))
	}

	/// `path` is one of `values`
	pub fn one_of(path: impl Into<String>, values: Vec<Value>) -> Self {
		Self::field(path, Condition::In(values))
	}

	/// Some record in the to-many relation `path` matches `inner`
	pub fn some(path: impl Into<String>, inner: Predicate) -> Self {
		Self::field(path, Condition::Some(Box::new(inner)))
	}

	/// Conjunction of predicates
	pub fn and(predicates: Vec<Predicate>) -> Self {
		Predicate::All(predicates)
	}

	/// Disjunction of predicates
	pub fn or(predicates: Vec<Predicate>) -> Self {
		Predicate::Any(predicates)
	}

	/// Evaluate against a record
	pub fn matches(&self, record: &Record) -> bool {
		match self {
			Predicate::All(predicates) => predicates.iter().all(|p| p.matches(record)),
			Predicate::Any(predicates) => predicates.iter().any(|p| p.matches(record)),
			Predicate::Field { path, condition } => lookup_path(record, path)
				.map(|value| condition.matches(value))
				.unwrap_or(false),
		}
	}

	/// Render as a Prisma-style where object
	pub fn to_json(&self) -> Value {
		match self {
			Predicate::All(predicates) => {
				json!({ "AND": predicates.iter().map(Predicate::to_json).collect::<Vec<_>>() })
			}
			Predicate::Any(predicates) => {
				json!({ "OR": predicates.iter().map(Predicate::to_json).collect::<Vec<_>>() })
			}
			Predicate::Field { path, condition } => {
				let mut value = condition.to_json();
				for segment in path.rsplit('.') {
					let mut wrapper = Map::new();
					wrapper.insert(segment.to_string(), value);
					value = Value::Object(wrapper);
				}
				value
			}
		}
	}

	/// Collect field paths that do not exist on `model`
	pub fn unknown_fields(&self, schemas: &SchemaSet, model: &str) -> Vec<String> {
		let mut unknown = Vec::new();
		self.collect_unknown(schemas, model, &mut unknown);
		unknown
	}

	fn collect_unknown(&self, schemas: &SchemaSet, model: &str, unknown: &mut Vec<String>) {
		match self {
			Predicate::All(predicates) | Predicate::Any(predicates) => {
				for predicate in predicates {
					predicate.collect_unknown(schemas, model, unknown);
				}
			}
			Predicate::Field { path, condition } => {
				let Some(field) = schemas.resolve_path(model, path) else {
					unknown.push(path.clone());
					return;
				};
				if let Condition::Some(inner) = condition {
					match field.kind.relation_target() {
						Some(target) if field.kind.is_many() => {
							inner.collect_unknown(schemas, target, unknown)
						}
						_ => unknown.push(format!("{path} (not a to-many relation)")),
					}
				}
			}
		}
	}
}

impl Serialize for Predicate {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

/// A named, selectable list filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedFilter {
	/// Display name, also used to select the filter
	pub name: String,
	/// Whether the filter is applied
	pub active: bool,
	/// Where-clause applied when active
	pub value: Predicate,
	/// Filters sharing a group combine with OR
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
}

impl NamedFilter {
	/// Create an inactive, ungrouped filter
	pub fn new(name: impl Into<String>, value: Predicate) -> Self {
		Self {
			name: name.into(),
			active: false,
			value,
			group: None,
		}
	}

	/// Place the filter in a group
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}

	/// Set the initial active flag
	pub fn with_active(mut self, active: bool) -> Self {
		self.active = active;
		self
	}
}

/// Produces named filters from live data
#[async_trait]
pub trait FilterResolver: Send + Sync {
	/// Compute the filters
	async fn resolve(&self) -> AdminResult<Vec<NamedFilter>>;
}

type ResolveFn = dyn Fn() -> BoxFuture<'static, AdminResult<Vec<NamedFilter>>> + Send + Sync;

/// Adapter turning an async closure into a [`FilterResolver`]
pub struct FnResolver(Box<ResolveFn>);

impl FnResolver {
	/// Wrap a closure returning a boxed future
	pub fn new<F>(f: F) -> Self
	where
		F: Fn() -> BoxFuture<'static, AdminResult<Vec<NamedFilter>>> + Send + Sync + 'static,
	{
		Self(Box::new(f))
	}
}

#[async_trait]
impl FilterResolver for FnResolver {
	async fn resolve(&self) -> AdminResult<Vec<NamedFilter>> {
		(self.0)().await
	}
}

/// Where the filters of a list view come from
#[derive(Clone)]
pub enum FilterSource {
	/// Fixed filter
	Static(NamedFilter),
	/// Filters computed when the list view is requested
	Dynamic(Arc<dyn FilterResolver>),
}

impl FilterSource {
	/// Wrap a resolver
	pub fn dynamic(resolver: impl FilterResolver + 'static) -> Self {
		FilterSource::Dynamic(Arc::new(resolver))
	}
}

impl From<NamedFilter> for FilterSource {
	fn from(filter: NamedFilter) -> Self {
		FilterSource::Static(filter)
	}
}

impl fmt::Debug for FilterSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FilterSource::Static(filter) => f.debug_tuple("Static").field(filter).finish(),
			FilterSource::Dynamic(_) => f.write_str("Dynamic(..)"),
		}
	}
}

/// Resolve every source in order, awaiting dynamic ones.
///
/// Filter names are the selection keys, so a filter whose name is already
/// taken by an earlier one is dropped.
pub async fn resolve_sources(sources: &[FilterSource]) -> AdminResult<Vec<NamedFilter>> {
	let mut filters: Vec<NamedFilter> = Vec::new();
	let mut names: HashSet<String> = HashSet::new();
	let mut push = |filter: NamedFilter, filters: &mut Vec<NamedFilter>| {
		if names.insert(filter.name.clone()) {
			filters.push(filter);
		} else {
			tracing::warn!(name = %filter.name, "duplicate filter name skipped");
		}
	};
	for source in sources {
		match source {
			FilterSource::Static(filter) => push(filter.clone(), &mut filters),
			FilterSource::Dynamic(resolver) => {
				let resolved = resolver.resolve().await?;
				tracing::debug!(count = resolved.len(), "resolved dynamic filters");
				for filter in resolved {
					push(filter, &mut filters);
				}
			}
		}
	}
	Ok(filters)
}

/// Set `active` flags from an explicit selection.
///
/// `None` keeps each filter's configured flag.
pub fn apply_selection(filters: &mut [NamedFilter], selected: Option<&[String]>) {
	if let Some(selected) = selected {
		let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
		for filter in filters.iter_mut() {
			filter.active = selected.contains(filter.name.as_str());
		}
	}
}

/// Combine active filters into one predicate.
///
/// Ungrouped filters combine with AND; filters sharing a group combine with
/// OR and the group as a whole joins the AND.
pub fn combine_active(filters: &[NamedFilter]) -> Option<Predicate> {
	let mut clauses = Vec::new();
	let mut groups: IndexMap<&str, Vec<Predicate>> = IndexMap::new();
	for filter in filters.iter().filter(|f| f.active) {
		match &filter.group {
			Some(group) => groups
				.entry(group.as_str())
				.or_default()
				.push(filter.value.clone()),
			None => clauses.push(filter.value.clone()),
		}
	}
	for (_, mut members) in groups {
		if members.len() == 1 {
			clauses.extend(members.pop());
		} else {
			clauses.push(Predicate::or(members));
		}
	}
	match clauses.len() {
		0 => None,
		1 => clauses.pop(),
		_ => Some(Predicate::and(clauses)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::from_value;
	use futures::FutureExt;
	use rstest::rstest;

	fn post() -> Record {
		from_value(json!({
			"id": 1,
			"title": "Hello Rust",
			"published": true,
			"tags": ["news", "release"],
			"author": { "id": 2, "name": "Grace" },
			"categories": [{ "id": 3, "name": "Tech" }, { "id": 4, "name": "Life" }],
			"rate": null,
		}))
		.unwrap()
	}

	#[rstest]
	#[case(Predicate::equals("published", true), true)]
	#[case(Predicate::equals("published", false), false)]
	#[case(Predicate::contains("title", "rust"), true)]
	#[case(Predicate::starts_with("title", "hello"), false)]
	#[case(Predicate::ends_with("title", "Rust"), true)]
	#[case(Predicate::contains("author.name", "GRA"), true)]
	#[case(Predicate::contains("tags", "rele"), true)]
	#[case(Predicate::equals("tags", "news"), true)]
	#[case(Predicate::some("categories", Predicate::equals("id", 4)), true)]
	#[case(Predicate::some("categories", Predicate::equals("id", 9)), false)]
	#[case(Predicate::contains("rate", ""), false)]
	#[case(Predicate::one_of("id", vec![json!(1), json!(5)]), true)]
	#[case(Predicate::equals("missing", 1), false)]
	fn test_predicate_matches(#[case] predicate: Predicate, #[case] expected: bool) {
		assert_eq!(predicate.matches(&post()), expected);
	}

	#[test]
	fn test_predicate_to_json_nests_paths() {
		let predicate = Predicate::and(vec![
			Predicate::contains("author.name", "ada"),
			Predicate::some("categories", Predicate::equals("id", 3)),
		]);

		assert_eq!(
			predicate.to_json(),
			json!({ "AND": [
				{ "author": { "name": { "contains": "ada", "mode": "insensitive" } } },
				{ "categories": { "some": { "id": { "equals": 3 } } } },
			]})
		);
	}

	#[test]
	fn test_combine_active_groups_with_or() {
		// Arrange
		let mut filters = vec![
			NamedFilter::new("Published", Predicate::equals("published", true)),
			NamedFilter::new("Tech", Predicate::equals("c", 3)).with_group("by_category_id"),
			NamedFilter::new("Life", Predicate::equals("c", 4)).with_group("by_category_id"),
		];
		let selected = vec!["Published".to_string(), "Tech".to_string(), "Life".to_string()];

		// Act
		apply_selection(&mut filters, Some(&selected));
		let combined = combine_active(&filters).unwrap();

		// Assert
		assert_eq!(
			combined,
			Predicate::and(vec![
				Predicate::equals("published", true),
				Predicate::or(vec![Predicate::equals("c", 3), Predicate::equals("c", 4)]),
			])
		);
	}

	#[test]
	fn test_combine_active_without_selection_uses_flags() {
		let filters = vec![
			NamedFilter::new("a", Predicate::equals("a", 1)),
			NamedFilter::new("b", Predicate::equals("b", 1)).with_active(true),
		];

		assert_eq!(combine_active(&filters), Some(Predicate::equals("b", 1)));
		assert_eq!(combine_active(&filters[..1]), None);
	}

	#[tokio::test]
	async fn test_resolve_sources_keeps_order() {
		// Arrange
		let sources = vec![
			FilterSource::from(NamedFilter::new("first", Predicate::equals("a", 1))),
			FilterSource::dynamic(FnResolver::new(|| {
				async {
					Ok::<_, crate::error::AdminError>(vec![NamedFilter::new(
						"second",
						Predicate::equals("b", 2),
					)])
				}
				.boxed()
			})),
			FilterSource::from(NamedFilter::new("third", Predicate::equals("c", 3))),
		];

		// Act
		let filters = resolve_sources(&sources).await.unwrap();

		// Assert
		let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["first", "second", "third"]);
	}

	#[tokio::test]
	async fn test_resolve_sources_skips_taken_names() {
		// Arrange
		let sources = vec![
			FilterSource::from(NamedFilter::new("Published", Predicate::equals("published", true))),
			FilterSource::dynamic(FnResolver::new(|| {
				async {
					Ok::<_, crate::error::AdminError>(vec![
						NamedFilter::new("Published", Predicate::equals("id", 1)).with_group("category"),
						NamedFilter::new("Tech", Predicate::equals("id", 2)).with_group("category"),
					])
				}
				.boxed()
			})),
		];

		// Act
		let mut filters = resolve_sources(&sources).await.unwrap();
		apply_selection(&mut filters, Some(&["Published".to_string()]));

		// Assert
		assert_eq!(filters.len(), 2);
		assert_eq!(filters[0].group, None);
		assert_eq!(filters[1].name, "Tech");
		assert_eq!(
			combine_active(&filters),
			Some(Predicate::equals("published", true))
		);
	}
}
