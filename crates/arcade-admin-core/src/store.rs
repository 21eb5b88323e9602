//! Store seam standing in for the ORM client
//!
//! The registry never talks to a database directly. Views, hooks and
//! actions go through [`AdminStore`]; [`MemoryStore`] keeps records in
//! memory for tests and the CLI.

use crate::error::{AdminError, AdminResult};
use crate::filters::Predicate;
use crate::record::{Record, RecordId, value_text};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

/// Query parameters for [`AdminStore::find_many`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
	/// Where-clause
	pub predicate: Option<Predicate>,
	/// Number of matching records to skip
	pub skip: usize,
	/// Maximum number of records to return
	pub take: Option<usize>,
	/// Fields to return (all when `None`)
	pub select: Option<Vec<String>>,
}

impl FindQuery {
	/// Query matching every record
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the where-clause
	pub fn filter(mut self, predicate: Option<Predicate>) -> Self {
		self.predicate = predicate;
		self
	}

	/// Set pagination
	pub fn page(mut self, skip: usize, take: usize) -> Self {
		self.skip = skip;
		self.take = Some(take);
		self
	}

	/// Limit the number of records
	pub fn take(mut self, take: usize) -> Self {
		self.take = Some(take);
		self
	}

	/// Restrict returned fields
	pub fn select<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.select = Some(fields.into_iter().map(Into::into).collect());
		self
	}
}

/// Data access used by the admin registry
#[async_trait]
pub trait AdminStore: Send + Sync {
	/// List records of a model
	async fn find_many(&self, model: &str, query: &FindQuery) -> AdminResult<Vec<Record>>;

	/// Count records matching a predicate
	async fn count(&self, model: &str, predicate: Option<&Predicate>) -> AdminResult<u64>;

	/// Get a record by primary key
	async fn find_one(&self, model: &str, pk_field: &str, id: &str) -> AdminResult<Option<Record>>;

	/// Insert a record and return it as stored
	async fn create(&self, model: &str, pk_field: &str, data: Record) -> AdminResult<Record>;

	/// Merge `data` into an existing record and return it as stored
	async fn update(
		&self,
		model: &str,
		pk_field: &str,
		id: &str,
		data: Record,
	) -> AdminResult<Record>;

	/// Merge `patch` into every record whose key is in `ids`
	async fn update_many(
		&self,
		model: &str,
		pk_field: &str,
		ids: &[RecordId],
		patch: Record,
	) -> AdminResult<u64>;

	/// Delete every record whose key is in `ids`
	async fn delete_many(&self, model: &str, pk_field: &str, ids: &[RecordId])
	-> AdminResult<u64>;
}

fn key_matches(record: &Record, pk_field: &str, id: &str) -> bool {
	record
		.get(pk_field)
		.map(|value| value_text(value) == id)
		.unwrap_or(false)
}

fn project(record: &Record, select: Option<&[String]>) -> Record {
	match select {
		None => record.clone(),
		Some(fields) => fields
			.iter()
			.filter_map(|field| record.get(field).map(|v| (field.clone(), v.clone())))
			.collect(),
	}
}

/// In-memory store
///
/// # Examples
///
/// ```
/// use arcade_admin_core::store::MemoryStore;
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// store.seed("Category", vec![json!({ "id": 1, "name": "Tech" })]);
///
/// assert_eq!(store.records("Category").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<IndexMap<String, Vec<Record>>>,
}

impl MemoryStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Append records to a model table; non-object values are skipped
	pub fn seed(&self, model: &str, records: Vec<Value>) {
		let mut tables = self.tables.write();
		let table = tables.entry(model.to_string()).or_default();
		table.extend(records.into_iter().filter_map(|value| match value {
			Value::Object(map) => Some(map),
			_ => None,
		}));
	}

	/// Build a store from `{ "Model": [records...] }`
	///
	/// # Errors
	///
	/// Returns `AdminError::Store` if the value is not an object of arrays.
	pub fn from_json(value: Value) -> AdminResult<Self> {
		let Value::Object(models) = value else {
			return Err(AdminError::Store(
				"seed data must be an object keyed by model name".to_string(),
			));
		};
		let store = Self::new();
		for (model, records) in models {
			let Value::Array(records) = records else {
				return Err(AdminError::Store(format!(
					"seed data for '{}' must be an array",
					model
				)));
			};
			store.seed(&model, records);
		}
		Ok(store)
	}

	/// Snapshot of a model table
	pub fn records(&self, model: &str) -> Vec<Record> {
		self.tables.read().get(model).cloned().unwrap_or_default()
	}
}

#[async_trait]
impl AdminStore for MemoryStore {
	async fn find_many(&self, model: &str, query: &FindQuery) -> AdminResult<Vec<Record>> {
		tracing::debug!(model, skip = query.skip, take = ?query.take, "find_many");
		let tables = self.tables.read();
		let Some(table) = tables.get(model) else {
			return Ok(Vec::new());
		};
		let matching = table
			.iter()
			.filter(|record| query.predicate.as_ref().is_none_or(|p| p.matches(record)))
			.skip(query.skip)
			.take(query.take.unwrap_or(usize::MAX))
			.map(|record| project(record, query.select.as_deref()))
			.collect();
		Ok(matching)
	}

	async fn count(&self, model: &str, predicate: Option<&Predicate>) -> AdminResult<u64> {
		let tables = self.tables.read();
		let count = tables
			.get(model)
			.map(|table| {
				table
					.iter()
					.filter(|record| predicate.is_none_or(|p| p.matches(record)))
					.count()
			})
			.unwrap_or(0);
		Ok(count as u64)
	}

	async fn find_one(&self, model: &str, pk_field: &str, id: &str) -> AdminResult<Option<Record>> {
		let tables = self.tables.read();
		Ok(tables
			.get(model)
			.and_then(|table| table.iter().find(|r| key_matches(r, pk_field, id)))
			.cloned())
	}

	async fn create(&self, model: &str, pk_field: &str, mut data: Record) -> AdminResult<Record> {
		let mut tables = self.tables.write();
		let table = tables.entry(model.to_string()).or_default();
		match data.get(pk_field) {
			None | Some(Value::Null) => {
				let next = table
					.iter()
					.filter_map(|r| r.get(pk_field).and_then(Value::as_i64))
					.max()
					.unwrap_or(0) + 1;
				data.insert(pk_field.to_string(), Value::from(next));
			}
			Some(existing) => {
				let id = value_text(existing);
				if table.iter().any(|r| key_matches(r, pk_field, &id)) {
					return Err(AdminError::Store(format!(
						"duplicate key '{}' for model '{}'",
						id, model
					)));
				}
			}
		}
		table.push(data.clone());
		Ok(data)
	}

	async fn update(
		&self,
		model: &str,
		pk_field: &str,
		id: &str,
		data: Record,
	) -> AdminResult<Record> {
		let mut tables = self.tables.write();
		let record = tables
			.get_mut(model)
			.and_then(|table| table.iter_mut().find(|r| key_matches(r, pk_field, id)))
			.ok_or_else(|| AdminError::RecordNotFound {
				model: model.to_string(),
				id: id.to_string(),
			})?;
		for (field, value) in data {
			if field != pk_field {
				record.insert(field, value);
			}
		}
		Ok(record.clone())
	}

	async fn update_many(
		&self,
		model: &str,
		pk_field: &str,
		ids: &[RecordId],
		patch: Record,
	) -> AdminResult<u64> {
		let mut tables = self.tables.write();
		let Some(table) = tables.get_mut(model) else {
			return Ok(0);
		};
		let mut affected = 0;
		for record in table
			.iter_mut()
			.filter(|r| ids.iter().any(|id| key_matches(r, pk_field, id)))
		{
			for (field, value) in &patch {
				record.insert(field.clone(), value.clone());
			}
			affected += 1;
		}
		tracing::debug!(model, affected, "update_many");
		Ok(affected)
	}

	async fn delete_many(
		&self,
		model: &str,
		pk_field: &str,
		ids: &[RecordId],
	) -> AdminResult<u64> {
		let mut tables = self.tables.write();
		let Some(table) = tables.get_mut(model) else {
			return Ok(0);
		};
		let before = table.len();
		table.retain(|r| !ids.iter().any(|id| key_matches(r, pk_field, id)));
		Ok((before - table.len()) as u64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn store() -> MemoryStore {
		let store = MemoryStore::new();
		store.seed(
			"Post",
			vec![
				json!({ "id": 1, "title": "One", "published": false }),
				json!({ "id": 2, "title": "Two", "published": false }),
				json!({ "id": 3, "title": "Three", "published": true }),
			],
		);
		store
	}

	#[rstest]
	#[tokio::test]
	async fn test_find_many_filters_and_paginates(store: MemoryStore) {
		let query = FindQuery::new()
			.filter(Some(Predicate::equals("published", false)))
			.page(1, 10)
			.select(["title"]);

		let records = store.find_many("Post", &query).await.unwrap();

		assert_eq!(records, vec![crate::record::from_value(json!({ "title": "Two" })).unwrap()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_update_many_matches_string_ids(store: MemoryStore) {
		// Arrange
		let mut patch = Record::new();
		patch.insert("published".to_string(), json!(true));

		// Act
		let affected = store
			.update_many("Post", "id", &["1".to_string(), "2".to_string(), "99".to_string()], patch)
			.await
			.unwrap();

		// Assert
		assert_eq!(affected, 2);
		assert_eq!(
			store
				.count("Post", Some(&Predicate::equals("published", true)))
				.await
				.unwrap(),
			3
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_update_many_with_no_ids(store: MemoryStore) {
		let affected = store.update_many("Post", "id", &[], Record::new()).await.unwrap();
		assert_eq!(affected, 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_assigns_next_key(store: MemoryStore) {
		let data = crate::record::from_value(json!({ "title": "Four" })).unwrap();

		let created = store.create("Post", "id", data).await.unwrap();

		assert_eq!(created.get("id"), Some(&json!(4)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_rejects_duplicate_key(store: MemoryStore) {
		let data = crate::record::from_value(json!({ "id": 2, "title": "Again" })).unwrap();

		let result = store.create("Post", "id", data).await;

		assert!(matches!(result, Err(AdminError::Store(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_update_missing_record(store: MemoryStore) {
		let result = store.update("Post", "id", "42", Record::new()).await;
		assert!(matches!(result, Err(AdminError::RecordNotFound { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_delete_many(store: MemoryStore) {
		let deleted = store
			.delete_many("Post", "id", &["3".to_string()])
			.await
			.unwrap();

		assert_eq!(deleted, 1);
		assert_eq!(store.records("Post").len(), 2);
	}

	#[test]
	fn test_from_json_rejects_non_array_table() {
		let result = MemoryStore::from_json(json!({ "Post": { "id": 1 } }));
		assert!(matches!(result, Err(AdminError::Store(_))));
	}
}
