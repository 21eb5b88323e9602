//! List view configuration

use crate::filters::FilterSource;
use crate::format::Formatter;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Export format offered by a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
	/// Comma-separated values
	Csv,
	/// JSON format
	Json,
}

impl ExportFormat {
	/// Get file extension for this format
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Json => "json",
		}
	}

	/// Get MIME type for this format
	pub fn mime_type(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv",
			ExportFormat::Json => "application/json",
		}
	}
}

/// Link to an export endpoint served by the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpec {
	/// Export format
	pub format: ExportFormat,
	/// Endpoint URL
	pub url: String,
}

impl ExportSpec {
	/// Create an export link
	pub fn new(format: ExportFormat, url: impl Into<String>) -> Self {
		Self {
			format,
			url: url.into(),
		}
	}
}

/// List view configuration
///
/// # Examples
///
/// ```
/// use arcade_admin_core::list::ListViewSpec;
///
/// let list = ListViewSpec::new()
///     .display(["id", "title"])
///     .search(["title"])
///     .copy(["title"]);
///
/// assert_eq!(list.display_fields(), ["id", "title"]);
/// assert!(list.is_copyable("title"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListViewSpec {
	display: Vec<String>,
	search: Vec<String>,
	copy: Vec<String>,
	filters: Vec<FilterSource>,
	formatters: IndexMap<String, Formatter>,
	exports: Vec<ExportSpec>,
}

impl ListViewSpec {
	/// Create an empty list view
	pub fn new() -> Self {
		Self::default()
	}

	/// Set displayed fields, in column order
	pub fn display<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.display = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Set searchable fields (dotted relation paths allowed)
	pub fn search<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.search = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Set copy-to-clipboard fields
	pub fn copy<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.copy = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Add a filter source
	pub fn filter(mut self, source: impl Into<FilterSource>) -> Self {
		self.filters.push(source.into());
		self
	}

	/// Set a formatter for a field
	pub fn formatter(mut self, field: impl Into<String>, formatter: Formatter) -> Self {
		self.formatters.insert(field.into(), formatter);
		self
	}

	/// Add an export link
	pub fn export(mut self, export: ExportSpec) -> Self {
		self.exports.push(export);
		self
	}

	/// Displayed fields
	pub fn display_fields(&self) -> &[String] {
		&self.display
	}

	/// Searchable fields
	pub fn search_fields(&self) -> &[String] {
		&self.search
	}

	/// Copy-to-clipboard fields
	pub fn copy_fields(&self) -> &[String] {
		&self.copy
	}

	/// Check whether a field has a copy button
	pub fn is_copyable(&self, field: &str) -> bool {
		self.copy.iter().any(|f| f == field)
	}

	/// Filter sources in declaration order
	pub fn filters(&self) -> &[FilterSource] {
		&self.filters
	}

	/// Formatter configured for a field
	pub fn formatter_for(&self, field: &str) -> Option<&Formatter> {
		self.formatters.get(field)
	}

	/// Fields that have a formatter
	pub fn formatted_fields(&self) -> impl Iterator<Item = &str> {
		self.formatters.keys().map(String::as_str)
	}

	/// Export links
	pub fn exports(&self) -> &[ExportSpec] {
		&self.exports
	}
}
