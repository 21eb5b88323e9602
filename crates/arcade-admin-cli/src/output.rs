//! Terminal rendering of resolved views and outcomes

use anyhow::Result;
use arcade_admin_core::actions::ActionOutcome;
use arcade_admin_core::error::ConfigIssue;
use arcade_admin_core::resolve::ResolvedList;
use arcade_admin_core::validation::FieldErrors;
use colored::Colorize;
use serde::Serialize;

/// Print a value as pretty JSON
pub(crate) fn json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Print a list view as a plain table
pub(crate) fn list(list: &ResolvedList) {
	println!("{}", list.title.bold());

	let filters: Vec<String> = list
		.filters
		.iter()
		.map(|filter| {
			if filter.active {
				format!("[x] {}", filter.name).green().to_string()
			} else {
				format!("[ ] {}", filter.name)
			}
		})
		.collect();
	if !filters.is_empty() {
		println!("Filters: {}", filters.join("  "));
	}
	if let Some(search) = &list.search {
		println!("Search: {}", search.yellow());
	}

	let header: Vec<&str> = list.columns.iter().map(|c| c.label.as_str()).collect();
	println!("{}", header.join(" | ").bright_cyan());
	for row in &list.rows {
		let cells: Vec<&str> = row.cells.iter().map(|cell| cell.rendered.as_text()).collect();
		println!("{}", cells.join(" | "));
	}

	let pages = list.total.div_ceil(list.page_size as u64).max(1);
	println!(
		"{}: page {} of {}, {} record(s)",
		"Summary".bright_cyan(),
		list.page,
		pages,
		list.total.to_string().yellow()
	);
}

/// Print an action outcome
pub(crate) fn outcome(outcome: &ActionOutcome) {
	if outcome.is_success() {
		println!("{} {}", "✓".green(), outcome.message());
	} else {
		eprintln!("{} {}", "✗".red(), outcome.message());
	}
}

/// Print configuration issues
pub(crate) fn issues(issues: &[ConfigIssue]) {
	for issue in issues {
		eprintln!("  - {}", issue.to_string().red());
	}
}

/// Print validation errors per field
pub(crate) fn field_errors(errors: &FieldErrors) {
	for (field, error) in errors {
		eprintln!("  - {}: {}", field.bold(), error.message().red());
	}
}
