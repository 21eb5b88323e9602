//! Arcade Admin CLI
//!
//! Command-line front end of the arcade admin registry. It checks the model
//! configuration and drives list views, forms and actions against a JSON
//! seeded in-memory store.
//!
//! ## Usage
//!
//! ```bash
//! arcade-admin check
//! arcade-admin describe
//! arcade-admin --seed fixtures.json list Post --search rust --filter Published
//! arcade-admin --seed fixtures.json action Post publish 1 2
//! arcade-admin --seed fixtures.json submit User '{"name": "Ada", "email": "ada@example.com", "newPassword": "s3cret"}'
//! ```

mod output;

use anyhow::{Context, Result, bail};
use arcade_admin_core::context::{PersistMode, RequestContext};
use arcade_admin_core::error::AdminError;
use arcade_admin_core::record::Record;
use arcade_admin_core::resolve::{AdminSite, ListQuery, SubmitOutcome};
use arcade_admin_core::settings::AdminSettings;
use arcade_admin_core::store::{AdminStore, MemoryStore};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcade-admin")]
#[command(about = "Arcade admin registry utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,

	/// Settings file (defaults to arcade-admin.toml)
	#[arg(long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// JSON file of seed records keyed by model name
	#[arg(long, value_name = "PATH", global = true)]
	seed: Option<PathBuf>,

	/// Locale used to format values (defaults to the configured locale)
	#[arg(long, value_name = "LOCALE", global = true)]
	locale: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Check the model configuration
	Check,

	/// Print the site description as JSON
	Describe,

	/// Show the list view of a model
	List {
		/// Model name
		#[arg(value_name = "MODEL")]
		model: String,

		/// Page number, starting at 1
		#[arg(long, default_value_t = 1)]
		page: usize,

		/// Records per page (defaults to the configured page size)
		#[arg(long)]
		page_size: Option<usize>,

		/// Search term matched against the search fields
		#[arg(short, long)]
		search: Option<String>,

		/// Activate a named filter (can be repeated)
		#[arg(short, long = "filter", value_name = "NAME")]
		filters: Vec<String>,

		/// Print the resolved view as JSON
		#[arg(long)]
		json: bool,
	},

	/// Show the create form, or the edit form of a record
	Form {
		/// Model name
		#[arg(value_name = "MODEL")]
		model: String,

		/// Record id (omit for the create form)
		#[arg(value_name = "ID")]
		id: Option<String>,
	},

	/// Run a server action over records
	Action {
		/// Model name
		#[arg(value_name = "MODEL")]
		model: String,

		/// Action id
		#[arg(value_name = "ACTION")]
		action: String,

		/// Selected record ids
		#[arg(value_name = "IDS")]
		ids: Vec<String>,
	},

	/// Open a dialog action for a record
	Dialog {
		/// Model name
		#[arg(value_name = "MODEL")]
		model: String,

		/// Dialog action id
		#[arg(value_name = "ACTION")]
		action: String,

		/// Record id
		#[arg(value_name = "ID")]
		id: String,
	},

	/// Validate and save a record
	Submit {
		/// Model name
		#[arg(value_name = "MODEL")]
		model: String,

		/// JSON object, or @PATH to read it from a file
		#[arg(value_name = "DATA")]
		data: String,

		/// Create a record or edit the record named by the primary key in DATA
		#[arg(long, value_enum, default_value_t = Mode::Create)]
		mode: Mode,
	},

	/// Delete records
	Delete {
		/// Model name
		#[arg(value_name = "MODEL")]
		model: String,

		/// Record ids
		#[arg(value_name = "IDS", required = true)]
		ids: Vec<String>,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
	Create,
	Edit,
}

impl From<Mode> for PersistMode {
	fn from(mode: Mode) -> Self {
		match mode {
			Mode::Create => PersistMode::Create,
			Mode::Edit => PersistMode::Edit,
		}
	}
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	if let Err(e) = run(cli).await {
		eprintln!("{}: {:#}", "Error".red(), e);
		process::exit(1);
	}
}

async fn run(cli: Cli) -> Result<()> {
	let settings = AdminSettings::load(cli.config.as_deref()).context("failed to load settings")?;
	init_tracing(&settings.log_level, cli.verbosity);

	let store: Arc<dyn AdminStore> = Arc::new(load_store(cli.seed.as_deref())?);
	let request = RequestContext::default()
		.with_locale(cli.locale.unwrap_or_else(|| settings.default_locale.clone()));

	let site = match arcade_admin_options::admin_site(store, settings) {
		Ok(site) => site,
		Err(AdminError::Configuration(issues)) => {
			output::issues(&issues);
			bail!("{} configuration issue(s) found", issues.len());
		}
		Err(e) => return Err(e.into()),
	};
	run_command(cli.command, &site, &request).await
}

async fn run_command(command: Commands, site: &AdminSite, request: &RequestContext) -> Result<()> {
	match command {
		Commands::Check => {
			let registry = site.registry();
			println!(
				"{} {} models registered, {} in the sidebar",
				"✓".green(),
				registry.model_names().count().to_string().yellow(),
				registry
					.sidebar()
					.iter()
					.map(|group| group.models.len())
					.sum::<usize>()
			);
			Ok(())
		}
		Commands::Describe => output::json(&site.describe()),
		Commands::List {
			model,
			page,
			page_size,
			search,
			filters,
			json,
		} => {
			let mut query = ListQuery::new().page(page);
			if let Some(size) = page_size {
				query = query.page_size(size);
			}
			if let Some(term) = search {
				query = query.search(term);
			}
			if !filters.is_empty() {
				query = query.filters(filters);
			}
			let list = site.list_view(&model, &query, request).await?;
			if json {
				output::json(&list)
			} else {
				output::list(&list);
				Ok(())
			}
		}
		Commands::Form { model, id } => {
			let form = site.edit_form(&model, id.as_deref(), request).await?;
			output::json(&form)
		}
		Commands::Action { model, action, ids } => {
			let outcome = site.run_action(&model, &action, &ids).await?;
			output::outcome(&outcome);
			if !outcome.is_success() {
				bail!("action '{}' failed", action);
			}
			Ok(())
		}
		Commands::Dialog { model, action, id } => {
			let dialog = site.dialog(&model, &action, &id).await?;
			output::json(&dialog)
		}
		Commands::Submit { model, data, mode } => {
			let data = parse_data(&data)?;
			match site.submit(&model, mode.into(), data, request).await? {
				SubmitOutcome::Saved(record) => {
					println!("{} {} record", "Saved".green(), model);
					output::json(&record)
				}
				SubmitOutcome::Invalid(errors) => {
					output::field_errors(&errors);
					bail!("{} field(s) failed validation", errors.len());
				}
			}
		}
		Commands::Delete { model, ids } => {
			let deleted = site.delete(&model, &ids).await?;
			println!("{} {} {} record(s)", "Deleted".green(), deleted.to_string().yellow(), model);
			Ok(())
		}
	}
}

/// Log filter used when `RUST_LOG` is unset
fn log_level(configured: &str, verbosity: u8) -> &str {
	match verbosity {
		0 => configured,
		1 => "debug",
		_ => "trace",
	}
}

fn init_tracing(configured: &str, verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(log_level(configured, verbosity)));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn load_store(seed: Option<&Path>) -> Result<MemoryStore> {
	let Some(path) = seed else {
		return Ok(MemoryStore::new());
	};
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read seed file {}", path.display()))?;
	let value: Value = serde_json::from_str(&content)
		.with_context(|| format!("seed file {} is not valid JSON", path.display()))?;
	let store = MemoryStore::from_json(value)?;
	tracing::debug!(path = %path.display(), "store seeded");
	Ok(store)
}

/// Parse submission data given inline or as `@path`
fn parse_data(raw: &str) -> Result<Record> {
	let content = match raw.strip_prefix('@') {
		Some(path) => std::fs::read_to_string(path)
			.with_context(|| format!("failed to read submission file {}", path))?,
		None => raw.to_string(),
	};
	match serde_json::from_str(&content).context("submission is not valid JSON")? {
		Value::Object(record) => Ok(record),
		_ => bail!("submission must be a JSON object"),
	}
}
