use std::{path, process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use prefstore::prelude::*;
use prefstore::storage_fs::StorageAdapterFs;

/// Settings every run of the demo host defines
const MANIFEST: &str = r#"[
	{ "key": "refreshInterval", "type": "number", "defaultValue": 5000,
	  "description": "Polling period in milliseconds",
	  "options": { "min": 1000, "max": 30000, "step": 500 } },
	{ "key": "theme", "type": "dropdown", "defaultValue": "light",
	  "options": { "choices": [{ "value": "light", "label": "Light" }, { "value": "dark", "label": "Dark" }] } },
	{ "key": "compact", "type": "checkbox", "defaultValue": false },
	{ "key": "nickname", "type": "text", "defaultValue": "guest", "options": { "maxLength": 32 } }
]"#;

#[derive(Parser, Debug)]
#[command(name = "prefstore-basic-host")]
#[command(about = "Inspect and change persisted settings of a namespace")]
#[command(version)]
struct Config {
	/// Directory holding one snapshot file per namespace
	#[arg(long, env = "PREFSTORE_DIR", default_value = "./data")]
	dir: path::PathBuf,

	#[arg(long, env = "PREFSTORE_NAMESPACE", default_value = "basic-host")]
	namespace: String,

	/// Snapshot version; a different stored version resets to defaults
	#[arg(
		long = "snapshot-version",
		id = "snapshot_version",
		env = "PREFSTORE_VERSION",
		default_value = "1"
	)]
	snapshot_version: String,

	/// Extra definitions to register, as a JSON manifest file
	#[arg(long)]
	manifest: Option<path::PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List all settings with their current values
	List,
	/// Print one setting
	Get { key: String },
	/// Change a setting; the value is parsed as JSON, falling back to a plain string
	Set { key: String, value: String },
	/// Reset one setting, or all of them when no key is given
	Reset { key: Option<String> },
	/// Print the snapshot in its persisted format
	Export,
	/// Apply a snapshot previously written by `export`
	Import { file: path::PathBuf },
}

fn parse_value(raw: &str) -> SettingValue {
	serde_json::from_str(raw).unwrap_or_else(|_| SettingValue::from(raw))
}

fn print_dispatch(dispatch: &Dispatch) {
	if !dispatch.persisted {
		warn!("{}: change kept in memory only", dispatch.key);
	}
	for failure in &dispatch.failures {
		warn!("{}: observer #{} failed: {}", dispatch.key, failure.index, failure.error);
	}
}

fn run(config: Config) -> PsResult<()> {
	let storage = Arc::new(StorageAdapterFs::new(&config.dir)?);
	let host = RegistryHost::new(storage);
	let registry = host.initialize(&config.namespace, &config.snapshot_version)?;

	registry.define_settings_from_json(MANIFEST)?;
	if let Some(manifest) = &config.manifest {
		let count = registry.define_settings_from_json(&std::fs::read_to_string(manifest)?)?;
		info!("registered {} settings from {:?}", count, manifest);
	}

	for key in registry.keys() {
		let label = key.clone();
		registry.on_setting_change(
			&key,
			observer(move |new, old| {
				info!("{}: {} -> {}", label, old, new);
				Ok(())
			}),
		);
	}

	match config.command.unwrap_or(Command::List) {
		Command::List => {
			for def in registry.get_all_settings() {
				let value = registry.get_setting(&def.key)?;
				let marker = if registry.is_default(&def.key) { "" } else { " *" };
				println!("{:<24} {:<10} {}{}", def.key, def.setting_type, value, marker);
			}
		}
		Command::Get { key } => println!("{}", registry.get_setting(&key)?),
		Command::Set { key, value } => print_dispatch(&registry.set_setting(&key, parse_value(&value))?),
		Command::Reset { key: Some(key) } => print_dispatch(&registry.reset_to_default(&key)?),
		Command::Reset { key: None } => {
			for dispatch in registry.reset_all_to_defaults()? {
				print_dispatch(&dispatch);
			}
		}
		Command::Export => println!("{}", registry.export_settings()?),
		Command::Import { file } => {
			for dispatch in registry.import_settings(&std::fs::read_to_string(file)?)? {
				print_dispatch(&dispatch);
			}
		}
	}

	Ok(())
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	match run(Config::parse()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{}", err);
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	fn config(args: &[&str]) -> Config {
		Config::try_parse_from(std::iter::once("prefstore-basic-host").chain(args.iter().copied()))
			.unwrap()
	}

	#[test]
	fn test_command_definition() {
		Config::command().debug_assert();
	}

	#[test]
	fn test_parse_arguments() {
		let parsed = config(&["--snapshot-version", "2", "--namespace", "demo", "set", "theme", "dark"]);
		assert_eq!(parsed.snapshot_version, "2");
		assert_eq!(parsed.namespace, "demo");
		assert!(matches!(parsed.command, Some(Command::Set { key, value }) if key == "theme" && value == "dark"));

		let bare = config(&[]);
		assert!(bare.command.is_none());
		assert!(matches!(config(&["reset"]).command, Some(Command::Reset { key: None })));
		assert!(Config::try_parse_from(["prefstore-basic-host", "--version"]).is_err());
	}

	#[test]
	fn test_parse_value() {
		assert_eq!(parse_value("true"), SettingValue::Bool(true));
		assert_eq!(parse_value("12000"), SettingValue::Number(12000.0));
		assert_eq!(parse_value("\"dark\""), SettingValue::from("dark"));
		assert_eq!(parse_value("dark"), SettingValue::from("dark"));
		assert_eq!(parse_value(r#"{"columns":2}"#), SettingValue::Json(serde_json::json!({ "columns": 2 })));
	}

	#[test]
	fn test_set_is_persisted_between_runs() {
		let dir = tempfile::tempdir().unwrap();
		let dir_arg = dir.path().to_str().unwrap();

		run(config(&["--dir", dir_arg, "set", "refreshInterval", "12000"])).unwrap();
		run(config(&["--dir", dir_arg, "set", "theme", "dark"])).unwrap();

		let storage = Arc::new(StorageAdapterFs::new(dir.path()).unwrap());
		let registry = RegistryHost::new(storage.clone()).initialize("basic-host", "1").unwrap();
		registry.define_settings_from_json(MANIFEST).unwrap();
		assert_eq!(registry.get_number("refreshInterval").unwrap(), 12000.0);
		assert_eq!(registry.get_string("theme").unwrap(), "dark");

		// Another snapshot version starts over from the defaults
		run(config(&["--dir", dir_arg, "--snapshot-version", "2", "set", "compact", "true"])).unwrap();
		let upgraded = RegistryHost::new(storage).initialize("basic-host", "2").unwrap();
		upgraded.define_settings_from_json(MANIFEST).unwrap();
		assert!(upgraded.get_bool("compact").unwrap());
		assert!(upgraded.is_default("theme"));
	}

	#[test]
	fn test_failing_command_reports_error() {
		let dir = tempfile::tempdir().unwrap();
		let dir_arg = dir.path().to_str().unwrap();

		assert!(matches!(run(config(&["--dir", dir_arg, "get", "missing"])), Err(Error::NotFound(_))));
		assert!(matches!(
			run(config(&["--dir", dir_arg, "--snapshot-version", " ", "list"])),
			Err(Error::ConfigError(_))
		));
	}
}

// vim: ts=4
