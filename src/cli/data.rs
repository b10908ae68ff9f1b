//! Data export/import CLI commands

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::export::{export_full_json, export_full_yaml};
use crate::services::ImportService;
use crate::storage::Storage;

/// Data subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Export the full dataset to a file (or stdout)
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Import a dataset, replacing everything currently stored
    Import {
        /// File to import
        file: PathBuf,
        /// Input format (json, yaml); inferred from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn infer_format(file: &std::path::Path, format: Option<&str>) -> FintrackResult<String> {
    if let Some(format) = format {
        return Ok(format.to_ascii_lowercase());
    }
    match file.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok("json".into()),
        Some("yaml") | Some("yml") => Ok("yaml".into()),
        _ => Err(FintrackError::Validation(
            "Cannot infer format from file extension; pass --format".into(),
        )),
    }
}

/// Handle a data command
pub fn handle_data_command(storage: &Storage, cmd: DataCommands) -> FintrackResult<()> {
    match cmd {
        DataCommands::Export {
            output,
            format,
            compact,
        } => {
            let format = format.to_ascii_lowercase();
            match output {
                Some(path) => {
                    let file = File::create(&path)?;
                    let mut writer = BufWriter::new(file);
                    write_export(storage, &mut writer, &format, compact)?;
                    println!("Exported to {}", path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = stdout.lock();
                    write_export(storage, &mut writer, &format, compact)?;
                }
            }
        }

        DataCommands::Import { file, format } => {
            let format = infer_format(&file, format.as_deref())?;
            let mut contents = String::new();
            File::open(&file)?.read_to_string(&mut contents)?;

            let service = ImportService::new(storage);
            let summary = match format.as_str() {
                "json" => service.import_json(&contents),
                "yaml" => service.import_yaml(&contents),
                other => Err(FintrackError::Validation(format!(
                    "Unknown format '{}': expected json or yaml",
                    other
                ))),
            }?;

            println!("Import complete:");
            println!("  Incomes: {}", summary.incomes);
            println!("  Expenses: {}", summary.expenses);
            println!("  Subscriptions: {}", summary.subscriptions);
            println!("  Budgets: {}", summary.budgets);
        }
    }

    Ok(())
}

fn write_export<W: std::io::Write>(
    storage: &Storage,
    writer: &mut W,
    format: &str,
    compact: bool,
) -> FintrackResult<()> {
    match format {
        "json" => export_full_json(storage, writer, !compact),
        "yaml" => export_full_yaml(storage, writer),
        other => Err(FintrackError::Validation(format!(
            "Unknown format '{}': expected json or yaml",
            other
        ))),
    }
}
