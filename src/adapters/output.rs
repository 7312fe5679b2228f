use crate::config::{OutputConfig, OutputFormat};
use crate::domain::model::JobRecord;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes the full accumulator once, at end of run. Records are written
/// in accumulator order; a partially harvested run still writes everything
/// it gathered.
pub fn write_records(config: &OutputConfig, records: &[JobRecord]) -> Result<PathBuf> {
    fs::create_dir_all(&config.path)?;

    let extension = match config.format {
        OutputFormat::Csv => "csv",
        OutputFormat::Json => "json",
    };
    let path = Path::new(&config.path).join(format!("{}.{}", config.filename, extension));

    match config.format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_path(&path)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            fs::write(&path, serde_json::to_string_pretty(records)?)?;
        }
    }

    Ok(path)
}
