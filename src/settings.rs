//! Runtime settings, read from an optional `config.toml` and the environment.
//!
//! ```toml
//! [gradebook]
//! database_url = "gradebook.db"
//! delimiter = ","
//! busy_timeout_ms = 5000
//! check_course_membership = false
//! ```
//!
//! `DATABASE_URL` (also picked up from a `.env` file) takes precedence over `database_url`.

use crate::error::{PipelineError, Result};
use crate::pipeline::PipelineOptions;
use config::{Config, ConfigError, File, FileFormat, FileSourceFile};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SettingsFile {
    gradebook: Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub delimiter: char,
    pub busy_timeout_ms: u32,
    pub check_course_membership: bool,
}

impl Settings {
    /// Loads `config.toml` from the working directory, if present, with `DATABASE_URL` layered
    /// on top.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_sources(File::with_name("config").required(false), env::var("DATABASE_URL").ok())
    }

    /// Loads settings from the TOML file at `path`, with an optional database url override.
    pub fn load_from(path: &Path, database_url: Option<String>) -> Result<Self> {
        Self::from_sources(File::from(path).format(FileFormat::Toml), database_url)
    }

    fn from_sources(
        file: File<FileSourceFile, FileFormat>,
        database_url: Option<String>,
    ) -> Result<Self> {
        let settings = Config::builder()
            .set_default("gradebook.delimiter", ",")?
            .set_default("gradebook.busy_timeout_ms", 5_000_i64)?
            .set_default("gradebook.check_course_membership", false)?
            .add_source(file)
            .set_override_option("gradebook.database_url", database_url)?
            .build()?;

        let settings = settings.try_deserialize::<SettingsFile>()?.gradebook;
        settings.pipeline_options()?;

        Ok(settings)
    }

    /// The options for a pipeline run. Fails if the delimiter is not a single ASCII character.
    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                PipelineError::Config(ConfigError::Message(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                )))
            })?;

        Ok(PipelineOptions {
            delimiter,
            check_course_membership: self.check_course_membership,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn fills_in_defaults() {
        let (_dir, path) = write_config("[gradebook]\ndatabase_url = \"grades.db\"\n");

        let settings = Settings::load_from(&path, None).unwrap();
        assert_eq!(
            settings,
            Settings {
                database_url: "grades.db".to_string(),
                delimiter: ',',
                busy_timeout_ms: 5_000,
                check_course_membership: false,
            }
        );
        assert_eq!(settings.pipeline_options().unwrap(), PipelineOptions::default());
    }

    #[test]
    fn database_url_override_wins() {
        let (_dir, path) = write_config(
            "[gradebook]\ndatabase_url = \"grades.db\"\ndelimiter = \";\"\ncheck_course_membership = true\n",
        );

        let settings = Settings::load_from(&path, Some("other.db".to_string())).unwrap();
        assert_eq!(settings.database_url, "other.db");
        assert_eq!(
            settings.pipeline_options().unwrap(),
            PipelineOptions {
                delimiter: b';',
                check_course_membership: true,
            }
        );
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let (_dir, path) = write_config("[gradebook]\n");
        assert!(matches!(
            Settings::load_from(&path, None),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let (_dir, path) =
            write_config("[gradebook]\ndatabase_url = \"g.db\"\ndelimiter = \"§\"\n");
        assert!(matches!(
            Settings::load_from(&path, None),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn hand_built_settings_cannot_truncate_delimiter() {
        let settings = Settings {
            database_url: "g.db".to_string(),
            delimiter: '§',
            busy_timeout_ms: 5_000,
            check_course_membership: false,
        };
        assert!(matches!(
            settings.pipeline_options(),
            Err(PipelineError::Config(_))
        ));

        let settings = Settings {
            delimiter: '\u{2003}',
            ..settings
        };
        assert!(settings.pipeline_options().is_err());
    }
}
