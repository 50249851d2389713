//! Configuration for tablero.
//!
//! One TOML file covers the portal endpoints, the input files, the output
//! directory, and the state marker. Every field has a default so a bare
//! `tablero run` works from a directory holding `cortes.csv` and
//! `terminos.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Default config file name, discovered in the working directory.
pub const CONFIG_FILE: &str = "tablero.toml";

/// Portal endpoints and HTTP tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// Portal origin, e.g. `https://consultas.pjud.example`.
    pub base_url: String,
    /// Path of the room-assignment endpoint (phase 1).
    pub room_assignment_path: String,
    /// Path of the case endpoint (phase 2).
    pub case_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Delay applied after each request, in milliseconds.
    pub request_delay_ms: u64,
    /// Override the default user agent.
    pub user_agent: Option<String>,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: "https://consultas.pjud.example".into(),
            room_assignment_path: "/consultas/programacionSalas.php".into(),
            case_path: "/consultas/tablaSala.php".into(),
            timeout_secs: 30,
            request_delay_ms: 200,
            user_agent: None,
        }
    }
}

/// Input file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Court table CSV (header row: codCorte, condicion, Nombre Corte).
    pub courts_file: PathBuf,
    /// Filter terms, one per line.
    pub filter_terms_file: PathBuf,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            courts_file: PathBuf::from("cortes.csv"),
            filter_terms_file: PathBuf::from("terminos.txt"),
        }
    }
}

/// Output and state locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving one subdirectory per week label.
    pub directory: PathBuf,
    /// Run-state marker file.
    pub state_file: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("semanas"),
            state_file: PathBuf::from("estado.json"),
        }
    }
}

/// Full settings tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub portal: PortalSettings,
    pub inputs: InputSettings,
    pub output: OutputSettings,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PipelineError> {
        toml::from_str(text).map_err(|e| PipelineError::Validation(format!("bad config: {e}")))
    }

    /// Load settings.
    ///
    /// An explicit `--config` path must exist; otherwise `tablero.toml` is
    /// used when present and built-in defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PipelineError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let discovered = PathBuf::from(CONFIG_FILE);
                if !discovered.is_file() {
                    return Ok(Self::default());
                }
                discovered
            }
        };
        let text = fs::read_to_string(&path)
            .map_err(|e| PipelineError::io(path.display().to_string(), e))?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.portal.timeout_secs, 30);
        assert_eq!(settings.inputs.courts_file, PathBuf::from("cortes.csv"));
        assert_eq!(settings.output.directory, PathBuf::from("semanas"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [portal]
            base_url = "https://otra.example"
            request_delay_ms = 0

            [inputs]
            courts_file = "listado.csv"
            "#,
        )
        .unwrap();
        assert_eq!(settings.portal.base_url, "https://otra.example");
        assert_eq!(settings.portal.request_delay_ms, 0);
        assert_eq!(settings.portal.timeout_secs, 30);
        assert_eq!(settings.inputs.courts_file, PathBuf::from("listado.csv"));
        assert_eq!(
            settings.inputs.filter_terms_file,
            PathBuf::from("terminos.txt")
        );
    }

    #[test]
    fn test_bad_toml_is_validation_error() {
        assert!(matches!(
            Settings::from_toml("portal = 3"),
            Err(PipelineError::Validation(_))
        ));
    }
}
