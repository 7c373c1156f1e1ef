use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::error::LoadError;
use crate::types::{ConfigMap, ConfigValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Auto,
}

/// Parses a provisioner document into the raw value tree.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ConfigMap, LoadError> {
    if content.trim().is_empty() {
        return Ok(ConfigMap::new());
    }

    let detected = match format {
        ConfigFormat::Auto => detect_format(content)?,
        format => format,
    };

    let value: serde_json::Value = match detected {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| LoadError::InvalidJson {
            reason: e.to_string(),
        })?,
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| LoadError::InvalidYaml {
            reason: e.to_string(),
        })?,
        ConfigFormat::Auto => unreachable!("Auto format should be resolved by now"),
    };

    match ConfigValue::from_json(value) {
        Some(ConfigValue::Map(entries)) => Ok(entries),
        None => Ok(ConfigMap::new()),
        Some(other) => Err(LoadError::NotAMapping {
            found: other.kind().to_string(),
        }),
    }
}

/// Reads a document from `path`, or from stdin when `path` is `-`.
pub fn load_config(path: &Path) -> Result<ConfigMap, LoadError> {
    if path == Path::new("-") {
        return read_config(std::io::stdin().lock(), "<stdin>");
    }

    let shown = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;
    read_config(file, &shown)
}

/// Reads a whole document from `reader`. `origin` names the source in errors.
pub fn read_config<R: Read>(mut reader: R, origin: &str) -> Result<ConfigMap, LoadError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| LoadError::Io {
            path: origin.to_string(),
            source,
        })?;

    debug!(path = %origin, bytes = content.len(), "Loaded provisioner configuration");
    parse_config(&content, ConfigFormat::Auto)
}

fn detect_format(content: &str) -> Result<ConfigFormat, LoadError> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') {
        Ok(ConfigFormat::Json)
    } else if trimmed.starts_with("---") {
        Ok(ConfigFormat::Yaml)
    } else if serde_json::from_str::<serde_json::Value>(content).is_ok() {
        Ok(ConfigFormat::Json)
    } else if serde_yaml::from_str::<serde_yaml::Value>(content).is_ok() {
        Ok(ConfigFormat::Yaml)
    } else {
        Err(LoadError::UnknownFormat)
    }
}
