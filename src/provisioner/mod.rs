pub mod decoder;
pub mod error;
pub mod fallback;
pub mod loader;
pub mod schema;
pub mod validator;

pub use decoder::decode;
pub use error::*;
pub use fallback::{inherit, FallbackResolver};
pub use loader::{load_config, parse_config, read_config, ConfigFormat};
pub use validator::{validate, ConfigValidator, ValidationResult};

use crate::types::{ConfigMap, ProvisionerConfig};

/// Validates, then decodes. Any validation error stops before decoding.
pub fn prepare(
    root: &ConfigMap,
) -> Result<(ProvisionerConfig, Vec<ValidationWarning>), ProvisionError> {
    let warnings = validate(root).into_result()?;
    let config = decode(root)?;
    Ok((config, warnings))
}
