use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use depcollect_util::errors::{DepcollectError, DepcollectResult};

/// The subset of a `package.json` that dependency collection cares about.
///
/// Unknown fields (`name`, `version`, `scripts`, ...) are ignored, so a
/// package with unusual metadata still expands. Only the keys of `dependencies` are used; the
/// constraint values are kept as raw JSON and never interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: BTreeMap<String, Value>,
}

impl PackageManifest {
    /// Load and parse a `package.json` file from the given path.
    pub fn from_path(path: &Path) -> DepcollectResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepcollectError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DepcollectError::Manifest {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Parse a `package.json` from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> DepcollectResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            DepcollectError::Manifest {
                message: format!("Failed to parse package.json: {e}"),
            }
            .into()
        })
    }

    /// Names of the declared runtime dependencies, in sorted order.
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies.keys().cloned().collect()
    }
}

/// `"dependencies": null` means no dependencies.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
