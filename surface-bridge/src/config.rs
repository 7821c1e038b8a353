//! Factory configuration.

use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::SurfaceLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`SurfaceFactory`](crate::SurfaceFactory).
///
/// Missing fields in JSON take their default values:
///
/// ```json
/// { "raster_limits": { "max_width": 2048, "max_height": 2048 }, "ppi": 144.0 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Limits reported by raster canvases the factory creates.
    pub raster_limits: SurfaceLimits,
    /// Limits reported by recording canvases opened by the factory.
    pub recording_limits: SurfaceLimits,
    /// Pixel density written into exported PNG files.
    pub ppi: f32,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            raster_limits: SurfaceLimits::default(),
            recording_limits: SurfaceLimits::default(),
            ppi: 72.0,
        }
    }
}

impl FactoryConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> SurfaceResult<Self> {
        let config: FactoryConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> SurfaceResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            SurfaceError::ConfigError(format!("failed to read {}: {}", path.display(), err))
        })?;
        log::info!(target: "surface", "loading factory config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> SurfaceResult<()> {
        if !self.ppi.is_finite() || self.ppi <= 0.0 {
            return Err(SurfaceError::ConfigError(format!(
                "ppi must be a positive number, got {}",
                self.ppi
            )));
        }
        Ok(())
    }
}
