use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BASE_URL, DEFAULT_POINT_NAME, DEFAULT_TIMEOUT_SECS, LABEL_OFFSET, LABEL_SIZE,
    MARKER_RADIUS, MAX_SCALE, MIN_SCALE, PRINT_LABEL_SIZE, PRINT_MARKER_RADIUS,
    PRINT_PAGE_HEIGHT, PRINT_PAGE_WIDTH, ZOOM_INTENSITY, ZOOM_RATIO,
};
use crate::error::{GeodotError, Result};

/// Top-level application configuration, stored as TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub viewport: ViewportConfig,
    pub annotation: AnnotationConfig,
    pub render: RenderConfig,
    pub export: ExportConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| GeodotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeodotError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let v = &self.viewport;
        if !(v.min_scale.is_finite() && v.max_scale.is_finite())
            || !(v.min_scale > 0.0 && v.min_scale <= v.max_scale)
        {
            return Err(GeodotError::Config(format!(
                "viewport scale bounds must satisfy 0 < min_scale <= max_scale (got {} and {})",
                v.min_scale, v.max_scale
            )));
        }
        if !(v.zoom_intensity.is_finite() && v.zoom_intensity > 0.0) {
            return Err(GeodotError::Config(format!(
                "viewport zoom_intensity must be a positive number (got {})",
                v.zoom_intensity
            )));
        }
        if !(v.ratio.is_finite() && v.ratio > 1.0) {
            return Err(GeodotError::Config(format!(
                "viewport ratio must be greater than 1 (got {})",
                v.ratio
            )));
        }
        if self.export.page_width == 0 || self.export.page_height == 0 {
            return Err(GeodotError::Config("export page size must be non-zero".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// How one wheel notch changes the scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ZoomMode {
    /// Multiply by `exp(±zoom_intensity)`.
    #[default]
    Exponential,
    /// Multiply or divide by `ratio`.
    Ratio,
}

impl std::fmt::Display for ZoomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exponential => write!(f, "Exponential"),
            Self::Ratio => write!(f, "Fixed ratio"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_mode: ZoomMode,
    pub zoom_intensity: f64,
    pub ratio: f64,
}

impl ViewportConfig {
    /// Multiplicative scale change for one notch in the given direction.
    pub fn step_factor(&self, zoom_in: bool) -> f64 {
        match self.zoom_mode {
            ZoomMode::Exponential => {
                let sign = if zoom_in { 1.0 } else { -1.0 };
                (sign * self.zoom_intensity).exp()
            }
            ZoomMode::Ratio if zoom_in => self.ratio,
            ZoomMode::Ratio => 1.0 / self.ratio,
        }
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_mode: ZoomMode::default(),
            zoom_intensity: ZOOM_INTENSITY,
            ratio: ZOOM_RATIO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Reject clicks while the symbol field is empty.
    pub require_symbol: bool,
    pub default_point_name: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            require_symbol: false,
            default_point_name: DEFAULT_POINT_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub marker_radius: f64,
    pub label_offset: f64,
    pub label_size: f64,
    pub marker_color: [u8; 4],
    pub label_color: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            marker_radius: MARKER_RADIUS,
            label_offset: LABEL_OFFSET,
            label_size: LABEL_SIZE,
            marker_color: [255, 0, 0, 255],
            label_color: [255, 255, 0, 255],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub page_width: u32,
    pub page_height: u32,
    pub marker_radius: f64,
    pub label_size: f64,
    /// TrueType font used for burned-in labels. System fonts are tried when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl ExportConfig {
    /// Render style on the print page: export sizes with the screen colours.
    pub fn render_style(&self, screen: &RenderConfig) -> RenderConfig {
        RenderConfig {
            marker_radius: self.marker_radius,
            label_offset: self.marker_radius + screen.label_offset,
            label_size: self.label_size,
            ..screen.clone()
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_width: PRINT_PAGE_WIDTH,
            page_height: PRINT_PAGE_HEIGHT,
            marker_radius: PRINT_MARKER_RADIUS,
            label_size: PRINT_LABEL_SIZE,
            font_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Bulk-upload catalog rows as building points after an import.
    pub upload_on_import: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            upload_on_import: true,
        }
    }
}
