//! Cropper configuration.
//!
//! Handles loading, sanitizing, and merging `cropper.toml`. Configuration is
//! layered: stock defaults, then the config file, then command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [session]
//! min_drag_size = 10          # Shorter drags (screen px) are discarded
//! canvas_margin = 16          # Padding around the thumbnail (screen px)
//! thumbnail_size = [896, 608] # Box the view is fitted into
//! rounding = "half-up"        # or "truncate"
//!
//! [export]
//! # format = "png"            # Omit to keep the source extension
//! dpi = 300                   # PDF resolution, at least 36
//! divisor = 1                 # Integer downsampling of each crop
//! clean_margin = 0            # Extra white-out around regions (px)
//! pdf = false                 # Also write <image>.pdf
//! reference_sheet = false     # Also write crop 0 with regions whited out
//!
//! [detect]
//! background = 255            # Uniform background level
//! threshold = 0               # Allowed difference from the background
//! denoise = true              # 3x3 median filter first
//! binarize = false            # Snap to black/white first
//! ```
//!
//! ## Out-of-range values
//!
//! Unknown keys are rejected to catch typos early, but numeric values out of
//! range are not errors: [`CropperConfig::sanitize`] replaces each one with
//! its default and logs a warning. Every load path sanitizes.

use crate::detect::DetectOptions;
use crate::export::ExportSettings;
use crate::imaging::Divisor;
use crate::rect::Rounding;
use crate::session::SessionSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "cropper.toml";

/// Raster formats crops may be written in.
pub const EXPORT_FORMATS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

/// Replacement for a format outside [`EXPORT_FORMATS`].
const FALLBACK_FORMAT: &str = "png";

const U32_RANGE: RangeInclusive<i64> = 0..=u32::MAX as i64;

/// Upper bound for canvas sizes and margins, in screen pixels. Keeps the
/// padded canvas well inside `i32` geometry.
const CANVAS_LIMIT: i64 = 16_384;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Full configuration loaded from `cropper.toml`.
///
/// Numeric fields are signed so that negative values parse and can be
/// replaced by defaults instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropperConfig {
    pub session: SessionConfig,
    pub export: ExportConfig,
    pub detect: DetectConfig,
}

/// Interactive session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Drags whose shorter side is below this (screen px) are discarded.
    pub min_drag_size: i64,
    /// Padding between canvas edge and thumbnail (screen px).
    pub canvas_margin: i64,
    /// Box the view thumbnail is fitted into, `[width, height]`.
    pub thumbnail_size: [i64; 2],
    /// Rounding applied when mapping between screen and source pixels.
    pub rounding: Rounding,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_drag_size: 10,
            canvas_margin: 16,
            thumbnail_size: [896, 608],
            rounding: Rounding::HalfUp,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Output extension for crops. `None` keeps the source extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// PDF resolution in dots per inch.
    pub dpi: i64,
    /// Integer downsampling factor for every crop.
    pub divisor: i64,
    /// Extra pixels whited out around each region on the reference sheet.
    pub clean_margin: i64,
    /// Also write a one-page PDF.
    pub pdf: bool,
    /// Also write crop 0: the source with every region whited out.
    pub reference_sheet: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: None,
            dpi: 300,
            divisor: 1,
            clean_margin: 0,
            pdf: false,
            reference_sheet: false,
        }
    }
}

/// Auto-detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectConfig {
    pub background: i64,
    pub threshold: i64,
    pub denoise: bool,
    pub binarize: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            background: 255,
            threshold: 0,
            denoise: true,
            binarize: false,
        }
    }
}

/// Replace `value` with `default` when it falls outside `valid`.
fn sanitize_field(
    name: &str,
    value: &mut i64,
    valid: RangeInclusive<i64>,
    default: i64,
    warnings: &mut Vec<String>,
) {
    if !valid.contains(value) {
        warnings.push(format!("{name} = {value} is out of range, using {default}"));
        *value = default;
    }
}

impl CropperConfig {
    /// Replace out-of-range values with their defaults.
    ///
    /// Returns one message per replaced value; each is also logged at `warn`.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        let s = SessionConfig::default();
        let e = ExportConfig::default();
        let d = DetectConfig::default();
        let max = u32::MAX as i64;

        let session = &mut self.session;
        sanitize_field(
            "session.min_drag_size",
            &mut session.min_drag_size,
            1..=i64::from(i32::MAX),
            s.min_drag_size,
            &mut warnings,
        );
        sanitize_field(
            "session.canvas_margin",
            &mut session.canvas_margin,
            0..=CANVAS_LIMIT,
            s.canvas_margin,
            &mut warnings,
        );
        for (i, side) in session.thumbnail_size.iter_mut().enumerate() {
            sanitize_field(
                &format!("session.thumbnail_size[{i}]"),
                side,
                1..=CANVAS_LIMIT,
                s.thumbnail_size[i],
                &mut warnings,
            );
        }

        let export = &mut self.export;
        if let Some(format) = export.format.as_mut() {
            let normalized = format.trim_start_matches('.').to_ascii_lowercase();
            if EXPORT_FORMATS.contains(&normalized.as_str()) {
                *format = normalized;
            } else {
                warnings.push(format!(
                    "export.format = {format:?} is not one of {}, using {FALLBACK_FORMAT}",
                    EXPORT_FORMATS.join(", ")
                ));
                *format = FALLBACK_FORMAT.to_string();
            }
        }
        sanitize_field("export.dpi", &mut export.dpi, 36..=max, e.dpi, &mut warnings);
        sanitize_field(
            "export.divisor",
            &mut export.divisor,
            1..=max,
            e.divisor,
            &mut warnings,
        );
        sanitize_field(
            "export.clean_margin",
            &mut export.clean_margin,
            U32_RANGE,
            e.clean_margin,
            &mut warnings,
        );

        let detect = &mut self.detect;
        sanitize_field(
            "detect.background",
            &mut detect.background,
            0..=255,
            d.background,
            &mut warnings,
        );
        sanitize_field(
            "detect.threshold",
            &mut detect.threshold,
            0..=255,
            d.threshold,
            &mut warnings,
        );

        for warning in &warnings {
            log::warn!("config: {warning}");
        }
        warnings
    }

    // Conversions below assume `sanitize` has run; out-of-range values fall
    // back to defaults rather than wrapping.

    pub fn session_settings(&self) -> SessionSettings {
        let s = &self.session;
        let defaults = SessionSettings::default();
        SessionSettings {
            min_drag_size: to_u32(s.min_drag_size, defaults.min_drag_size),
            canvas_margin: to_u32(s.canvas_margin, defaults.canvas_margin),
            thumbnail_box: (
                to_u32(s.thumbnail_size[0], defaults.thumbnail_box.0),
                to_u32(s.thumbnail_size[1], defaults.thumbnail_box.1),
            ),
            rounding: s.rounding,
        }
    }

    pub fn export_settings(&self) -> ExportSettings {
        let e = &self.export;
        ExportSettings {
            format: e.format.clone(),
            dpi: to_u32(e.dpi, 300),
            divisor: Divisor::new(to_u32(e.divisor, 1)),
            clean_margin: to_u32(e.clean_margin, 0),
            pdf: e.pdf,
            reference_sheet: e.reference_sheet,
        }
    }

    pub fn detect_options(&self) -> DetectOptions {
        let d = &self.detect;
        let defaults = DetectOptions::default();
        DetectOptions {
            background: u8::try_from(d.background).unwrap_or(defaults.background),
            threshold: u8::try_from(d.threshold).unwrap_or(defaults.threshold),
            denoise: d.denoise,
            binarize: d.binarize,
        }
    }
}

fn to_u32(value: i64, default: u32) -> u32 {
    u32::try_from(value).unwrap_or(default)
}

/// Values given on the command line. Each `Some`/`true` overrides the
/// config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub min_drag_size: Option<i64>,
    pub format: Option<String>,
    pub dpi: Option<i64>,
    pub divisor: Option<i64>,
    pub clean_margin: Option<i64>,
    pub pdf: bool,
    pub reference_sheet: bool,
}

impl CliOverrides {
    /// The overrides as a sparse TOML table, ready for [`merge_toml`].
    pub fn to_toml(&self) -> toml::Value {
        let mut session = toml::Table::new();
        if let Some(v) = self.min_drag_size {
            session.insert("min_drag_size".into(), toml::Value::Integer(v));
        }

        let mut export = toml::Table::new();
        if let Some(v) = &self.format {
            export.insert("format".into(), toml::Value::String(v.clone()));
        }
        for (key, value) in [
            ("dpi", self.dpi),
            ("divisor", self.divisor),
            ("clean_margin", self.clean_margin),
        ] {
            if let Some(v) = value {
                export.insert(key.into(), toml::Value::Integer(v));
            }
        }
        if self.pdf {
            export.insert("pdf".into(), toml::Value::Boolean(true));
        }
        if self.reference_sheet {
            export.insert("reference_sheet".into(), toml::Value::Boolean(true));
        }

        let mut root = toml::Table::new();
        if !session.is_empty() {
            root.insert("session".into(), toml::Value::Table(session));
        }
        if !export.is_empty() {
            root.insert("export".into(), toml::Value::Table(export));
        }
        toml::Value::Table(root)
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CropperConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge every overlay onto `base` in order, then deserialize and sanitize.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<CropperConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let mut config: CropperConfig = merged.try_into()?;
    config.sanitize();
    Ok(config)
}

/// Load the effective configuration: defaults, then `path` (if it exists),
/// then `cli`.
pub fn load_config(path: &Path, cli: &CliOverrides) -> Result<CropperConfig, ConfigError> {
    let file = load_raw_config(path)?;
    if file.is_some() {
        log::debug!("loaded config from {}", path.display());
    }
    resolve_config(stock_defaults_value(), file.into_iter().chain([cli.to_toml()]))
}

/// Returns a fully-commented stock `cropper.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Cropper Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override this file. Unknown keys cause an error;
# out-of-range values are replaced by their default with a warning.

# ---------------------------------------------------------------------------
# Interactive session
# ---------------------------------------------------------------------------
[session]
# Drags whose shorter side is below this many screen pixels are discarded.
min_drag_size = 10

# Padding between the canvas edge and the thumbnail, in screen pixels
# (at most 16384).
canvas_margin = 16

# Box the current view is fitted into, as [width, height]; each side at
# most 16384.
thumbnail_size = [896, 608]

# How fractional pixel coordinates are rounded: "half-up" or "truncate".
rounding = "half-up"

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Extension for crop files: png, jpg, jpeg, tif or tiff.
# Omit to keep the source image's extension.
# format = "png"

# Resolution of the PDF page (at least 36).
dpi = 300

# Divide each crop's pixel size by this integer (1 = full size).
divisor = 1

# Extra pixels whited out around each region on the reference sheet.
clean_margin = 0

# Also write <image>.pdf with every region at its original position.
pdf = false

# Also write crop 0: the source with every region whited out.
reference_sheet = false

# ---------------------------------------------------------------------------
# Auto-detection
# ---------------------------------------------------------------------------
[detect]
# Uniform background level (255 = white flatbed, 0 = black).
background = 255

# Pixels differing from the background by more than this are content.
threshold = 0

# Run a 3x3 median filter first to drop dust and noise.
denoise = true

# Snap every pixel to black or white before detection.
binarize = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CropperConfig::default();
        assert_eq!(config.session.min_drag_size, 10);
        assert_eq!(config.session.thumbnail_size, [896, 608]);
        assert_eq!(config.export.dpi, 300);
        assert_eq!(config.export.format, None);
        assert_eq!(config.detect.background, 255);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[export]
dpi = 150
"#;
        let config: CropperConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.export.dpi, 150);
        // Defaults preserved
        assert_eq!(config.export.divisor, 1);
        assert_eq!(config.session.canvas_margin, 16);
    }

    #[test]
    fn parse_rounding_policy() {
        let config: CropperConfig = toml::from_str("[session]\nrounding = \"truncate\"").unwrap();
        assert_eq!(config.session.rounding, Rounding::Truncate);
        assert_eq!(config.session_settings().rounding, Rounding::Truncate);
    }

    // =========================================================================
    // Unknown keys
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<CropperConfig, _> = toml::from_str("[export]\nqualty = 90");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<CropperConfig, _> = toml::from_str("[colors]\nbg = 1");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_rounding_rejected() {
        let result: Result<CropperConfig, _> =
            toml::from_str("[session]\nrounding = \"banker\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // Sanitize
    // =========================================================================

    #[test]
    fn sanitize_keeps_valid_values() {
        let mut config = CropperConfig::default();
        config.export.dpi = 36;
        config.export.format = Some("JPG".into());
        assert!(config.sanitize().is_empty());
        assert_eq!(config.export.dpi, 36);
        assert_eq!(config.export.format.as_deref(), Some("jpg"));
    }

    #[test]
    fn sanitize_replaces_low_dpi() {
        let mut config = CropperConfig::default();
        config.export.dpi = 35;
        let warnings = config.sanitize();
        assert_eq!(config.export.dpi, 300);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("export.dpi"));
    }

    #[test]
    fn sanitize_replaces_bad_divisor_and_margin() {
        let mut config = CropperConfig::default();
        config.export.divisor = 0;
        config.export.clean_margin = -4;
        config.sanitize();
        assert_eq!(config.export.divisor, 1);
        assert_eq!(config.export.clean_margin, 0);
    }

    #[test]
    fn sanitize_unknown_format_falls_back_to_png() {
        let mut config = CropperConfig::default();
        config.export.format = Some("bmp".into());
        config.sanitize();
        assert_eq!(config.export.format.as_deref(), Some("png"));
    }

    #[test]
    fn sanitize_strips_leading_dot() {
        let mut config = CropperConfig::default();
        config.export.format = Some(".tiff".into());
        assert!(config.sanitize().is_empty());
        assert_eq!(config.export.format.as_deref(), Some("tiff"));
    }

    #[test]
    fn sanitize_session_values() {
        let mut config = CropperConfig::default();
        config.session.min_drag_size = 0;
        config.session.canvas_margin = -1;
        config.session.thumbnail_size = [0, 400];
        let warnings = config.sanitize();
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.session.min_drag_size, 10);
        assert_eq!(config.session.canvas_margin, 16);
        assert_eq!(config.session.thumbnail_size, [896, 400]);
    }

    #[test]
    fn sanitize_session_values_beyond_screen_geometry() {
        let mut config = CropperConfig::default();
        config.session.min_drag_size = 3_000_000_000;
        config.session.canvas_margin = 3_000_000_000;
        config.session.thumbnail_size = [896, 100_000];
        let warnings = config.sanitize();
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.session.min_drag_size, 10);
        assert_eq!(config.session.canvas_margin, 16);
        assert_eq!(config.session.thumbnail_size, [896, 608]);
    }

    #[test]
    fn sanitize_detect_levels() {
        let mut config = CropperConfig::default();
        config.detect.background = 300;
        config.detect.threshold = -1;
        config.sanitize();
        assert_eq!(config.detect.background, 255);
        assert_eq!(config.detect.threshold, 0);
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    #[test]
    fn session_settings_match_defaults() {
        assert_eq!(
            CropperConfig::default().session_settings(),
            SessionSettings::default()
        );
    }

    #[test]
    fn detect_options_match_defaults() {
        assert_eq!(
            CropperConfig::default().detect_options(),
            DetectOptions::default()
        );
    }

    #[test]
    fn export_settings_from_config() {
        let mut config = CropperConfig::default();
        config.export.divisor = 3;
        config.export.pdf = true;
        let settings = config.export_settings();
        assert_eq!(settings.divisor, Divisor::new(3));
        assert_eq!(settings.dpi, 300);
        assert!(settings.pdf);
        assert!(!settings.reference_sheet);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[export]\ndpi = 300\ndivisor = 1").unwrap();
        let overlay: toml::Value = toml::from_str("[export]\ndivisor = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["export"]["dpi"].as_integer(), Some(300));
        assert_eq!(merged["export"]["divisor"].as_integer(), Some(2));
    }

    // =========================================================================
    // CLI overrides
    // =========================================================================

    #[test]
    fn empty_overrides_are_empty_table() {
        let value = CliOverrides::default().to_toml();
        assert!(value.as_table().unwrap().is_empty());
    }

    #[test]
    fn overrides_only_set_given_keys() {
        let cli = CliOverrides {
            dpi: Some(150),
            pdf: true,
            ..CliOverrides::default()
        };
        let value = cli.to_toml();
        assert_eq!(value["export"]["dpi"].as_integer(), Some(150));
        assert_eq!(value["export"]["pdf"].as_bool(), Some(true));
        assert!(value["export"].get("divisor").is_none());
        assert!(value.get("session").is_none());
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_raw_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config =
            load_config(&tmp.path().join(CONFIG_FILE_NAME), &CliOverrides::default()).unwrap();
        assert_eq!(config, CropperConfig::default());
    }

    #[test]
    fn load_config_cli_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[export]\ndpi = 150\ndivisor = 2\n").unwrap();

        let cli = CliOverrides {
            dpi: Some(600),
            ..CliOverrides::default()
        };
        let config = load_config(&path, &cli).unwrap();
        assert_eq!(config.export.dpi, 600);
        assert_eq!(config.export.divisor, 2);
    }

    #[test]
    fn load_config_sanitizes_file_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[export]\ndpi = 10\n").unwrap();

        let config = load_config(&path, &CliOverrides::default()).unwrap();
        assert_eq!(config.export.dpi, 300);
    }

    #[test]
    fn load_config_sanitizes_cli_values() {
        let tmp = TempDir::new().unwrap();
        let cli = CliOverrides {
            divisor: Some(-3),
            ..CliOverrides::default()
        };
        let config = load_config(&tmp.path().join(CONFIG_FILE_NAME), &cli).unwrap();
        assert_eq!(config.export.divisor, 1);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();
        let result = load_config(&path, &CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_unknown_key_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[export]\ndpii = 300\n").unwrap();
        assert!(load_config(&path, &CliOverrides::default()).is_err());
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value();
        for section in ["session", "export", "detect"] {
            assert!(value.get(section).is_some(), "missing [{section}]");
        }
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CropperConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CropperConfig::default());
    }
}
