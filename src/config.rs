use std::path::Path;

use bon::Builder;
use rand::Rng;
use serde::Deserialize;

use crate::error::ConfigError;

/// Number of color slots the attribute bag exposes.
pub const DEFAULT_SEGMENT_SLOTS: usize = 4;
/// Stroke width in density-independent units when none is configured.
pub const DEFAULT_LINE_WIDTH_DP: f64 = 5.0;
/// Label size in density-independent units when none is configured.
pub const DEFAULT_FONT_SIZE_DP: f64 = 20.0;

/// Color representation for ring, segments and label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Random opaque color.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`. Alpha is accepted and dropped; the
    /// view only paints opaque colors.
    pub fn parse_hex(input: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        let rgb = match hex.len() {
            6 => hex,
            8 => hex.get(2..).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        // from_str_radix tolerates a leading sign.
        if !rgb.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(rgb, 16).map_err(|_| invalid())?;
        Ok(Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

/// How segments grow in after new data arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    /// All segments sweep together while the ring rotates once.
    Synchronized,
    /// Segments sweep one after another from fixed start angles.
    #[default]
    Staggered,
}

impl TryFrom<i64> for AnimationMode {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AnimationMode::Synchronized),
            1 => Ok(AnimationMode::Staggered),
            other => Err(ConfigError::UnknownAnimationMode(other)),
        }
    }
}

/// Resolved, pixel-space style of one view. Fixed for the view's lifetime.
#[derive(Debug, Clone, Builder)]
pub struct StyleConfig {
    #[builder(default = DEFAULT_LINE_WIDTH_DP)]
    pub stroke_width: f64,
    #[builder(default = DEFAULT_FONT_SIZE_DP)]
    pub font_size: f64,
    /// Segment i is painted with `segment_colors[i % len]`.
    pub segment_colors: Vec<Color>,
    pub circle_color: Color,
    #[builder(default = Color::BLACK)]
    pub text_color: Color,
    #[builder(default)]
    pub animation: AnimationMode,
}

impl StyleConfig {
    /// Palette entry for segment `index`, cycling; `None` for an empty palette.
    pub fn segment_color(&self, index: usize) -> Option<Color> {
        match self.segment_colors.len() {
            0 => None,
            len => Some(self.segment_colors[index % len]),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

/// Convert density-independent units to whole pixels, rounding up.
pub fn dp(density: f64, value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        (density * value).ceil()
    }
}

/// Unresolved attribute bag, as written in a style file.
///
/// ```toml
/// line_width = 5.0
/// font_size = 20.0
/// colors = ["#FF7043", "#29B6F6"]
/// circle_color = "#EEEEEE"
/// animation = 0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleAttributes {
    /// Stroke width in density-independent units.
    pub line_width: Option<f64>,
    /// Label size in density-independent units.
    pub font_size: Option<f64>,
    pub colors: Vec<String>,
    pub circle_color: Option<String>,
    pub text_color: Option<String>,
    /// 0 = synchronized, 1 = staggered.
    pub animation: Option<i64>,
}

impl StyleAttributes {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill defaults, convert units and validate.
    ///
    /// Color slots left empty get random opaque colors drawn from `rng`; pass
    /// a seeded generator for reproducible output. At least
    /// [`DEFAULT_SEGMENT_SLOTS`] segment colors are always produced.
    pub fn resolve<R: Rng>(
        &self,
        density: f64,
        rng: &mut R,
    ) -> Result<StyleConfig, ConfigError> {
        let animation = AnimationMode::try_from(self.animation.unwrap_or(1))?;

        let mut segment_colors = self
            .colors
            .iter()
            .map(|hex| Color::parse_hex(hex))
            .collect::<Result<Vec<_>, _>>()?;
        while segment_colors.len() < DEFAULT_SEGMENT_SLOTS {
            segment_colors.push(Color::random(rng));
        }

        let circle_color = match &self.circle_color {
            Some(hex) => Color::parse_hex(hex)?,
            None => Color::random(rng),
        };
        let text_color = match &self.text_color {
            Some(hex) => Color::parse_hex(hex)?,
            None => Color::BLACK,
        };

        let style = StyleConfig {
            stroke_width: dp(density, self.line_width.unwrap_or(DEFAULT_LINE_WIDTH_DP)),
            font_size: dp(density, self.font_size.unwrap_or(DEFAULT_FONT_SIZE_DP)),
            segment_colors,
            circle_color,
            text_color,
            animation,
        };
        style.validate()?;
        Ok(style)
    }
}
