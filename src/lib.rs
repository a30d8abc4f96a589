//! qrstudio: a QR code configuration-to-export pipeline
//!
//! A [`QrConfig`] drives a deterministic rendering surface; an async
//! serializer captures the surface as a PNG bitmap or an SVG document; and
//! three independent export operations deliver the capture to platform
//! sinks (file download, OS share target, image clipboard), each reporting
//! a single typed [`Outcome`] to a feedback channel.
//!
//! # Features
//!
//! - **Deterministic rendering**: identical configurations produce
//!   byte-identical captures
//! - **Typed capability probing**: share and clipboard availability are
//!   `Option`s, so unsupported platforms take an ordinary failure branch
//! - **Snapshot isolation**: each export captures the frame current when
//!   its serialization begins, unaffected by later configuration changes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use qrstudio::feedback::LogFeedback;
//! use qrstudio::platform::NativePlatform;
//! use qrstudio::{ImageFormat, Studio};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut studio = Studio::new(Arc::new(NativePlatform::new()), Arc::new(LogFeedback))?;
//! studio.set_content("https://example.com")?;
//! studio.set_size(512)?;
//! let outcome = studio.download(ImageFormat::Raster).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

pub mod error;
pub use error::{Error, FailureKind, Result};

pub mod encode;

pub mod rendering;
pub use rendering::{RenderHandle, Surface};

pub mod serializer;
pub use serializer::{ImageFormat, SerializedImage};

pub mod dispatch;
pub use dispatch::{Dispatcher, ExportAction, Outcome};

// Platform capability surface (file save, share target, clipboard)
pub mod platform;

// Outcome reporting
pub mod feedback;

use feedback::FeedbackChannel;
use platform::PlatformApi;

/// Smallest allowed square dimension in pixels
pub const SIZE_MIN: u32 = 128;
/// Largest allowed square dimension in pixels
pub const SIZE_MAX: u32 = 512;

/// An opaque RGB color. Parsed only from well-formed hex notation, so a
/// configuration can never hold a malformed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` hex notation.
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::Config(format!("color must start with '#': {:?}", s)))?;
        if !hex.is_ascii() {
            return Err(Error::Config(format!("malformed color: {:?}", s)));
        }
        let channel = |pair: &str| {
            u8::from_str_radix(pair, 16)
                .map_err(|_| Error::Config(format!("malformed color: {:?}", s)))
        };
        match hex.len() {
            6 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let expand = |c: &str| channel(&format!("{0}{0}", c));
                Ok(Self {
                    r: expand(&hex[0..1])?,
                    g: expand(&hex[1..2])?,
                    b: expand(&hex[2..3])?,
                })
            }
            _ => Err(Error::Config(format!("malformed color: {:?}", s))),
        }
    }

    /// Lowercase `#rrggbb` notation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as an opaque RGBA pixel.
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Error correction level of the rendered symbol, in ascending redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EcLevel {
    #[default]
    Low,
    Medium,
    Quartile,
    High,
}

impl FromStr for EcLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(EcLevel::Low),
            "m" | "medium" => Ok(EcLevel::Medium),
            "q" | "quartile" => Ok(EcLevel::Quartile),
            "h" | "high" => Ok(EcLevel::High),
            other => Err(Error::Config(format!(
                "unknown error correction level: {:?}",
                other
            ))),
        }
    }
}

/// The configuration driving the rendered code image.
///
/// Six independent settings with no cross-field invariants. The defaults
/// mirror a fresh session: empty content (rendered as a placeholder
/// symbol), 256 px, black on white, lowest redundancy, quiet border on.
///
/// # Examples
///
/// ```
/// let mut cfg = qrstudio::QrConfig::default();
/// cfg.set_size(700);
/// assert_eq!(cfg.size, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrConfig {
    /// Text or URL to encode; empty renders a placeholder symbol
    pub content: String,
    /// Square dimension in pixels, always within `[SIZE_MIN, SIZE_MAX]`
    pub size: u32,
    /// Color of dark modules
    pub foreground: Color,
    /// Color of light modules and the quiet border
    pub background: Color,
    /// Symbol redundancy
    pub level: EcLevel,
    /// Whether a quiet border surrounds the symbol
    pub include_margin: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            size: 256,
            foreground: Color::BLACK,
            background: Color::WHITE,
            level: EcLevel::Low,
            include_margin: true,
        }
    }
}

impl QrConfig {
    /// Replace the encoded content. Any string is accepted; emptiness is a
    /// valid state.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Replace the pixel dimension, clamped into `[SIZE_MIN, SIZE_MAX]`.
    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(SIZE_MIN, SIZE_MAX);
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn set_level(&mut self, level: EcLevel) {
        self.level = level;
    }

    pub fn set_include_margin(&mut self, include_margin: bool) {
        self.include_margin = include_margin;
    }
}

/// Top-level controller: owns the configuration, keeps the surface painted,
/// and fronts the export dispatcher.
///
/// Every setter replaces the configuration wholesale and re-renders
/// synchronously; the new value is committed only when the paint succeeds,
/// so the surface and the configuration can never disagree.
pub struct Studio {
    config: QrConfig,
    surface: Surface,
    dispatcher: Dispatcher,
}

impl Studio {
    /// A studio with the default configuration, painted eagerly so the
    /// handle is capturable from the start.
    pub fn new(platform: Arc<dyn PlatformApi>, feedback: Arc<dyn FeedbackChannel>) -> Result<Self> {
        Self::with_config(QrConfig::default(), platform, feedback)
    }

    /// A studio starting from `config`.
    pub fn with_config(
        config: QrConfig,
        platform: Arc<dyn PlatformApi>,
        feedback: Arc<dyn FeedbackChannel>,
    ) -> Result<Self> {
        let mut surface = Surface::new();
        surface.apply(&config)?;
        let dispatcher = Dispatcher::new(surface.handle(), platform, feedback);
        Ok(Self {
            config,
            surface,
            dispatcher,
        })
    }

    /// The current configuration.
    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    /// The capture handle over the live surface.
    pub fn handle(&self) -> RenderHandle {
        self.surface.handle()
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<()> {
        let mut next = self.config.clone();
        next.set_content(content);
        self.replace(next)
    }

    pub fn set_size(&mut self, size: u32) -> Result<()> {
        let mut next = self.config.clone();
        next.set_size(size);
        self.replace(next)
    }

    pub fn set_foreground(&mut self, color: Color) -> Result<()> {
        let mut next = self.config.clone();
        next.set_foreground(color);
        self.replace(next)
    }

    pub fn set_background(&mut self, color: Color) -> Result<()> {
        let mut next = self.config.clone();
        next.set_background(color);
        self.replace(next)
    }

    pub fn set_level(&mut self, level: EcLevel) -> Result<()> {
        let mut next = self.config.clone();
        next.set_level(level);
        self.replace(next)
    }

    pub fn set_include_margin(&mut self, include_margin: bool) -> Result<()> {
        let mut next = self.config.clone();
        next.set_include_margin(include_margin);
        self.replace(next)
    }

    fn replace(&mut self, next: QrConfig) -> Result<()> {
        self.surface.apply(&next)?;
        self.config = next;
        Ok(())
    }

    /// Capture the current frame without routing it to a sink.
    pub async fn capture(&self, format: ImageFormat) -> Result<SerializedImage> {
        serializer::serialize(&self.handle(), format).await
    }

    /// See [`Dispatcher::download`].
    pub async fn download(&self, format: ImageFormat) -> Outcome {
        self.dispatcher.download(format).await
    }

    /// See [`Dispatcher::share`].
    pub async fn share(&self) -> Outcome {
        self.dispatcher.share().await
    }

    /// See [`Dispatcher::copy`].
    pub async fn copy(&self) -> Outcome {
        self.dispatcher.copy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NoopFeedback;
    use crate::platform::NoopPlatform;

    fn studio() -> Studio {
        Studio::new(Arc::new(NoopPlatform::new()), Arc::new(NoopFeedback)).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = QrConfig::default();
        assert_eq!(config.content, "");
        assert_eq!(config.size, 256);
        assert_eq!(config.foreground, Color::BLACK);
        assert_eq!(config.background, Color::WHITE);
        assert_eq!(config.level, EcLevel::Low);
        assert!(config.include_margin);
    }

    #[test]
    fn size_mutator_clamps_into_range() {
        let mut config = QrConfig::default();
        config.set_size(700);
        assert_eq!(config.size, 512);
        config.set_size(50);
        assert_eq!(config.size, 128);
        config.set_size(256);
        assert_eq!(config.size, 256);
    }

    #[test]
    fn color_parsing_accepts_only_well_formed_values() {
        assert_eq!(Color::parse("#112233").unwrap(), Color::new(0x11, 0x22, 0x33));
        assert_eq!(Color::parse("#abc").unwrap(), Color::new(0xaa, 0xbb, 0xcc));
        assert!(Color::parse("112233").is_err());
        assert!(Color::parse("#11223").is_err());
        assert!(Color::parse("#11223g").is_err());
        assert!(Color::parse("#€€").is_err());
        assert_eq!(Color::parse("#A1B2C3").unwrap().to_hex(), "#a1b2c3");
    }

    #[test]
    fn level_parses_both_spellings() {
        assert_eq!("l".parse::<EcLevel>().unwrap(), EcLevel::Low);
        assert_eq!("quartile".parse::<EcLevel>().unwrap(), EcLevel::Quartile);
        assert_eq!("H".parse::<EcLevel>().unwrap(), EcLevel::High);
        assert!("extreme".parse::<EcLevel>().is_err());
    }

    #[test]
    fn studio_paints_eagerly() {
        let studio = studio();
        let frame = studio.handle().snapshot().unwrap();
        assert_eq!(frame.generation, 1);
    }

    #[test]
    fn studio_setters_re_render() {
        let mut studio = studio();
        studio.set_content("hello").unwrap();
        studio.set_size(300).unwrap();
        let frame = studio.handle().snapshot().unwrap();
        assert_eq!(frame.generation, 3);
        assert_eq!(frame.config.content, "hello");
        assert_eq!(frame.config.size, 300);
    }

    #[test]
    fn failed_mutation_keeps_previous_config_and_frame() {
        let mut studio = studio();
        studio.set_content("stable").unwrap();

        assert!(studio.set_content("x".repeat(8000)).is_err());
        assert_eq!(studio.config().content, "stable");
        let frame = studio.handle().snapshot().unwrap();
        assert_eq!(frame.config.content, "stable");
    }
}
