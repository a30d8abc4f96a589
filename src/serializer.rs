//! Image serialization: capture of the rendering handle into a portable
//! image representation.
//!
//! `serialize` is the single suspension point every export sink goes
//! through. The frame snapshot is taken synchronously when the future first
//! runs; everything after that reflects the snapshot, not any later
//! configuration change.

use base64::Engine as Base64Engine;
use serde::Serialize;
use tokio::task;

use crate::error::{Error, Result};
use crate::rendering::{raster, vector, RenderHandle};

/// Portable image form a capture can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    /// Fixed-size PNG bitmap matching the configured pixel size
    Raster,
    /// Resolution-independent SVG markup
    Vector,
}

impl ImageFormat {
    /// File extension used for downloads of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Raster => "png",
            ImageFormat::Vector => "svg",
        }
    }

    /// IANA media type of this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            ImageFormat::Raster => "image/png",
            ImageFormat::Vector => "image/svg+xml",
        }
    }
}

/// A serialized capture, tagged by format. Transient: produced per export
/// request and consumed by exactly one sink.
#[derive(Debug, Clone)]
pub enum SerializedImage {
    Raster {
        width: u32,
        height: u32,
        png: Vec<u8>,
    },
    Vector {
        svg: String,
    },
}

impl SerializedImage {
    /// The format tag of this image.
    pub fn format(&self) -> ImageFormat {
        match self {
            SerializedImage::Raster { .. } => ImageFormat::Raster,
            SerializedImage::Vector { .. } => ImageFormat::Vector,
        }
    }

    /// IANA media type of the payload.
    pub fn media_type(&self) -> &'static str {
        self.format().media_type()
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Whether the payload is empty. A successful capture never is.
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Borrow the payload bytes (PNG stream or UTF-8 markup).
    pub fn bytes(&self) -> &[u8] {
        match self {
            SerializedImage::Raster { png, .. } => png.as_slice(),
            SerializedImage::Vector { svg } => svg.as_bytes(),
        }
    }

    /// Consume the image into its payload bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedImage::Raster { png, .. } => png,
            SerializedImage::Vector { svg } => svg.into_bytes(),
        }
    }

    /// Render the payload as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.bytes());
        format!("data:{};base64,{}", self.media_type(), encoded)
    }
}

/// Capture the handle's current frame as a portable image.
///
/// Raster captures rasterize and PNG-encode on the blocking pool; vector
/// captures build the markup inline. Fails with [`Error::Capture`] when the
/// surface behind the handle has never painted.
pub async fn serialize(handle: &RenderHandle, format: ImageFormat) -> Result<SerializedImage> {
    let frame = handle.snapshot()?;
    match format {
        ImageFormat::Vector => Ok(SerializedImage::Vector {
            svg: vector::to_svg(&frame),
        }),
        ImageFormat::Raster => {
            let size = frame.config.size;
            let png = task::spawn_blocking(move || -> Result<Vec<u8>> {
                let img = raster::rasterize(&frame);
                raster::encode_png(&img)
            })
            .await
            .map_err(|e| Error::Capture(format!("raster capture task failed: {}", e)))??;
            Ok(SerializedImage::Raster {
                width: size,
                height: size,
                png,
            })
        }
    }
}
