//! Clipboard capability: writes a single raster image entry to the system
//! clipboard.

use std::sync::Mutex;

use crate::error::Result;
#[cfg(feature = "clipboard")]
use crate::error::Error;

/// A decoded pixel buffer ready for a clipboard entry: tightly packed RGBA,
/// row-major, `width * height * 4` bytes.
#[derive(Debug, Clone)]
pub struct ClipboardImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// An image-capable clipboard. One call writes one atomic clipboard entry.
///
/// Implementations may block on permission prompts; the dispatcher invokes
/// them off the async scheduler.
pub trait ClipboardWriter: Send + Sync {
    fn write_image(&self, image: ClipboardImage) -> Result<()>;
}

/// The system clipboard, backed by `arboard`.
///
/// A fresh clipboard connection is opened per write; some platforms drop
/// the entry when the owning connection closes early, so the write is
/// handed over before the connection is released.
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardWriter for SystemClipboard {
    fn write_image(&self, image: ClipboardImage) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| Error::Clipboard(format!("clipboard unavailable: {}", e)))?;
        let data = arboard::ImageData {
            width: image.width as usize,
            height: image.height as usize,
            bytes: image.rgba.into(),
        };
        clipboard
            .set_image(data)
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// Records written images in memory for tests.
#[derive(Default)]
pub struct MemoryClipboard {
    images: Mutex<Vec<ClipboardImage>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every image written so far.
    pub fn images(&self) -> Vec<ClipboardImage> {
        self.images.lock().unwrap().clone()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_image(&self, image: ClipboardImage) -> Result<()> {
        self.images.lock().unwrap().push(image);
        Ok(())
    }
}
