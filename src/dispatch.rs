//! Export sink dispatcher: download, share, and clipboard copy.
//!
//! The three operations are independent and safe to invoke repeatedly. Each
//! re-captures the rendering handle when it starts, recovers every error
//! locally, reports exactly one [`Outcome`] to the feedback channel, and
//! returns that same outcome to the caller. Nothing is cancellable once
//! started and no operation retries on its own.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::task;

use crate::error::{Error, FailureKind, Result};
use crate::feedback::FeedbackChannel;
use crate::platform::{ClipboardImage, PlatformApi, SharePayload};
use crate::rendering::RenderHandle;
use crate::serializer::{self, ImageFormat, SerializedImage};

/// Base name for downloaded files; the extension follows the format.
pub const DOWNLOAD_BASENAME: &str = "qr-code";
/// Attachment name used when sharing.
pub const SHARE_FILE_NAME: &str = "qr-code.png";
/// Title passed to the share target.
pub const SHARE_TITLE: &str = "QR Code";
/// Accompanying text passed to the share target.
pub const SHARE_TEXT: &str = "Check out this QR code!";

/// Which export operation an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportAction {
    Download(ImageFormat),
    Share,
    Copy,
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportAction::Download(format) => {
                write!(f, "download as {}", format.extension().to_uppercase())
            }
            ExportAction::Share => write!(f, "share"),
            ExportAction::Copy => write!(f, "copy to clipboard"),
        }
    }
}

/// Terminal result of one dispatcher operation. Forwarded once to the
/// feedback channel, never stored.
#[derive(Debug, Clone, Serialize)]
pub enum Outcome {
    Success { action: ExportAction },
    Failure { action: ExportAction, kind: FailureKind },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn action(&self) -> ExportAction {
        match self {
            Outcome::Success { action } | Outcome::Failure { action, .. } => *action,
        }
    }

    /// The failure kind, if this outcome is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Routes serialized captures to the configured platform sinks.
pub struct Dispatcher {
    handle: RenderHandle,
    platform: Arc<dyn PlatformApi>,
    feedback: Arc<dyn FeedbackChannel>,
}

impl Dispatcher {
    pub fn new(
        handle: RenderHandle,
        platform: Arc<dyn PlatformApi>,
        feedback: Arc<dyn FeedbackChannel>,
    ) -> Self {
        Self {
            handle,
            platform,
            feedback,
        }
    }

    /// Serialize the current frame and initiate a file save of
    /// `qr-code.<ext>`. Succeeds once the save is initiated; filesystem
    /// completion is not awaited.
    pub async fn download(&self, format: ImageFormat) -> Outcome {
        let result = self.try_download(format).await;
        self.conclude(ExportAction::Download(format), result)
    }

    /// Serialize the current frame as a raster image and hand it to the
    /// platform share target. Fails immediately with an unsupported outcome
    /// when the platform exposes none; sharing is never emulated through a
    /// download.
    pub async fn share(&self) -> Outcome {
        let result = self.try_share().await;
        self.conclude(ExportAction::Share, result)
    }

    /// Serialize the current frame as a raster image, decode it back into a
    /// pixel buffer, and write it to the clipboard as one atomic entry.
    pub async fn copy(&self) -> Outcome {
        let result = self.try_copy().await;
        self.conclude(ExportAction::Copy, result)
    }

    async fn try_download(&self, format: ImageFormat) -> Result<()> {
        let captured = serializer::serialize(&self.handle, format)
            .await
            .map_err(|e| Error::Download(e.to_string()))?;
        let file_name = format!("{}.{}", DOWNLOAD_BASENAME, format.extension());
        let saver = self.platform.file_saver();
        let bytes = captured.into_bytes();
        task::spawn_blocking(move || saver.save(&file_name, &bytes))
            .await
            .map_err(|e| Error::Download(format!("save task failed: {}", e)))?
    }

    async fn try_share(&self) -> Result<()> {
        // Probe before any capture work: an absent capability is an
        // immediate unsupported outcome, not a late surprise.
        let target = self
            .platform
            .share_target()
            .ok_or_else(|| Error::Unsupported("platform exposes no share target".to_string()))?;
        let captured = serializer::serialize(&self.handle, ImageFormat::Raster).await?;
        let payload = SharePayload {
            file_name: SHARE_FILE_NAME.to_string(),
            media_type: captured.media_type().to_string(),
            bytes: captured.into_bytes(),
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
        };
        // The target may stay blocked while the user interacts with the
        // share UI; no timeout is applied.
        task::spawn_blocking(move || target.share(payload))
            .await
            .map_err(|e| Error::Unsupported(format!("share task failed: {}", e)))?
    }

    async fn try_copy(&self) -> Result<()> {
        let clipboard = self
            .platform
            .clipboard()
            .ok_or_else(|| Error::Unsupported("platform exposes no image clipboard".to_string()))?;
        let captured = serializer::serialize(&self.handle, ImageFormat::Raster).await?;
        let (width, height, png) = match captured {
            SerializedImage::Raster { width, height, png } => (width, height, png),
            SerializedImage::Vector { .. } => {
                return Err(Error::Clipboard("raster capture produced markup".to_string()))
            }
        };
        task::spawn_blocking(move || {
            let decoded = image::load_from_memory(&png)
                .map_err(|e| Error::Clipboard(format!("PNG decode failed: {}", e)))?
                .to_rgba8();
            if decoded.dimensions() != (width, height) {
                return Err(Error::Clipboard(format!(
                    "decoded {}x{}, expected {}x{}",
                    decoded.width(),
                    decoded.height(),
                    width,
                    height
                )));
            }
            clipboard.write_image(ClipboardImage {
                width,
                height,
                rgba: decoded.into_raw(),
            })
        })
        .await
        .map_err(|e| Error::Clipboard(format!("clipboard task failed: {}", e)))?
    }

    fn conclude(&self, action: ExportAction, result: Result<()>) -> Outcome {
        let outcome = match result {
            Ok(()) => Outcome::Success { action },
            Err(e) => {
                log::warn!("{} failed: {}", action, e);
                Outcome::Failure {
                    action,
                    kind: e.failure_kind(),
                }
            }
        };
        self.feedback.notify(&outcome);
        outcome
    }
}
