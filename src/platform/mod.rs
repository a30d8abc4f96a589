//! Platform capability surface: file save, share target, clipboard
//!
//! This module contains the traits the export dispatcher consumes and the
//! bundled implementations. Share and clipboard are optional platform
//! features; availability is probed through the composite [`PlatformApi`]
//! as a typed `Option`, so the unsupported path is an ordinary branch.

pub mod clipboard;
pub mod file_save;
pub mod share;

use std::path::PathBuf;
use std::sync::Arc;

pub use clipboard::{ClipboardImage, ClipboardWriter, MemoryClipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use file_save::{DirectoryFileSaver, FileSaver, MemoryFileSaver, NullFileSaver};
pub use share::{MemoryShareTarget, SharePayload, ShareTarget};

/// Composite capability accessor handed to the dispatcher.
///
/// File saving is always present; share and clipboard return `None` when
/// the platform does not expose them.
pub trait PlatformApi: Send + Sync {
    fn file_saver(&self) -> Arc<dyn FileSaver>;
    fn share_target(&self) -> Option<Arc<dyn ShareTarget>>;
    fn clipboard(&self) -> Option<Arc<dyn ClipboardWriter>>;
}

/// A platform with no optional capabilities and a discarding file saver.
/// Safe default for tests and embedders that wire their own surfaces.
pub struct NoopPlatform;

impl NoopPlatform {
    pub fn new() -> Self {
        NoopPlatform
    }
}

impl Default for NoopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformApi for NoopPlatform {
    fn file_saver(&self) -> Arc<dyn FileSaver> {
        Arc::new(NullFileSaver)
    }

    fn share_target(&self) -> Option<Arc<dyn ShareTarget>> {
        None
    }

    fn clipboard(&self) -> Option<Arc<dyn ClipboardWriter>> {
        None
    }
}

/// All three capabilities backed by in-memory recorders. Tests assert on
/// what each sink received; the `without_*` builders turn a capability off
/// to exercise the unsupported path.
pub struct MemoryPlatform {
    saver: Arc<MemoryFileSaver>,
    share: Option<Arc<MemoryShareTarget>>,
    clip: Option<Arc<MemoryClipboard>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self {
            saver: Arc::new(MemoryFileSaver::new()),
            share: Some(Arc::new(MemoryShareTarget::new())),
            clip: Some(Arc::new(MemoryClipboard::new())),
        }
    }

    pub fn without_share(mut self) -> Self {
        self.share = None;
        self
    }

    pub fn without_clipboard(mut self) -> Self {
        self.clip = None;
        self
    }

    /// Files saved so far, as `(file_name, bytes)` pairs.
    pub fn saved_files(&self) -> Vec<(String, Vec<u8>)> {
        self.saver.saved()
    }

    /// Payloads handed to the share target so far.
    pub fn shared_payloads(&self) -> Vec<SharePayload> {
        self.share.as_ref().map(|s| s.shared()).unwrap_or_default()
    }

    /// Images written to the clipboard so far.
    pub fn clipboard_images(&self) -> Vec<ClipboardImage> {
        self.clip.as_ref().map(|c| c.images()).unwrap_or_default()
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformApi for MemoryPlatform {
    fn file_saver(&self) -> Arc<dyn FileSaver> {
        self.saver.clone()
    }

    fn share_target(&self) -> Option<Arc<dyn ShareTarget>> {
        self.share.clone().map(|s| s as Arc<dyn ShareTarget>)
    }

    fn clipboard(&self) -> Option<Arc<dyn ClipboardWriter>> {
        self.clip.clone().map(|c| c as Arc<dyn ClipboardWriter>)
    }
}

/// The host machine's capabilities: saves into the user's download
/// directory, writes the system clipboard when the `clipboard` feature is
/// enabled, and shares only through an injected target (no OS share sheet
/// backend is bundled).
pub struct NativePlatform {
    saver: Arc<dyn FileSaver>,
    share: Option<Arc<dyn ShareTarget>>,
    clip: Option<Arc<dyn ClipboardWriter>>,
}

impl NativePlatform {
    pub fn new() -> Self {
        #[cfg(feature = "clipboard")]
        let clip: Option<Arc<dyn ClipboardWriter>> = Some(Arc::new(SystemClipboard::new()));
        #[cfg(not(feature = "clipboard"))]
        let clip: Option<Arc<dyn ClipboardWriter>> = None;

        Self {
            saver: Arc::new(DirectoryFileSaver::user_downloads()),
            share: None,
            clip,
        }
    }

    /// Save downloads into `dir` instead of the user's download directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.saver = Arc::new(DirectoryFileSaver::new(dir));
        self
    }

    /// Provide a share target (host shells that own a share UI).
    pub fn with_share_target(mut self, target: Arc<dyn ShareTarget>) -> Self {
        self.share = Some(target);
        self
    }

    /// Replace the clipboard capability.
    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        self.clip = Some(clipboard);
        self
    }
}

impl Default for NativePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformApi for NativePlatform {
    fn file_saver(&self) -> Arc<dyn FileSaver> {
        self.saver.clone()
    }

    fn share_target(&self) -> Option<Arc<dyn ShareTarget>> {
        self.share.clone()
    }

    fn clipboard(&self) -> Option<Arc<dyn ClipboardWriter>> {
        self.clip.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_platform_has_no_optional_capabilities() {
        let p = NoopPlatform::new();
        assert!(p.share_target().is_none());
        assert!(p.clipboard().is_none());
        p.file_saver().save("x.png", b"bytes").unwrap();
    }

    #[test]
    fn memory_platform_probes_and_records() {
        let p = MemoryPlatform::new();
        assert!(p.share_target().is_some());
        assert!(p.clipboard().is_some());

        p.file_saver().save("qr-code.png", b"png").unwrap();
        assert_eq!(p.saved_files(), vec![("qr-code.png".to_string(), b"png".to_vec())]);
    }

    #[test]
    fn memory_platform_capabilities_can_be_disabled() {
        let p = MemoryPlatform::new().without_share().without_clipboard();
        assert!(p.share_target().is_none());
        assert!(p.clipboard().is_none());
        assert!(p.shared_payloads().is_empty());
        assert!(p.clipboard_images().is_empty());
    }
}
