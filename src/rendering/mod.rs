//! Rendering surface: deterministic symbol paints published as frames.
//!
//! The surface maps a configuration snapshot to an immutable [`Frame`] and
//! publishes it wholesale through a watch channel. Capture goes through a
//! [`RenderHandle`]; a capture taken before the first paint is an error, and
//! a capture taken just before a re-render keeps reading its own (stale)
//! frame rather than tearing.

pub mod raster;
pub mod vector;

use std::sync::Arc;

use tokio::sync::watch;

use crate::encode::{self, ModuleGrid};
use crate::error::{Error, Result};
use crate::QrConfig;

/// Width of the quiet border in modules when the margin is enabled.
pub const QUIET_ZONE: i32 = 4;

/// One completed paint: the configuration snapshot it was rendered from,
/// the encoded module matrix, and a generation counter that identifies
/// stale captures.
#[derive(Debug)]
pub struct Frame {
    pub config: QrConfig,
    pub modules: ModuleGrid,
    pub generation: u64,
}

impl Frame {
    /// Quiet border width in modules for this frame (0 when margin is off).
    pub fn quiet_zone(&self) -> i32 {
        if self.config.include_margin {
            QUIET_ZONE
        } else {
            0
        }
    }

    /// Side length of the symbol plus quiet border, in modules.
    pub fn grid_dimension(&self) -> i32 {
        self.modules.size() + 2 * self.quiet_zone()
    }

    /// Whether the cell at grid coordinates `(x, y)` (quiet border included)
    /// is a dark module.
    pub fn module_at(&self, x: i32, y: i32) -> bool {
        let q = self.quiet_zone();
        self.modules.get(x - q, y - q)
    }
}

/// The live rendering surface. Owns frame production; re-renders
/// synchronously on every configuration replacement.
pub struct Surface {
    tx: watch::Sender<Option<Arc<Frame>>>,
    generation: u64,
}

impl Surface {
    /// Create an unpainted surface. Captures fail until the first `apply`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx, generation: 0 }
    }

    /// The capture handle for this surface. Handles are cheap clones of the
    /// same subscription; all of them observe the latest frame.
    pub fn handle(&self) -> RenderHandle {
        RenderHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Render `config` and publish the resulting frame.
    ///
    /// Encoding failure (content beyond symbol capacity) leaves the previous
    /// frame in place so the handle stays capturable.
    pub fn apply(&mut self, config: &QrConfig) -> Result<()> {
        let modules = encode::encode(&config.content, config.level)?;
        self.generation += 1;
        let frame = Frame {
            config: config.clone(),
            modules,
            generation: self.generation,
        };
        log::debug!(
            "painted frame generation={} size={} modules={}",
            frame.generation,
            frame.config.size,
            frame.modules.size()
        );
        self.tx.send_replace(Some(Arc::new(frame)));
        Ok(())
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque capture capability over the live surface.
#[derive(Clone)]
pub struct RenderHandle {
    rx: watch::Receiver<Option<Arc<Frame>>>,
}

impl RenderHandle {
    /// The latest completed frame.
    ///
    /// Returns [`Error::Capture`] when the surface has never painted. The
    /// returned `Arc` stays valid if the surface repaints afterwards; callers
    /// that need freshness re-snapshot per operation.
    pub fn snapshot(&self) -> Result<Arc<Frame>> {
        self.rx
            .borrow()
            .clone()
            .ok_or_else(|| Error::Capture("surface has not painted yet".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_before_first_paint_fails() {
        let surface = Surface::new();
        let handle = surface.handle();
        assert!(matches!(handle.snapshot(), Err(Error::Capture(_))));
    }

    #[test]
    fn apply_publishes_a_frame() {
        let mut surface = Surface::new();
        let handle = surface.handle();
        surface.apply(&QrConfig::default()).unwrap();
        let frame = handle.snapshot().unwrap();
        assert_eq!(frame.generation, 1);
        assert_eq!(frame.config.size, 256);
    }

    #[test]
    fn repaint_bumps_generation_and_keeps_old_snapshot_readable() {
        let mut surface = Surface::new();
        let handle = surface.handle();

        let mut config = QrConfig::default();
        surface.apply(&config).unwrap();
        let old = handle.snapshot().unwrap();

        config.set_content("after");
        surface.apply(&config).unwrap();
        let new = handle.snapshot().unwrap();

        assert_eq!(old.generation, 1);
        assert_eq!(new.generation, 2);
        assert_eq!(old.config.content, "");
        assert_eq!(new.config.content, "after");
    }

    #[test]
    fn margin_widens_the_grid() {
        let mut config = QrConfig::default();
        config.set_content("margin test");

        let mut surface = Surface::new();
        surface.apply(&config).unwrap();
        let with_margin = surface.handle().snapshot().unwrap();

        config.set_include_margin(false);
        surface.apply(&config).unwrap();
        let without_margin = surface.handle().snapshot().unwrap();

        assert_eq!(
            with_margin.grid_dimension(),
            without_margin.grid_dimension() + 2 * QUIET_ZONE
        );
    }

    #[test]
    fn oversized_content_keeps_previous_frame() {
        let mut surface = Surface::new();
        let handle = surface.handle();

        let mut config = QrConfig::default();
        surface.apply(&config).unwrap();

        config.content = "x".repeat(8000);
        assert!(surface.apply(&config).is_err());

        let frame = handle.snapshot().unwrap();
        assert_eq!(frame.generation, 1);
    }
}
