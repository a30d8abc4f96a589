//! Adapter over the external symbol encoding engine.
//!
//! The engine is consumed through its public contract only: deterministic
//! output for identical inputs, and a square matrix of dark/light modules
//! addressed by `get(x, y)`. The engine's own matrix is copied into an owned
//! [`ModuleGrid`] so frames stay readable after the engine value is dropped.

use qrcodegen::{QrCode, QrCodeEcc};

use crate::error::{Error, Result};
use crate::EcLevel;

/// Label encoded in place of empty content so the surface always has a
/// capturable symbol.
pub const EMPTY_CONTENT_LABEL: &str = "Enter Text";

/// An owned copy of the engine's module matrix.
///
/// Coordinates outside the matrix read as light modules, mirroring the
/// engine's `get_module` contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: i32,
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// Side length of the matrix in modules.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether the module at `(x, y)` is dark. Out-of-bounds reads are light.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return false;
        }
        self.modules[(y * self.size + x) as usize]
    }

    fn from_engine(qr: &QrCode) -> Self {
        let size = qr.size();
        let mut modules = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                modules.push(qr.get_module(x, y));
            }
        }
        Self { size, modules }
    }
}

impl From<EcLevel> for QrCodeEcc {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => QrCodeEcc::Low,
            EcLevel::Medium => QrCodeEcc::Medium,
            EcLevel::Quartile => QrCodeEcc::Quartile,
            EcLevel::High => QrCodeEcc::High,
        }
    }
}

/// Encode `content` at the requested error correction level.
///
/// Empty content is a valid degenerate input: the placeholder label is
/// encoded instead so downstream capture never sees an empty symbol.
pub fn encode(content: &str, level: EcLevel) -> Result<ModuleGrid> {
    let text = if content.is_empty() {
        EMPTY_CONTENT_LABEL
    } else {
        content
    };
    let qr = QrCode::encode_text(text, level.into())
        .map_err(|e| Error::Encode(format!("content does not fit a symbol: {}", e)))?;
    Ok(ModuleGrid::from_engine(&qr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_deterministic() {
        let a = encode("https://example.com", EcLevel::Low).unwrap();
        let b = encode("https://example.com", EcLevel::Low).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_content_encodes_placeholder() {
        let empty = encode("", EcLevel::Low).unwrap();
        let label = encode(EMPTY_CONTENT_LABEL, EcLevel::Low).unwrap();
        assert_eq!(empty, label);
    }

    #[test]
    fn level_changes_module_pattern() {
        let low = encode("hello", EcLevel::Low).unwrap();
        let high = encode("hello", EcLevel::High).unwrap();
        assert_ne!(low, high);
    }

    #[test]
    fn out_of_bounds_reads_are_light() {
        let grid = encode("x", EcLevel::Low).unwrap();
        assert!(!grid.get(-1, 0));
        assert!(!grid.get(0, grid.size()));
    }
}
