use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{TextreelError, TextreelResult};

/// Where a loaded face came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// The configured font file.
    File(PathBuf),
    /// A system face picked because the configured file could not be used.
    SystemFallback {
        /// Family name of the substituted face.
        family: String,
    },
}

/// Raw font bytes plus face index, shared by the shaper and the rasterizer.
#[derive(Clone)]
pub struct FontFace {
    /// Font file contents.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file (0 for plain TTF/OTF).
    pub index: u32,
    /// Provenance, for diagnostics.
    pub origin: FontOrigin,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("origin", &self.origin)
            .finish()
    }
}

impl FontFace {
    /// Read a font file from disk.
    pub fn from_path(path: &Path) -> TextreelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            TextreelError::resource(format!("read font '{}': {e}", path.display()))
        })?;
        if bytes.is_empty() {
            return Err(TextreelError::resource(format!(
                "font '{}' is empty",
                path.display()
            )));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
            origin: FontOrigin::File(path.to_path_buf()),
        })
    }

    /// Pick a sans-serif face from the system font database.
    pub fn system_fallback() -> TextreelResult<Self> {
        use usvg::fontdb;

        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let families = [
            fontdb::Family::SansSerif,
            fontdb::Family::Serif,
            fontdb::Family::Monospace,
        ];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| TextreelError::resource("no system fonts available for fallback"))?;

        let family = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_owned());
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| {
                TextreelError::resource(format!("system font '{family}' has no readable data"))
            })?;

        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            origin: FontOrigin::SystemFallback { family },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
