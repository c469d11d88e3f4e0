// Character encodings for CSV tables

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::IoError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A resolved encoding label. `utf-8-sig` is UTF-8 that writes a BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
    bom: bool,
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self { encoding: UTF_8, bom: true }
    }
}

impl TextEncoding {
    /// Resolve a WHATWG label (`utf-8`, `windows-1252`, `latin1`, ...) or the
    /// `utf-8-sig` alias. Underscores are accepted in place of hyphens.
    pub fn from_label(label: &str) -> Result<Self, IoError> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");

        if let Some(base) = normalized.strip_suffix("-sig") {
            let encoding = Encoding::for_label(base.as_bytes())
                .filter(|e| *e == UTF_8)
                .ok_or_else(|| IoError::Encoding(format!("'{label}': -sig only applies to utf-8")))?;
            return Ok(Self { encoding, bom: true });
        }

        let encoding = Encoding::for_label(normalized.as_bytes())
            .ok_or_else(|| IoError::Encoding(format!("unknown encoding label '{label}'")))?;
        Ok(Self { encoding, bom: false })
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn writes_bom(&self) -> bool {
        self.bom
    }

    /// Decode bytes, honoring any BOM present. Invalid UTF-8 falls back to
    /// Windows-1252 (common for Excel-exported CSVs).
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors && used == UTF_8 {
            log::warn!("input is not valid UTF-8, decoding as windows-1252");
            let (fallback, _, _) = WINDOWS_1252.decode(bytes);
            return fallback.into_owned();
        }
        if had_errors {
            log::warn!("input contains bytes invalid in {}, replaced", used.name());
        }
        text.into_owned()
    }

    /// Encode text for writing, prefixing a BOM for `utf-8-sig`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            log::warn!("some characters are not representable in {}", self.encoding.name());
        }
        let mut out = Vec::with_capacity(bytes.len() + UTF8_BOM.len());
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        out.extend_from_slice(&bytes);
        out
    }

    /// Read a whole file and decode it.
    pub fn read_file(&self, path: &Path) -> Result<String, IoError> {
        if !path.exists() {
            return Err(IoError::MissingInput(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|e| IoError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(self.decode(&bytes))
    }
}
