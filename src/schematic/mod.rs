//! Structure document loading.
//!
//! Two source encodings produce the same in-memory [`Schematic`]: a binary
//! tagged container (optionally gzip-compressed) and a textual dump of the
//! same fields. Loading is strict: a missing field, an unmapped block id,
//! or a size mismatch aborts the load with no recovery.

pub mod binary;
pub mod nbt;
pub mod text;

pub use binary::load_from_bytes;
pub use text::parse_text_dump;

use crate::error::Result;
use crate::types::Schematic;
use std::path::Path;

/// Load a schematic from a file path.
///
/// Gzip containers are recognized by their magic; UTF-8 data carrying a
/// `Width:` label is parsed as a textual dump; anything else goes through
/// the binary reader. A leading compound-tag byte alone cannot distinguish
/// the encodings, since it doubles as a newline.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Schematic> {
    let data = std::fs::read(path)?;
    load_sniffed(&data)
}

/// Load a schematic from raw bytes, sniffing the encoding.
pub fn load_sniffed(data: &[u8]) -> Result<Schematic> {
    if data.starts_with(&[0x1f, 0x8b]) {
        return binary::load_from_bytes(data);
    }
    match std::str::from_utf8(data) {
        Ok(text) if text.contains("Width:") => text::parse_text_dump(text),
        _ => binary::load_from_bytes(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sniff_text_dump() {
        let text = r#"
            Width: 1S
            Length: 1S
            Height: 1S
            Palette: { "minecraft:air": 0 }
            BlockData: bytes(0)
        "#;
        let doc = load_sniffed(text.as_bytes()).unwrap();
        assert_eq!(doc.volume(), 1);
    }

    #[test]
    fn test_sniff_uncompressed_binary() {
        use super::nbt::test_support::*;

        let mut data = Vec::new();
        open_compound(&mut data, "");
        short_field(&mut data, "Width", 1);
        short_field(&mut data, "Length", 1);
        short_field(&mut data, "Height", 1);
        open_compound(&mut data, "Palette");
        int_field(&mut data, "minecraft:air", 0);
        close_compound(&mut data);
        byte_array_field(&mut data, "BlockData", &[0]);
        close_compound(&mut data);

        let doc = load_sniffed(&data).unwrap();
        assert_eq!(doc.volume(), 1);
    }

    #[test]
    fn test_load_from_path() {
        let text = r#"
            Width: 2S
            Length: 1S
            Height: 1S
            Palette: { "minecraft:air": 0, "minecraft:stone": 1 }
            BlockData: bytes(0, 1)
        "#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let doc = load_from_path(file.path()).unwrap();
        assert_eq!(doc.width, 2);
        assert_eq!(doc.palette.len(), 2);
    }
}
