// Snapshot the rendered heat buffer as a PNG.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::Error;

pub const DEFAULT_FILE_NAME: &str = "heatmap.png";

/// Encode a row-major RGBA buffer as PNG bytes. Transparency is kept.
pub fn encode_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>, Error> {
    let image = RgbaImage::from_raw(width as u32, height as u32, rgba.to_vec())
        .ok_or(Error::InvalidDimensions { width, height })?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write already-encoded image bytes to disk.
pub fn save(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    std::fs::write(path, bytes)?;
    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_decodable_png() {
        let mut rgba = vec![0u8; 3 * 2 * 4];
        rgba[4..8].copy_from_slice(&[255, 0, 0, 255]);
        let bytes = encode_png(3, 2, &rgba).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(0, 1).0[3], 0);
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            encode_png(4, 4, &[0u8; 10]),
            Err(Error::InvalidDimensions { width: 4, height: 4 })
        ));
    }

    #[test]
    fn save_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("heatcheck-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(DEFAULT_FILE_NAME);
        save(&path, b"abc").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
