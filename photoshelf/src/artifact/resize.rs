//! Blocking image work behind the artifact cache.

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};

use super::error::{ArtifactError, ArtifactResult};

/// Read the pixel width of `source` from its header, without decoding
/// the full image.
pub(crate) fn probe_width(source: &Path) -> ArtifactResult<u32> {
    let (width, _height) = image::image_dimensions(source).map_err(|e| ArtifactError::Decode {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(width)
}

/// Height that keeps the aspect ratio at `target_width`, rounded to
/// the nearest pixel and never below one.
pub(crate) fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (target_width as f64) * (height as f64) / (width as f64);
    (scaled.round() as u32).max(1)
}

/// Decode `source`, scale it to `target_width`, and return the result
/// as encoded JPEG bytes.
///
/// Runs entirely on the calling thread; the cache dispatches it to a
/// blocking worker.
pub(crate) fn render_thumbnail(source: &Path, target_width: u32) -> ArtifactResult<Vec<u8>> {
    let decode_error = |reason: String| ArtifactError::Decode {
        path: source.to_path_buf(),
        reason,
    };

    let decoded = ImageReader::open(source)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))?;

    let height = scaled_height(decoded.width(), decoded.height(), target_width);
    let resized = decoded.resize_exact(target_width, height, FilterType::CatmullRom);

    // JPEG has no alpha channel; flatten before encoding.
    let mut bytes = Cursor::new(Vec::new());
    resized
        .into_rgb8()
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .map_err(|e| ArtifactError::Encode {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_render_scales_to_target_width_as_jpeg() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("photo.png");
        write_png(&source, 800, 600);

        let bytes = render_thumbnail(&source, 200).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let thumb = image::load_from_memory(&bytes).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (200, 150));
    }

    #[test]
    fn test_scaled_height_rounds_to_nearest_pixel() {
        assert_eq!(scaled_height(800, 600, 200), 150);
        // 200 * 200 / 300 = 133.33 rounds down
        assert_eq!(scaled_height(300, 200, 200), 133);
        // 200 * 601 / 800 = 150.25 rounds down
        assert_eq!(scaled_height(800, 601, 200), 150);
        // 200 * 603 / 800 = 150.75 rounds up
        assert_eq!(scaled_height(800, 603, 200), 151);
        assert_eq!(scaled_height(10_000, 1, 200), 1);
    }

    #[test]
    fn test_render_rejects_non_image_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes.txt");
        fs::write(&source, "not an image").unwrap();

        let result = render_thumbnail(&source, 200);
        assert!(matches!(result, Err(ArtifactError::Decode { .. })));
    }

    #[test]
    fn test_probe_width_reads_header() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("wide.png");
        write_png(&source, 640, 80);

        assert_eq!(probe_width(&source).unwrap(), 640);
    }

    #[test]
    fn test_probe_width_rejects_non_image() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.bin");
        fs::write(&source, [0u8; 16]).unwrap();

        assert!(matches!(
            probe_width(&source),
            Err(ArtifactError::Decode { .. })
        ));
    }
}
