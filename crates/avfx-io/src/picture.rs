//! Image decode into [`Frame`]s and PNG encode out of them.

use std::path::{Path, PathBuf};

use avfx_visual::Frame;
use image::imageops::FilterType;

use crate::Result;

/// Decode encoded image bytes and scale them to exactly `width`x`height`.
///
/// The aspect ratio is not preserved; the pipeline works on fixed square
/// frames and the picture is stretched to fill them.
pub fn decode_frame(bytes: &[u8], width: u32, height: u32) -> Result<Frame> {
    let decoded = image::load_from_memory(bytes)?;
    scale_into_frame(decoded, width, height)
}

/// Read an image file and scale it to exactly `width`x`height`.
pub fn load_frame(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Frame> {
    let bytes = std::fs::read(path)?;
    decode_frame(&bytes, width, height)
}

fn scale_into_frame(decoded: image::DynamicImage, width: u32, height: u32) -> Result<Frame> {
    let rgba = if decoded.width() == width && decoded.height() == height {
        decoded.to_rgba8()
    } else {
        decoded
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgba8()
    };
    let (w, h) = rgba.dimensions();
    Ok(Frame::from_rgba(w, h, rgba.into_raw())?)
}

/// Encode `frame` as an RGBA PNG at `path`.
pub fn save_png(path: impl AsRef<Path>, frame: &Frame) -> Result<()> {
    image::save_buffer_with_format(
        path,
        frame.pixels(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Write `frames` as `frame_00000.png`, `frame_00001.png`, ... into `dir`,
/// creating it if needed. Returns the written paths in order.
pub fn write_frame_sequence<I>(dir: impl AsRef<Path>, frames: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = Frame>,
{
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (index, frame) in frames.into_iter().enumerate() {
        let path = dir.join(frame_file_name(index));
        save_png(&path, &frame)?;
        written.push(path);
    }
    tracing::debug!(count = written.len(), dir = %dir.display(), "frame sequence written");
    Ok(written)
}

/// File name of the `index`th exported frame.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{index:05}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let pixels: Vec<u8> = rgba.repeat((width * height) as usize);
        let img = image::RgbaImage::from_raw(width, height, pixels).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_scales_to_requested_size() {
        let bytes = encoded_png(3, 5, [10, 20, 30, 255]);
        let frame = decode_frame(&bytes, 8, 8).unwrap();
        assert_eq!(frame.size(), (8, 8));
        // uniform input survives any resampling filter
        assert_eq!(frame.pixel(4, 4), [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_same_size_is_exact() {
        let bytes = encoded_png(4, 4, [1, 2, 3, 4]);
        let frame = decode_frame(&bytes, 4, 4).unwrap();
        assert_eq!(frame, Frame::filled(4, 4, [1, 2, 3, 4]));
    }

    #[test]
    fn test_garbage_bytes_are_an_image_error() {
        let err = decode_frame(b"definitely not a png", 4, 4).unwrap_err();
        assert!(matches!(err, crate::Error::Image(_)), "{err}");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let frame = Frame::filled(6, 2, [200, 100, 50, 255]);
        save_png(&path, &frame).unwrap();
        assert_eq!(load_frame(&path, 6, 2).unwrap(), frame);
    }

    #[test]
    fn test_sequence_names() {
        let dir = tempfile::tempdir().unwrap();
        let frames = (0..3).map(|i| Frame::filled(2, 2, [i * 10, 0, 0, 255]));
        let written = write_frame_sequence(dir.path().join("seq"), frames).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written[2].ends_with("frame_00002.png"));
        assert!(written.iter().all(|p| p.exists()));
    }
}
