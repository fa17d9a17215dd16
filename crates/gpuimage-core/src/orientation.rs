//! Row order of captured frames.

use image::{imageops, ImageBuffer, Rgba};

use crate::error::CaptureError;

/// Mirror a tightly packed RGBA8 buffer vertically, in place.
///
/// Turns the bottom-to-top rows a capture produces into top-to-bottom rows.
/// Bytes past `width * height * 4` are left alone.
pub fn flip_rows(pixels: &mut [u8], width: u32, height: u32) -> Result<(), CaptureError> {
    let required = width as usize * height as usize * 4;
    let len = pixels.len();
    let mut img = ImageBuffer::<Rgba<u8>, &mut [u8]>::from_raw(width, height, pixels)
        .ok_or(CaptureError::BufferTooSmall { len, required })?;
    imageops::flip_vertical_in_place(&mut img);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_swap_end_for_end() {
        // 1 pixel wide, 3 rows tall.
        let mut pixels = vec![
            0, 0, 0, 0, //
            1, 1, 1, 1, //
            2, 2, 2, 2, //
        ];
        flip_rows(&mut pixels, 1, 3).unwrap();
        assert_eq!(pixels, vec![2, 2, 2, 2, 1, 1, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn flipping_twice_restores_the_frame() {
        let original: Vec<u8> = (0..2 * 4 * 4).map(|b| b as u8).collect();
        let mut pixels = original.clone();
        flip_rows(&mut pixels, 2, 4).unwrap();
        assert_ne!(pixels, original);
        flip_rows(&mut pixels, 2, 4).unwrap();
        assert_eq!(pixels, original);
    }

    #[test]
    fn short_buffer_is_an_error() {
        let mut pixels = vec![0u8; 7];
        let err = flip_rows(&mut pixels, 1, 2).unwrap_err();
        assert_eq!(err, CaptureError::BufferTooSmall { len: 7, required: 8 });
    }
}
