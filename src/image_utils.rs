use image::{imageops::FilterType, ImageReader};
use ndarray::{Array, Ix4};
use std::io::Cursor;
use thiserror::Error;

pub const INPUT_SIZE: u32 = 224;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Image data is empty")]
    Empty,
    #[error("Unrecognized image format: {0}")]
    Format(std::io::Error),
    #[error("Error decoding image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decodes an uploaded image into a `[1, 224, 224, 3]` tensor with channel
/// values in `[0, 1]`.
pub fn transform_image(image_data: &[u8]) -> Result<Array<f32, Ix4>, DecodeError> {
    if image_data.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image_reader = ImageReader::new(Cursor::new(image_data))
        .with_guessed_format()
        .map_err(DecodeError::Format)?;

    let original_img = image_reader.decode()?;
    let img = original_img
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest)
        .into_rgb8();

    let size = INPUT_SIZE as usize;
    let mut input = Array::zeros((1, size, size, 3));
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let (x, y) = (x as usize, y as usize);
        input[[0, y, x, 0]] = (r as f32) / 255.;
        input[[0, y, x, 1]] = (g as f32) / 255.;
        input[[0, y, x, 2]] = (b as f32) / 255.;
    }

    Ok(input)
}
