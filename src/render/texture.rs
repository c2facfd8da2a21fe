use std::{fs::File, io::{BufReader, Read}, path::Path};

use crate::math::color::Color;

use super::canvas::{Canvas, ImageError};

/// Decoded RGB image sampled with `(u, v)` coordinates in `[0, 1]`,
/// `v = 1` being the top row.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Texture {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Self {
        assert!(width > 0 && height > 0, "texture must not be empty");
        assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_canvas(canvas: &Canvas) -> Self {
        let pixels = (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .map(|(x, y)| {
                let [r, g, b] = canvas.pixel_at(x, y);
                Color::from_u8(r, g, b)
            })
            .collect();
        Self::new(canvas.width(), canvas.height(), pixels)
    }

    pub fn load_png(path: &Path) -> Result<Self, ImageError> {
        let file = File::open(path)?;
        Self::decode_png(BufReader::new(file))
    }

    pub fn decode_png<R: Read>(reader: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let bytes = &buf[..info.buffer_size()];

        let channels = match info.color_type {
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            other => return Err(ImageError::UnsupportedColorType(other)),
        };

        let pixels = bytes
            .chunks_exact(channels)
            .map(|px| match channels {
                1 | 2 => Color::from_u8(px[0], px[0], px[0]),
                _ => Color::from_u8(px[0], px[1], px[2]),
            })
            .collect();

        Ok(Self::new(info.width as usize, info.height as usize, pixels))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sample(&self, u: f64, v: f64) -> Color {
        let x = ((u.clamp(0., 1.) * self.width as f64) as usize).min(self.width - 1);
        let y = (((1. - v.clamp(0., 1.)) * self.height as f64) as usize).min(self.height - 1);
        self.pixels[y * self.width + x]
    }
}
