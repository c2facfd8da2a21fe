use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use thiserror::Error;

use crate::math::color::Color;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),
    #[error("PNG decoding failed: {0}")]
    PngDecoding(#[from] png::DecodingError),
    #[error("unsupported PNG color type {0:?}")]
    UnsupportedColorType(png::ColorType),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Ppm,
    Png,
    Bmp,
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Ppm => write!(f, "ppm"),
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Bmp => write!(f, "bmp"),
        }
    }
}

/// Pixel buffer of 8-bit RGB triples, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Canvas {
    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.as_scaled_values(); height * width],
        }
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, Color::black())
    }

    fn index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
    pub fn pixel_at(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }
    pub fn write_pixel(&mut self, x: usize, y: usize, new_color: Color) {
        let id = self.index(x, y);
        self.pixels[id] = new_color.as_scaled_values();
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.as_scaled_values());
    }

    pub fn as_u8_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    pub fn save_to_file(&self, path: &Path, format: ImageFormat) -> Result<(), ImageError> {
        let mut writer = BufWriter::new(File::create(path)?);
        match format {
            ImageFormat::Ppm => self.write_ppm(&mut writer)?,
            ImageFormat::Png => self.write_png(&mut writer)?,
            ImageFormat::Bmp => self.write_bmp(&mut writer)?,
        }
        writer.flush()?;
        Ok(())
    }
}

/// ppm
impl Canvas {
    const MAX_LINE_LEN: usize = 70;

    fn ppm_header(&self) -> String {
        format!("P3\n{} {}\n255\n", self.width, self.height)
    }

    fn ppm_data(&self) -> String {
        let mut line_len = 0;
        let last_id = (self.width * self.height).saturating_sub(1);

        self.pixels
            .iter()
            .enumerate()
            .map(|(id, rgb)| {
                rgb.iter()
                    .enumerate()
                    .map(|(j, val)| {
                        let val_str = val.to_string();
                        let sep = if (id % self.width == 0 && j == 0)
                            || line_len + val_str.len() + 1 > Self::MAX_LINE_LEN
                        {
                            line_len = 0;
                            '\n'
                        } else {
                            ' '
                        };

                        line_len += val_str.len() + 1;
                        if id == 0 && j == 0 {
                            val_str
                        } else if id == last_id && j == 2 {
                            format!("{}{}\n", sep, val_str)
                        } else {
                            format!("{}{}", sep, val_str)
                        }
                    })
                    .collect::<String>()
            })
            .collect::<String>()
    }

    pub fn write_ppm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.ppm_header().as_bytes())?;
        writer.write_all(self.ppm_data().as_bytes())?;
        Ok(())
    }
}

/// png
impl Canvas {
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), ImageError> {
        let mut encoder = png::Encoder::new(writer, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.as_u8_rgb())?;
        writer.finish()?;
        Ok(())
    }
}

/// bmp, 24 bits per pixel, rows stored bottom-up
impl Canvas {
    const BMP_HEADER_SIZE: u32 = 14;
    const BMP_INFO_HEADER_SIZE: u32 = 40;

    fn bmp_row_padding(&self) -> usize {
        (4 - (self.width * 3) % 4) % 4
    }

    pub fn write_bmp<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let padding = self.bmp_row_padding();
        let image_size = ((self.width * 3 + padding) * self.height) as u32;
        let data_offset = Self::BMP_HEADER_SIZE + Self::BMP_INFO_HEADER_SIZE;

        writer.write_all(b"BM")?;
        writer.write_all(&(data_offset + image_size).to_le_bytes())?;
        writer.write_all(&0u32.to_le_bytes())?;
        writer.write_all(&data_offset.to_le_bytes())?;

        writer.write_all(&Self::BMP_INFO_HEADER_SIZE.to_le_bytes())?;
        writer.write_all(&(self.width as i32).to_le_bytes())?;
        writer.write_all(&(self.height as i32).to_le_bytes())?;
        writer.write_all(&1u16.to_le_bytes())?;
        writer.write_all(&24u16.to_le_bytes())?;
        writer.write_all(&0u32.to_le_bytes())?;
        writer.write_all(&image_size.to_le_bytes())?;
        for _ in 0..4 {
            writer.write_all(&0u32.to_le_bytes())?;
        }

        let pad = [0u8; 3];
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let [r, g, b] = self.pixel_at(x, y);
                writer.write_all(&[b, g, r])?;
            }
            writer.write_all(&pad[..padding])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index() {
        let width = 5;
        let height = 3;
        let canvas = Canvas::new(width, height);
        assert_eq!(canvas.index(0, 1), width);
        assert_eq!(canvas.index(1, 0), 1);
        assert_eq!(canvas.index(width - 1, height - 1), width * height - 1);
        assert_eq!(canvas.index(1, 2), width * 2 + 1);
    }

    #[test]
    fn new_blank() {
        let canvas = Canvas::new(10, 20);
        assert!(canvas.pixels.iter().all(|pixel| *pixel == [0, 0, 0]));
    }

    #[test]
    fn write_pixel_converts_to_bytes() {
        let mut canvas = Canvas::new(10, 10);

        canvas.write_pixel(2, 3, Color::new(1., 0.5, 1.7));
        assert_eq!(canvas.pixel_at(2, 3), [255, 127, 255]);
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut canvas = Canvas::new(4, 4);
        canvas.write_pixel(1, 1, Color::red());
        canvas.fill(Color::blue());

        assert!(canvas.pixels.iter().all(|pixel| *pixel == [0, 0, 255]));
    }

    #[test]
    fn ppm_header() {
        assert_eq!(Canvas::new(5, 3).ppm_header(), "P3\n5 3\n255\n");
    }

    #[test]
    fn ppm_pixel_data() {
        let mut canvas = Canvas::new(5, 3);

        canvas.write_pixel(0, 0, Color::new(1.5, 0., 0.));
        canvas.write_pixel(2, 1, Color::new(0., 0.5, 0.));
        canvas.write_pixel(4, 2, Color::new(-1.5, 0., 1.));

        assert_eq!(
            canvas.ppm_data(),
            r#"255 0 0 0 0 0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 127 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0 0 0 0 0 255
"#
        )
    }

    #[test]
    fn split_long_lines_ppm_data() {
        let canvas = Canvas::with_color(10, 2, Color::new(1., 0.5, 0.25));

        assert_eq!(
            canvas.ppm_data(),
            r#"255 127 63 255 127 63 255 127 63 255 127 63 255 127 63 255 127 63 255
127 63 255 127 63 255 127 63 255 127 63
255 127 63 255 127 63 255 127 63 255 127 63 255 127 63 255 127 63 255
127 63 255 127 63 255 127 63 255 127 63
"#
        )
    }

    #[test]
    fn ppm_file_contents() {
        let mut out = Vec::new();
        Canvas::with_color(1, 1, Color::white())
            .write_ppm(&mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "P3\n1 1\n255\n255 255 255\n");
    }

    #[test]
    fn bmp_header_and_padding() {
        let mut canvas = Canvas::new(2, 2);
        canvas.write_pixel(0, 0, Color::red());
        canvas.write_pixel(1, 1, Color::blue());

        let mut out = Vec::new();
        canvas.write_bmp(&mut out).unwrap();

        // each 6 byte row is padded to 8
        assert_eq!(out.len(), 54 + 16);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 70);
        assert_eq!(u32::from_le_bytes(out[10..14].try_into().unwrap()), 54);
        assert_eq!(i32::from_le_bytes(out[18..22].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(out[28..30].try_into().unwrap()), 24);

        // bottom row first, BGR order
        assert_eq!(&out[54..62], &[0, 0, 0, 255, 0, 0, 0, 0]);
        assert_eq!(&out[62..70], &[0, 0, 255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn png_signature() {
        let mut out = Vec::new();
        Canvas::new(3, 2).write_png(&mut out).unwrap();

        assert_eq!(&out[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
