//! Pixel to character-cell text conversion
//!
//! Every pixel becomes a 24-bit foreground color escape with zero-padded
//! channels followed by its glyph twice, so a pixel is two cells wide and
//! roughly square on screen.

use crate::renderer::{Pixel, PixelClass};
use crate::scene::Rgb;
use std::fmt::Write;

/// Bytes per encoded pixel: `ESC[38;2;RRR;GGG;BBBm` plus two glyphs
pub const ENCODED_PIXEL_LEN: usize = 21;

/// Order in which color channels are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    /// Green and blue swapped, matching older frame captures
    Rbg,
}

impl ChannelOrder {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            ChannelOrder::Rbg
        } else {
            ChannelOrder::Rgb
        }
    }

    fn channels(self, color: Rgb) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => [color.r, color.g, color.b],
            ChannelOrder::Rbg => [color.r, color.b, color.g],
        }
    }
}

pub fn glyph(class: PixelClass) -> char {
    match class {
        PixelClass::Background => ' ',
        PixelClass::Lit => '#',
        PixelClass::Shadowed => '.',
    }
}

fn push_pixel(out: &mut String, pixel: &Pixel, order: ChannelOrder) {
    let [a, b, c] = order.channels(pixel.color);
    let glyph = glyph(pixel.class);
    // Writing to a String cannot fail
    let _ = write!(out, "\x1b[38;2;{:03};{:03};{:03}m{}{}", a, b, c, glyph, glyph);
}

pub fn encode_pixel(pixel: &Pixel, order: ChannelOrder) -> String {
    let mut out = String::with_capacity(ENCODED_PIXEL_LEN);
    push_pixel(&mut out, pixel, order);
    out
}

/// Encode a row-major framebuffer, one text line per pixel row
pub fn encode_frame(pixels: &[Pixel], width: usize, order: ChannelOrder) -> String {
    if width == 0 {
        return String::new();
    }

    let rows = pixels.len() / width;
    let mut out = String::with_capacity(pixels.len() * ENCODED_PIXEL_LEN + rows);

    for (i, row) in pixels.chunks(width).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for pixel in row {
            push_pixel(&mut out, pixel, order);
        }
    }

    out
}
