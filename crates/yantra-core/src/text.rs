//! Built-in 5x7 bitmap font and a tiny text atlas.
//!
//! The renderer draws the headline and the navigation labels as textured
//! quads; this module produces the single-channel coverage bitmap they sample.

pub const GLYPH_W: u32 = 5;
pub const GLYPH_H: u32 = 7;
/// Horizontal advance per glyph in font pixels.
pub const CELL_W: u32 = GLYPH_W + 1;
/// Vertical pitch per line in font pixels.
pub const CELL_H: u32 = GLYPH_H + 2;
const PAD: u32 = 1;

/// Rows top to bottom, bit 4 is the leftmost column. Lowercase folds to
/// uppercase; anything unknown renders blank.
fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        _ => [0; 7],
    }
}

/// Single-channel coverage bitmap, row-major, 0 or 255 per pixel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextBitmap {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    fn blit(&mut self, src: &TextBitmap, dst_y: u32) {
        let x0 = (self.width - src.width) / 2;
        for y in 0..src.height {
            let s = (y * src.width) as usize;
            let d = ((dst_y + y) * self.width + x0) as usize;
            self.pixels[d..d + src.width as usize]
                .copy_from_slice(&src.pixels[s..s + src.width as usize]);
        }
    }
}

/// Rasterize `text` with each line centered. `scale` is the pixel size of
/// one font pixel.
pub fn rasterize(text: &str, scale: u32) -> TextBitmap {
    let scale = scale.max(1);
    let lines: Vec<&str> = text.lines().collect();
    let line_count = lines.len().max(1) as u32;
    let widest = lines
        .iter()
        .map(|l| l.chars().count() as u32)
        .max()
        .unwrap_or(0)
        .max(1);
    let width = (widest * CELL_W + 2 * PAD) * scale;
    let height = (line_count * CELL_H + 2 * PAD) * scale;
    let mut bmp = TextBitmap::blank(width, height);

    for (row, line) in lines.iter().enumerate() {
        let chars = line.chars().count() as u32;
        let indent = (widest - chars) * CELL_W / 2;
        let top = PAD + row as u32 * CELL_H + 1;
        for (col, c) in line.chars().enumerate() {
            let left = PAD + indent + col as u32 * CELL_W;
            for (gy, bits) in glyph(c).iter().enumerate() {
                for gx in 0..GLYPH_W {
                    if bits & (0x10 >> gx) == 0 {
                        continue;
                    }
                    let fx = (left + gx) * scale;
                    let fy = (top + gy as u32) * scale;
                    for dy in 0..scale {
                        let base = ((fy + dy) * width + fx) as usize;
                        bmp.pixels[base..base + scale as usize].fill(255);
                    }
                }
            }
        }
    }
    bmp
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtlasEntry {
    /// `[u0, v0, u1, v1]`, v growing downward.
    pub uv_rect: [f32; 4],
    /// Width over height of the rasterized block.
    pub aspect: f32,
    pub lines: u32,
}

#[derive(Clone, Debug, Default)]
pub struct TextAtlas {
    pub bitmap: TextBitmap,
    pub entries: Vec<AtlasEntry>,
}

impl TextAtlas {
    /// Stack every string vertically into one bitmap.
    pub fn build(texts: &[&str], scale: u32) -> Self {
        let blocks: Vec<TextBitmap> = texts.iter().map(|t| rasterize(t, scale)).collect();
        let width = blocks.iter().map(|b| b.width).max().unwrap_or(1);
        let height = blocks.iter().map(|b| b.height).sum::<u32>().max(1);
        let mut bitmap = TextBitmap::blank(width, height);
        let mut entries = Vec::with_capacity(blocks.len());
        let mut y = 0u32;
        for (block, text) in blocks.iter().zip(texts) {
            bitmap.blit(block, y);
            let x0 = (width - block.width) / 2;
            entries.push(AtlasEntry {
                uv_rect: [
                    x0 as f32 / width as f32,
                    y as f32 / height as f32,
                    (x0 + block.width) as f32 / width as f32,
                    (y + block.height) as f32 / height as f32,
                ],
                aspect: block.width as f32 / block.height as f32,
                lines: text.lines().count().max(1) as u32,
            });
            y += block.height;
        }
        Self { bitmap, entries }
    }
}
