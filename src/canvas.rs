// Immediate-mode drawing context over an RGBA buffer.
//
// The model is a pen: set a colour, load a font face, then fill or draw
// strings with it. Coordinates are in pixels with the origin at the top
// left; string positions name the baseline, not the top of the glyphs.
// Font sizes are in points at 72 DPI, so one em is `points` pixels tall.

use std::fs;
use std::path::Path;

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{ComposeError, FontSource};

/// Horizontal alignment of each line in a wrapped block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

struct Face {
    font: FontVec,
    scale: PxScale,
    height: f32,
}

/// A fixed-size raster plus the current colour and font.
pub struct Canvas {
    image: RgbaImage,
    color: Rgba<u8>,
    face: Option<Face>,
}

impl Canvas {
    /// Create a transparent canvas. The pen starts black with no font.
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: RgbaImage::new(width, height),
            color: Rgba([0, 0, 0, 255]),
            face: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    /// Paint every pixel with the current colour.
    pub fn fill(&mut self) {
        let color = self.color;
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Load a font file and make it the current face at `points` size.
    pub fn load_font_face(&mut self, path: &Path, points: f32) -> Result<(), ComposeError> {
        let load_err = |source: FontSource| ComposeError::LoadFont {
            path: path.to_path_buf(),
            source,
        };

        let bytes = fs::read(path).map_err(|e| load_err(e.into()))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| load_err(e.into()))?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| load_err(FontSource::MissingMetrics))?;

        // PxScale is the ascent-to-descent height, so convert from em size.
        let scale = PxScale::from(points * font.height_unscaled() / units_per_em);
        tracing::debug!(path = %path.display(), points, "loaded font face");

        self.face = Some(Face {
            font,
            scale,
            height: points * 72.0 / 96.0,
        });
        Ok(())
    }

    /// Advance width of `text` and the line height of the current face.
    pub fn measure_string(&self, text: &str) -> (f32, f32) {
        match &self.face {
            Some(face) => (advance_width(face, text), face.height),
            None => (0.0, 0.0),
        }
    }

    /// Draw `text` with its baseline starting at `(x, y)`.
    pub fn draw_string(&mut self, text: &str, x: f32, y: f32) {
        let Some(face) = &self.face else {
            return;
        };
        let scaled = face.font.as_scaled(face.scale);
        let color = self.color;
        let (width, height) = (self.image.width() as i32, self.image.height() as i32);

        let mut caret = x;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(face.scale, point(caret, y));
            if let Some(outlined) = face.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let image = &mut self.image;
                outlined.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bounds.min.x as i32;
                    let py = gy as i32 + bounds.min.y as i32;
                    if px < 0 || py < 0 || px >= width || py >= height {
                        return;
                    }
                    let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                    if alpha == 0 {
                        return;
                    }
                    let top = Rgba([color[0], color[1], color[2], alpha]);
                    let pixel = image.get_pixel_mut(px as u32, py as u32);
                    *pixel = blend_over(*pixel, top);
                });
            }
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
    }

    /// Draw `text` so that `(x, y)` sits at the fractional anchor
    /// `(ax, ay)` of its measured box; `ay = 1` puts the top of the box at `y`.
    pub fn draw_string_anchored(&mut self, text: &str, x: f32, y: f32, ax: f32, ay: f32) {
        let (w, h) = self.measure_string(text);
        self.draw_string(text, x - ax * w, y + ay * h);
    }

    /// Break `text` into lines no wider than `width`, packing words greedily.
    /// Explicit newlines always start a new line and whitespace between
    /// words is kept as written; only line ends are trimmed. A word that is
    /// wider than `width` on its own gets a line to itself.
    pub fn word_wrap(&self, text: &str, width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for (word, gap) in split_on_space(paragraph) {
                let candidate = format!("{current}{word}");
                if self.measure_string(&candidate).0 > width {
                    if current.is_empty() {
                        lines.push(word.to_string());
                        continue;
                    }
                    lines.push(std::mem::take(&mut current));
                }
                current.push_str(word);
                current.push_str(gap);
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines.into_iter().map(|line| line.trim().to_string()).collect()
    }

    /// Word-wrap `text` to `width` and draw it as a block anchored at
    /// `(ax, ay)` of the block's box, with baselines `line_spacing` font
    /// heights apart.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_string_wrapped(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        ax: f32,
        ay: f32,
        width: f32,
        line_spacing: f32,
        align: Align,
    ) {
        let lines = self.word_wrap(text, width);
        let font_height = self.measure_string("").1;
        let block_height =
            lines.len() as f32 * font_height * line_spacing - (line_spacing - 1.0) * font_height;

        let mut x = x - ax * width;
        let mut y = y - ay * block_height;
        let line_ax = match align {
            Align::Left => 0.0,
            Align::Center => {
                x += width / 2.0;
                0.5
            }
            Align::Right => {
                x += width;
                1.0
            }
        };

        for line in &lines {
            self.draw_string_anchored(line, x, y, line_ax, 1.0);
            y += font_height * line_spacing;
        }
    }

    /// Encode the canvas as PNG at `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> Result<(), ComposeError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| ComposeError::SaveImage {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Split `line` into alternating runs of non-space and space characters,
/// paired as `(word, following gap)`. A leading gap pairs with an empty word.
fn split_on_space(line: &str) -> Vec<(&str, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev_space = false;
    for (i, c) in line.char_indices() {
        let space = c.is_whitespace();
        if i > 0 && space != prev_space {
            runs.push(&line[start..i]);
            start = i;
        }
        prev_space = space;
    }
    runs.push(&line[start..]);

    if line.starts_with(char::is_whitespace) {
        runs.insert(0, "");
    }
    if runs.len() % 2 == 1 {
        runs.push("");
    }
    runs.chunks(2).map(|pair| (pair[0], pair[1])).collect()
}

fn advance_width(face: &Face, text: &str) -> f32 {
    let scaled = face.font.as_scaled(face.scale);
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Source-over compositing of straight (non-premultiplied) RGBA.
fn blend_over(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_alpha = top[3] as f32 / 255.0;
    let bottom_alpha = bottom[3] as f32 / 255.0;
    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);
    if out_alpha <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |t: u8, b: u8| -> u8 {
        let t = t as f32 / 255.0;
        let b = b as f32 / 255.0;
        let v = (t * top_alpha + b * bottom_alpha * (1.0 - top_alpha)) / out_alpha;
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(top[0], bottom[0]),
        channel(top[1], bottom[1]),
        channel(top[2], bottom[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
