// Banner composer: one fixed layout drawn onto a 1200x628 canvas.
//
// Layout, top to bottom of the drawing order:
// - background fill
// - right footer, white, 50px from the right edge
// - left footer, translucent white, at (50, H - 30)
// - title, wrapped to W - 120, white over a 1px black shadow

use std::path::PathBuf;

use image::Rgba;
use tracing::{debug, info};

use crate::canvas::{Align, Canvas};
use crate::config::Config;
use crate::error::ComposeError;
use crate::prompt::Prompt;

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 628;

const FOOTER_POINTS: f32 = 60.0;
const TITLE_POINTS: f32 = 90.0;
const FOOTER_MARGIN_X: f32 = 50.0;
const FOOTER_MARGIN_Y: f32 = -10.0;
const LEFT_FOOTER_OFFSET_Y: f32 = 30.0;
const TITLE_X: f32 = 60.0;
const TITLE_Y: f32 = 90.0;
const TITLE_LINE_SPACING: f32 = 1.5;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MUTED_WHITE: Rgba<u8> = Rgba([255, 255, 255, 120]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Baseline origin for the right footer given its measured size, so that
/// the text ends `FOOTER_MARGIN_X` pixels before the right edge.
pub fn right_footer_origin(canvas_w: f32, canvas_h: f32, text_w: f32, text_h: f32) -> (f32, f32) {
    (
        canvas_w - text_w - FOOTER_MARGIN_X,
        canvas_h - text_h - FOOTER_MARGIN_Y,
    )
}

/// Render the banner and write it to `config.output`.
///
/// Subtitles missing from the config and the title are read through
/// `prompt`. Returns the path that was written.
pub fn compose(config: &Config, prompt: &mut dyn Prompt) -> Result<PathBuf, ComposeError> {
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let (width, height) = (canvas.width() as f32, canvas.height() as f32);

    canvas.set_color(config.background);
    canvas.fill();
    debug!(background = ?config.background.0, "filled background");

    canvas.load_font_face(&config.desc_font, FOOTER_POINTS)?;
    canvas.set_color(WHITE);
    let right = match &config.right_subtitle {
        Some(text) => text.clone(),
        None => prompt.ask("Enter right subtitle")?,
    };
    let (text_w, text_h) = canvas.measure_string(&right);
    let (x, y) = right_footer_origin(width, height, text_w, text_h);
    canvas.draw_string(&right, x, y);
    debug!(text = %right, x, y, "drew right footer");

    canvas.load_font_face(&config.title_font, FOOTER_POINTS)?;
    canvas.set_color(MUTED_WHITE);
    let left = match &config.left_subtitle {
        Some(text) => text.clone(),
        None => prompt.ask("Enter left subtitle")?,
    };
    canvas.draw_string(&left, FOOTER_MARGIN_X, height - LEFT_FOOTER_OFFSET_Y);
    debug!(text = %left, "drew left footer");

    let title = prompt.ask("Enter text")?;
    canvas.load_font_face(&config.desc_font, TITLE_POINTS)?;
    let max_width = width - TITLE_X * 2.0;
    canvas.set_color(BLACK);
    canvas.draw_string_wrapped(
        &title,
        TITLE_X + 1.0,
        TITLE_Y + 1.0,
        0.0,
        0.0,
        max_width,
        TITLE_LINE_SPACING,
        Align::Left,
    );
    canvas.set_color(WHITE);
    canvas.draw_string_wrapped(
        &title,
        TITLE_X,
        TITLE_Y,
        0.0,
        0.0,
        max_width,
        TITLE_LINE_SPACING,
        Align::Left,
    );
    debug!(text = %title, "drew title");

    canvas.save_png(&config.output)?;
    info!(path = %config.output.display(), "banner saved");
    Ok(config.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_footer_ends_fifty_pixels_from_edge() {
        let (x, _) = right_footer_origin(1200.0, 628.0, 100.0, 45.0);
        assert_eq!(x + 100.0, 1150.0);
    }

    #[test]
    fn right_footer_baseline_sits_below_text_height() {
        let (_, y) = right_footer_origin(1200.0, 628.0, 100.0, 45.0);
        assert_eq!(y, 593.0);
    }
}
