//! Full-quality icon drawn with tiny-skia
//!
//! Coordinates follow the inclusive `[x0, y0, x1, y1]` convention: a box from
//! 4 to 12 covers pixels 4..=12.

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

use super::{IconError, Rgba};

/// Text lines only start reading as lines at this size
const MIN_SIZE_FOR_LINES: u32 = 32;
const MAX_TEXT_LINES: u32 = 4;

/// Cubic Bezier handle length for a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// Pixel geometry of the icon for a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconLayout {
    pub size: u32,
    /// Inset of the rounded background tile
    pub margin: u32,
    pub corner_radius: u32,
    /// Inset of the white document
    pub doc_margin: u32,
}

impl IconLayout {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            margin: (size / 8).max(1),
            corner_radius: (size / 6).max(1),
            doc_margin: (size / 4).max(2),
        }
    }

    /// Document width and height
    pub fn doc_extent(&self) -> i32 {
        self.size as i32 - 2 * self.doc_margin as i32
    }

    /// Inclusive `[x0, y0, x1, y1]` boxes for the text lines inside the document
    pub fn text_lines(&self) -> Vec<[i32; 4]> {
        if self.size < MIN_SIZE_FOR_LINES {
            return Vec::new();
        }

        let size = self.size as i32;
        let doc = self.doc_margin as i32;
        let extent = self.doc_extent();
        let inset = (size / 16).max(1);
        let thickness = (size / 32).max(1);
        let count = MAX_TEXT_LINES.min(self.size / 8) as i32;
        let spacing = (extent / (count + 1)).max(2);

        let x0 = doc + inset;
        let x1 = size - doc - inset;
        (0..count)
            .map(|i| {
                let y = doc + (i + 1) * spacing;
                let end = if i == count - 1 {
                    x1 - (extent / 4).max(1)
                } else {
                    x1
                };
                [x0, y, end, y + thickness]
            })
            .collect()
    }
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.0, color.1, color.2, color.3);
    paint.anti_alias = true;
    paint
}

/// Rect covering the inclusive pixel box
fn pixel_rect([x0, y0, x1, y1]: [i32; 4]) -> Result<Rect, IconError> {
    Rect::from_ltrb(x0 as f32, y0 as f32, (x1 + 1) as f32, (y1 + 1) as f32).ok_or_else(|| {
        IconError::Raster(format!("degenerate box [{}, {}, {}, {}]", x0, y0, x1, y1))
    })
}

/// Rounded rectangle path; the radius is clamped to half the shorter side
fn rounded_rect(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let k = r * KAPPA;
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

/// Draw the icon into a new pixmap
pub fn render_icon(size: u32) -> Result<Pixmap, IconError> {
    let layout = IconLayout::new(size);
    let mut pixmap = Pixmap::new(size, size)
        .ok_or_else(|| IconError::Raster(format!("cannot allocate {}x{} canvas", size, size)))?;

    let s = size as i32;
    let m = layout.margin as i32;
    let tile = pixel_rect([m, m, s - m, s - m])?;
    let tile_path = rounded_rect(tile, layout.corner_radius as f32)
        .ok_or_else(|| IconError::Raster("empty background path".to_string()))?;
    pixmap.fill_path(
        &tile_path,
        &paint(Rgba::PURPLE),
        FillRule::Winding,
        Transform::identity(),
        None,
    );

    let d = layout.doc_margin as i32;
    pixmap.fill_rect(
        pixel_rect([d, d, s - d, s - d])?,
        &paint(Rgba::WHITE),
        Transform::identity(),
        None,
    );

    let line_paint = paint(Rgba::PURPLE);
    for line in layout.text_lines() {
        pixmap.fill_rect(pixel_rect(line)?, &line_paint, Transform::identity(), None);
    }

    tracing::debug!(size, lines = layout.text_lines().len(), "Rasterized icon");
    Ok(pixmap)
}

/// Draw the icon and encode it as PNG
pub fn render_icon_png(size: u32) -> Result<Vec<u8>, IconError> {
    let pixmap = render_icon(size)?;
    pixmap
        .encode_png()
        .map_err(|e| IconError::Raster(format!("PNG export failed: {}", e)))
}
