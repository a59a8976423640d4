//! Drawing surfaces the render pass issues its primitives to.
//!
//! [`Canvas`] rasterises into an RGBA8 frame (the layout `pixels` hands
//! out), [`RecordingSurface`] keeps the primitives as [`DrawCommand`]s.

use rusttype::{point, Font, Scale};
use thiserror::Error;

use crate::config::{Color, RenderQuality};
use crate::diagnostics::FaultKind;
use crate::scene::{DrawCommand, Primitive};
use crate::text::{advance_width, align, fit_word_ellipsis, line_height};

// ============================================================================
// SURFACE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap with `other`, or `None` when they do not touch.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Placement flags for a text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub center_horizontal: bool,
    pub center_vertical: bool,
    /// Drop whole trailing words and append `...` when the text overflows.
    pub word_ellipsis: bool,
}

impl TextLayout {
    pub const CENTERED_ELLIPSIS: Self = Self {
        center_horizontal: true,
        center_vertical: true,
        word_ellipsis: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextParams {
    pub color: Color,
    /// Glyph height in pixels.
    pub font_size: f32,
    pub layout: TextLayout,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no font data supplied")]
    MissingFont,
    #[error("font data could not be parsed")]
    FontLoad,
    #[error("invalid rectangle {0:?}")]
    InvalidRect(Rect),
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
    #[error("surface failure: {0}")]
    Surface(String),
}

impl RenderError {
    pub fn kind(&self) -> FaultKind {
        match self {
            RenderError::MissingFont | RenderError::FontLoad => FaultKind::Font,
            RenderError::InvalidRect(_) => FaultKind::Geometry,
            RenderError::FrameSize { .. } | RenderError::Surface(_) => FaultKind::Surface,
        }
    }
}

/// Anything the bar can be drawn onto.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Lay `text` out inside `rect` according to `params.layout` and draw it.
    fn draw_text(&mut self, text: &str, rect: Rect, params: TextParams) -> Result<(), RenderError>;

    /// Outline `rect` with a stroke `thickness` pixels wide.
    fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Color) -> Result<(), RenderError>;
}

// ============================================================================
// PIXEL CANVAS
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font_data: Option<&'a [u8]>,
    quality: RenderQuality,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
            font_data: None,
            quality: RenderQuality::default(),
        }
    }

    /// Raw TrueType/OpenType bytes; parsed afresh for every text primitive.
    pub fn with_font(mut self, font_data: Option<&'a [u8]>) -> Self {
        self.font_data = font_data;
        self
    }

    pub fn with_quality(mut self, quality: RenderQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA bytes of one pixel, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            0,
            0,
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    fn check_frame(&self) -> Result<(), RenderError> {
        let expected = self.width.saturating_mul(self.height).saturating_mul(4);
        if self.frame.len() < expected {
            return Err(RenderError::FrameSize {
                expected,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    /// Source-over blend of `color` at `coverage` onto one pixel.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = (color.opacity() * coverage).clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b];
        for (channel, value) in src.iter().enumerate() {
            let dst = f32::from(self.frame[idx + channel]);
            self.frame[idx + channel] = (f32::from(*value) * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

impl Surface for Canvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        if rect.width < 0 || rect.height < 0 {
            return Err(RenderError::InvalidRect(rect));
        }
        self.check_frame()?;
        let Some(area) = rect.intersect(self.bounds()) else {
            return Ok(());
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, rect: Rect, params: TextParams) -> Result<(), RenderError> {
        if rect.width < 0 || rect.height < 0 {
            return Err(RenderError::InvalidRect(rect));
        }
        self.check_frame()?;
        let data = self.font_data.ok_or(RenderError::MissingFont)?;
        // Dropped when this call returns, on every path.
        let font = Font::try_from_bytes(data).ok_or(RenderError::FontLoad)?;
        let scale = Scale::uniform(params.font_size);

        let fitted = if params.layout.word_ellipsis {
            fit_word_ellipsis(text, rect.width as f32, |s| advance_width(&font, scale, s))
        } else {
            text.into()
        };
        if fitted.is_empty() {
            return Ok(());
        }

        let text_width = advance_width(&font, scale, &fitted);
        let (left, top) = align(rect, text_width, line_height(&font, scale), params.layout);
        let baseline = top + font.v_metrics(scale).ascent;
        let Some(clip) = rect.intersect(self.bounds()) else {
            return Ok(());
        };

        let quality = self.quality;
        for glyph in font.layout(&fitted, scale, point(left, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < clip.x || px >= clip.right() || py < clip.y || py >= clip.bottom() {
                    return;
                }
                let coverage = match quality {
                    RenderQuality::HighQuality => v,
                    RenderQuality::HighSpeed if v >= 0.5 => 1.0,
                    RenderQuality::HighSpeed => return,
                };
                self.blend_pixel(px, py, params.color, coverage);
            });
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Color) -> Result<(), RenderError> {
        if rect.width < 0 || rect.height < 0 {
            return Err(RenderError::InvalidRect(rect));
        }
        self.check_frame()?;
        let Some(area) = rect.intersect(self.bounds()) else {
            return Ok(());
        };
        let t = i32::try_from(thickness).unwrap_or(i32::MAX);
        // The stroke grows inward from the edges; each pixel is blended once.
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let on_edge = x - rect.x < t
                    || rect.right() - 1 - x < t
                    || y - rect.y < t
                    || rect.bottom() - 1 - y < t;
                if on_edge {
                    self.blend_pixel(x, y, color, 1.0);
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// RECORDING SURFACE
// ============================================================================

/// Keeps every primitive it receives. Can be told to fail on one kind of
/// primitive to exercise fault handling.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    fail_on: Option<Primitive>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every primitive of this kind with [`RenderError::Surface`].
    pub fn failing_on(primitive: Primitive) -> Self {
        Self {
            commands: Vec::new(),
            fail_on: Some(primitive),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn accept(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        if self.fail_on == Some(command.primitive()) {
            return Err(RenderError::Surface(format!(
                "{} rejected by recording surface",
                command.primitive().site()
            )));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.accept(DrawCommand::FillRect { rect, color })
    }

    fn draw_text(&mut self, text: &str, rect: Rect, params: TextParams) -> Result<(), RenderError> {
        self.accept(DrawCommand::Text {
            rect,
            text: text.to_string(),
            color: params.color,
            font_size: params.font_size,
            layout: params.layout,
        })
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Color) -> Result<(), RenderError> {
        self.accept(DrawCommand::StrokeRect {
            rect,
            thickness,
            color,
        })
    }
}
