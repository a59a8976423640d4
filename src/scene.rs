//! Retained description of one render pass.
//!
//! [`Scene::build`] turns a value snapshot and a style into at most three
//! primitives, always in the order fill, text, border. The border comes
//! last so it stays on top of both the fill and the text.

use crate::config::{BarStyle, Color, Orientation, TextStyle};
use crate::diagnostics::Fault;
use crate::surface::{Rect, Surface, TextLayout, TextParams};
use crate::value::ValueSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Fill,
    Text,
    Border,
}

impl Primitive {
    /// Name used for the site of a recorded fault.
    pub fn site(self) -> &'static str {
        match self {
            Primitive::Fill => "fill",
            Primitive::Text => "text",
            Primitive::Border => "border",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        font_size: f32,
        layout: TextLayout,
    },
    StrokeRect {
        rect: Rect,
        thickness: u32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn primitive(&self) -> Primitive {
        match self {
            DrawCommand::FillRect { .. } => Primitive::Fill,
            DrawCommand::Text { .. } => Primitive::Text,
            DrawCommand::StrokeRect { .. } => Primitive::Border,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn build(state: ValueSnapshot, style: &BarStyle, width: i32, height: i32) -> Self {
        let mut scene = Scene::default();
        if width <= 0 || height <= 0 {
            return scene;
        }
        let bounds = Rect::new(0, 0, width, height);

        if let Some(rect) = fill_rect(state, style.orientation, width, height) {
            scene.add_command(DrawCommand::FillRect {
                rect,
                color: style.bar_color,
            });
        }

        if !style.text_color.is_transparent() {
            if let Some(text) =
                text_content(style.text_style, &style.label, state.value, state.maximum)
            {
                scene.add_command(DrawCommand::Text {
                    rect: bounds,
                    text,
                    color: style.text_color,
                    font_size: style.font_size,
                    layout: TextLayout::CENTERED_ELLIPSIS,
                });
            }
        }

        if style.border_thickness > 0 && !style.border_color.is_transparent() {
            scene.add_command(DrawCommand::StrokeRect {
                rect: bounds,
                thickness: style.border_thickness,
                color: style.border_color,
            });
        }

        scene
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Issue every command in order; the first failing one stops the pass.
    /// Returns the number of primitives drawn.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<usize, Fault> {
        for command in &self.commands {
            let result = match command {
                DrawCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                DrawCommand::Text {
                    rect,
                    text,
                    color,
                    font_size,
                    layout,
                } => surface.draw_text(
                    text,
                    *rect,
                    TextParams {
                        color: *color,
                        font_size: *font_size,
                        layout: *layout,
                    },
                ),
                DrawCommand::StrokeRect {
                    rect,
                    thickness,
                    color,
                } => surface.stroke_rect(*rect, *thickness, *color),
            };
            result.map_err(|err| Fault::from_render_error(command.primitive().site(), &err))?;
        }
        Ok(self.commands.len())
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Length of the filled part along a `dimension` pixels long axis.
///
/// Zero for a zero value or a zero maximum. Rounds half away from zero and
/// never leaves `0..=dimension`.
pub fn fill_extent(dimension: i32, value: i32, maximum: i32) -> i32 {
    if value == 0 || maximum == 0 || dimension <= 0 {
        return 0;
    }
    let scaled = (f64::from(dimension) * f64::from(value) / f64::from(maximum)).round();
    scaled.clamp(0.0, f64::from(dimension)) as i32
}

fn fill_rect(state: ValueSnapshot, orientation: Orientation, width: i32, height: i32) -> Option<Rect> {
    match orientation {
        Orientation::Horizontal => {
            let extent = fill_extent(width, state.value, state.maximum);
            (extent > 0).then(|| Rect::new(0, 0, extent, height))
        }
        Orientation::Vertical => {
            let extent = fill_extent(height, state.value, state.maximum);
            (extent > 0).then(|| Rect::new(0, height - extent, width, extent))
        }
    }
}

// ============================================================================
// TEXT CONTENT
// ============================================================================

fn percentage(value: i32, maximum: i32) -> f64 {
    100.0 * f64::from(value) / f64::from(maximum)
}

/// Text shown for `style`, or `None` when the style's precondition fails.
///
/// Percentages use `f64`'s shortest round-trip formatting, so a whole
/// number prints without a decimal point.
pub fn text_content(style: TextStyle, label: &str, value: i32, maximum: i32) -> Option<String> {
    let has_label = !label.trim().is_empty();
    match style {
        TextStyle::None => None,
        TextStyle::Value => Some(value.to_string()),
        TextStyle::ValueOverMaximum => Some(format!("{value}/{maximum}")),
        TextStyle::Percentage if maximum != 0 => Some(format!("{}%", percentage(value, maximum))),
        TextStyle::Text if has_label => Some(label.to_string()),
        TextStyle::TextAndPercentage if has_label && maximum != 0 => {
            Some(format!("{label}: {}%", percentage(value, maximum)))
        }
        TextStyle::TextAndValueOverMaximum if has_label => {
            Some(format!("{label}: {value}/{maximum}"))
        }
        TextStyle::Percentage
        | TextStyle::Text
        | TextStyle::TextAndPercentage
        | TextStyle::TextAndValueOverMaximum => None,
    }
}
