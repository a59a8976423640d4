// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! A bar that shows one bounded integer as a filled rectangle with optional
//! overlay text and a border.
//!
//! [`ProgressBar`] owns the clamped value, the style and the fault log.
//! [`ProgressBar::render`] draws onto any [`Surface`]; [`ProgressBar::show`]
//! opens a window and draws onto a pixel frame.

pub mod config;
pub mod diagnostics;
pub mod render;
pub mod scene;
pub mod surface;
pub mod text;
pub mod value;
mod window;

// External crate imports
use bon::Builder;
use log::debug;

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;

pub use config::{BarStyle, Color, Orientation, RenderQuality, TextStyle};
pub use diagnostics::{Diagnostics, Fault, FaultKind};
pub use render::PassOutcome;
pub use scene::{DrawCommand, Primitive, Scene};
pub use surface::{Canvas, Rect, RecordingSurface, RenderError, Surface, TextLayout, TextParams};
pub use value::{BoundedValue, ObserverId, ValueSnapshot};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for updating a bar shown in a window
#[derive(Debug, Clone, PartialEq)]
pub enum BarCommand {
    SetValue(i32),
    SetMinimum(i32),
    SetMaximum(i32),
    SetLabel(String),
    SetTextStyle(TextStyle),
    SetOrientation(Orientation),
    ClearErrors,
}

#[derive(Debug, Clone, Builder)]
pub struct BarConfig {
    #[builder(default = "fillbar".to_string(), into)]
    pub title: String,
    #[builder(default = (0, 100))]
    pub range: (i32, i32),
    #[builder(default = 0)]
    pub initial_value: i32,

    // Window configuration
    #[builder(default = 400)]
    pub window_width: usize,
    #[builder(default = 23)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    #[builder(default)]
    pub style: BarStyle,

    /// TrueType/OpenType bytes used for the overlay text. Without them any
    /// text primitive on a pixel canvas records a font fault.
    #[builder(into)]
    pub font_data: Option<Arc<[u8]>>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Main bar struct - the primary public interface
pub struct ProgressBar {
    config: BarConfig,
    value: BoundedValue,
    diagnostics: Diagnostics,
    redraw_requested: bool,
}

impl ProgressBar {
    pub fn new(config: BarConfig) -> Self {
        let (minimum, maximum) = config.range;
        let mut value = BoundedValue::new(minimum, maximum);
        value.set_value(config.initial_value);

        Self {
            config,
            value,
            diagnostics: Diagnostics::new(),
            redraw_requested: true,
        }
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    pub fn style(&self) -> &BarStyle {
        &self.config.style
    }

    pub fn font_data(&self) -> Option<&[u8]> {
        self.config.font_data.as_deref()
    }

    // ------------------------------------------------------------------------
    // Value model
    // ------------------------------------------------------------------------

    pub fn minimum(&self) -> i32 {
        self.value.minimum()
    }

    pub fn maximum(&self) -> i32 {
        self.value.maximum()
    }

    pub fn value(&self) -> i32 {
        self.value.value()
    }

    pub fn snapshot(&self) -> ValueSnapshot {
        self.value.snapshot()
    }

    /// Does not re-clamp the current value.
    pub fn set_minimum(&mut self, minimum: i32) {
        self.value.set_minimum(minimum);
        self.request_redraw();
    }

    /// Does not re-clamp the current value.
    pub fn set_maximum(&mut self, maximum: i32) {
        self.value.set_maximum(maximum);
        self.request_redraw();
    }

    /// Clamp and store `value`, request a redraw, then notify observers with
    /// the stored value. Returns the stored value.
    pub fn set_value(&mut self, value: i32) -> i32 {
        self.request_redraw();
        self.value.set_value(value)
    }

    /// Called once for every [`set_value`](Self::set_value), before it returns.
    pub fn on_value_changed(&mut self, observer: impl FnMut(i32) + 'static) -> ObserverId {
        self.value.on_value_changed(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.value.remove_observer(id)
    }

    // ------------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------------

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.style.orientation = orientation;
        self.request_redraw();
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.config.style.bar_color = color;
        self.request_redraw();
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.config.style.border_color = color;
        self.request_redraw();
    }

    pub fn set_border_thickness(&mut self, thickness: u32) {
        self.config.style.border_thickness = thickness;
        self.request_redraw();
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.config.style.text_color = color;
        self.request_redraw();
    }

    pub fn set_text_style(&mut self, text_style: TextStyle) {
        self.config.style.text_style = text_style;
        self.request_redraw();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.config.style.label = label.into();
        self.request_redraw();
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.config.style.font_size = font_size;
        self.request_redraw();
    }

    pub fn set_quality(&mut self, quality: RenderQuality) {
        self.config.style.quality = quality;
        self.request_redraw();
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.config.style.background_color = color;
        self.request_redraw();
    }

    pub fn apply(&mut self, command: BarCommand) {
        debug!("applying {command:?}");
        match command {
            BarCommand::SetValue(value) => {
                self.set_value(value);
            }
            BarCommand::SetMinimum(minimum) => self.set_minimum(minimum),
            BarCommand::SetMaximum(maximum) => self.set_maximum(maximum),
            BarCommand::SetLabel(label) => self.set_label(label),
            BarCommand::SetTextStyle(text_style) => self.set_text_style(text_style),
            BarCommand::SetOrientation(orientation) => self.set_orientation(orientation),
            BarCommand::ClearErrors => self.clear_errors(),
        }
    }

    // ------------------------------------------------------------------------
    // Redraw requests
    // ------------------------------------------------------------------------

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Returns whether a redraw was requested since the last call and resets
    /// the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // ------------------------------------------------------------------------
    // Rendering & diagnostics
    // ------------------------------------------------------------------------

    /// Draw the bar onto a `width` x `height` surface. Never fails; faults
    /// end up in [`fault_log`](Self::fault_log).
    pub fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) -> PassOutcome {
        render::render_pass(
            surface,
            self.value.snapshot(),
            &self.config.style,
            width,
            height,
            &mut self.diagnostics,
        )
    }

    pub fn has_fault(&self) -> bool {
        self.diagnostics.has_fault()
    }

    pub fn faults(&self) -> &[Fault] {
        self.diagnostics.faults()
    }

    pub fn fault_log(&self) -> String {
        self.diagnostics.fault_log()
    }

    /// Empty the fault log. Visual state is untouched.
    pub fn clear_errors(&mut self) {
        self.diagnostics.clear();
    }

    // ------------------------------------------------------------------------
    // Window host
    // ------------------------------------------------------------------------

    pub fn show(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        window::run_window(self, None)
    }

    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<BarCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        window::run_window(self, Some(receiver))
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(BarConfig::default())
    }
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("value", &self.value)
            .field("style", &self.config.style)
            .field("faults", &self.diagnostics.faults().len())
            .field("redraw_requested", &self.redraw_requested)
            .finish()
    }
}
