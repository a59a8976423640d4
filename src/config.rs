use bon::Builder;

/// RGBA color for bar elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// A fully transparent color never produces a text or border primitive.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Direction in which the fill grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Bottom to top.
    Vertical,
}

/// Which overlay text the bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    None,
    /// `42`
    Value,
    /// `42/100`
    ValueOverMaximum,
    /// `42%`
    Percentage,
    /// The label verbatim.
    Text,
    /// `Label: 42%`
    #[default]
    TextAndPercentage,
    /// `Label: 42/100`
    TextAndValueOverMaximum,
}

/// Rasterisation hint for pixel surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderQuality {
    /// Anti-aliased glyph edges.
    #[default]
    HighQuality,
    /// Glyph coverage is snapped to on/off.
    HighSpeed,
}

pub const DEFAULT_BAR_COLOR: Color = Color::new(217, 201, 194);
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::new(251, 56, 33);

/// 10.25pt at 96 dpi.
pub const DEFAULT_FONT_SIZE: f32 = 10.25 * 96.0 / 72.0;

/// Configuration for the bar's appearance
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct BarStyle {
    #[builder(default)]
    pub orientation: Orientation,
    #[builder(default = DEFAULT_BAR_COLOR)]
    pub bar_color: Color,
    #[builder(default = Color::BLACK)]
    pub border_color: Color,
    /// Zero disables the border.
    #[builder(default = 2)]
    pub border_thickness: u32,
    #[builder(default = Color::WHITE)]
    pub text_color: Color,
    #[builder(default)]
    pub text_style: TextStyle,
    #[builder(default, into)]
    pub label: String,
    /// Glyph height in pixels.
    #[builder(default = DEFAULT_FONT_SIZE)]
    pub font_size: f32,
    #[builder(default)]
    pub quality: RenderQuality,
    /// Painted by hosts before each pass; the pipeline itself never fills the background.
    #[builder(default = DEFAULT_BACKGROUND_COLOR)]
    pub background_color: Color,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}
