//! Text measurement and placement inside a rectangle.

use rusttype::{point, Font, Scale};
use std::borrow::Cow;

use crate::surface::{Rect, TextLayout};

pub const ELLIPSIS: &str = "...";

/// Horizontal advance of `text` laid out on one line.
pub fn advance_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map_or(0.0, |glyph| {
            glyph.position().x + glyph.unpositioned().h_metrics().advance_width
        })
}

/// Distance from the top of the tallest glyph to the bottom of the deepest.
pub fn line_height(font: &Font<'_>, scale: Scale) -> f32 {
    let v_metrics = font.v_metrics(scale);
    v_metrics.ascent - v_metrics.descent
}

/// Top-left corner of a `width` x `height` block placed in `rect`.
pub fn align(rect: Rect, width: f32, height: f32, layout: TextLayout) -> (f32, f32) {
    let left = if layout.center_horizontal {
        rect.x as f32 + (rect.width as f32 - width) / 2.0
    } else {
        rect.x as f32
    };
    let top = if layout.center_vertical {
        rect.y as f32 + (rect.height as f32 - height) / 2.0
    } else {
        rect.y as f32
    };
    (left.round(), top.round())
}

/// Byte offsets where a word ends and whitespace begins.
fn word_ends(text: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut in_word = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if in_word {
                ends.push(idx);
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }
    ends
}

/// Shorten `text` until it fits in `max_width`.
///
/// Whole trailing words are dropped first and `...` appended. If not even
/// the first word fits, it is cut character by character. When only the
/// ellipsis fits that is returned; when nothing fits the result is empty.
pub fn fit_word_ellipsis<'t>(
    text: &'t str,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Cow<'t, str> {
    if measure(text) <= max_width {
        return Cow::Borrowed(text);
    }

    for end in word_ends(text).into_iter().rev() {
        let candidate = format!("{}{ELLIPSIS}", text[..end].trim_end());
        if measure(&candidate) <= max_width {
            return Cow::Owned(candidate);
        }
    }

    let first_word = text.trim_start().split_whitespace().next().unwrap_or("");
    let cuts: Vec<usize> = first_word
        .char_indices()
        .map(|(idx, _)| idx)
        .filter(|&idx| idx > 0)
        .collect();
    for &end in cuts.iter().rev() {
        let candidate = format!("{}{ELLIPSIS}", &first_word[..end]);
        if measure(&candidate) <= max_width {
            return Cow::Owned(candidate);
        }
    }

    if measure(ELLIPSIS) <= max_width {
        Cow::Borrowed(ELLIPSIS)
    } else {
        Cow::Borrowed("")
    }
}
