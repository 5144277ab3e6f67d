//! Element styling and color utilities shared by all views

use std::fmt;

use cv_core::{ConflictId, ViolenceType};
use serde::Serialize;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const STATE_BASED: Color = Color::from_rgb(0x5d, 0xad, 0xe2);
pub const NON_STATE: Color = Color::from_rgb(0xf3, 0x9c, 0x12);
pub const ONE_SIDED: Color = Color::from_rgb(0xaf, 0x7a, 0xc5);

pub const CIVILIAN: Color = Color::from_rgb(0xf3, 0x9c, 0x12);
pub const COMBATANT: Color = Color::from_rgb(0x95, 0xa5, 0xa6);
pub const UNATTRIBUTED: Color = Color::from_rgb(0xb0, 0xb0, 0xb0);

pub const HIGHLIGHT_BAND: Color = Color::from_rgb(0xf1, 0xc4, 0x0f);

/// Color of a violence category
pub fn violence_color(violence_type: ViolenceType) -> Color {
    match violence_type {
        ViolenceType::StateBased => STATE_BASED,
        ViolenceType::NonState => NON_STATE,
        ViolenceType::OneSided => ONE_SIDED,
    }
}

/// Cross-view emphasis of one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    #[default]
    Neutral,
    Emphasized,
    Dimmed,
}

/// Visual state of one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementStyle {
    pub emphasis: Emphasis,

    /// Under the pointer. Cross-view updates leave it alone.
    pub local_hover: bool,
}

/// A drawable element that can take part in highlighting
pub trait Styled {
    /// Key identifying the element within its view
    fn key(&self) -> u64;

    /// Conflict the element belongs to
    fn conflict(&self) -> Option<ConflictId>;

    fn style(&self) -> &ElementStyle;

    fn style_mut(&mut self) -> &mut ElementStyle;
}

/// Mark `element` as locally hovered and everything else as not
pub fn set_local_hover<T: Styled>(items: &mut [T], element: Option<u64>) {
    for item in items {
        let hovered = element == Some(item.key());
        item.style_mut().local_hover = hovered;
    }
}

/// Emphasize elements of `conflict` and dim the rest, skipping locally hovered ones
pub fn highlight<T: Styled>(items: &mut [T], conflict: ConflictId) {
    for item in items {
        let matches = item.conflict() == Some(conflict);
        let style = item.style_mut();
        if style.local_hover {
            continue;
        }
        style.emphasis = if matches {
            Emphasis::Emphasized
        } else {
            Emphasis::Dimmed
        };
    }
}

/// Return every element to neutral, skipping locally hovered ones
pub fn clear<T: Styled>(items: &mut [T]) {
    for item in items {
        let style = item.style_mut();
        if !style.local_hover {
            style.emphasis = Emphasis::Neutral;
        }
    }
}
