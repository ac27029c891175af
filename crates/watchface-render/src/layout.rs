//! Fixed screen layout of the 144 × 168 watchface.

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{
        ascii::{FONT_10X20, FONT_7X13},
        MonoFont,
    },
    primitives::Rectangle,
};

/// Whole-screen world map.
pub const BACKGROUND: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(144, 168));

/// Time text box; text is right-aligned against its right edge.
pub const TIME: Rectangle = Rectangle::new(Point::new(0, -5), Size::new(100, 168));

/// Date text box, left-aligned.
pub const DATE: Rectangle = Rectangle::new(Point::new(8, 33), Size::new(144, 30));

/// Am/pm text box, left-aligned, right of the time.
pub const AM_PM: Rectangle = Rectangle::new(Point::new(100, -4), Size::new(30, 30));

/// Font of the time text.
pub const TIME_FONT: &MonoFont<'static> = &FONT_10X20;

/// Font of the date and am/pm text.
pub const SMALL_FONT: &MonoFont<'static> = &FONT_7X13;

/// Top-left anchor of left-aligned text in `frame`.
///
/// Boxes that reach above the display start their text at row 0.
pub fn text_origin(frame: &Rectangle) -> Point {
    Point::new(frame.top_left.x, frame.top_left.y.max(0))
}

/// Top-right anchor of right-aligned text in `frame`.
pub fn text_origin_right(frame: &Rectangle) -> Point {
    let width = i32::try_from(frame.size.width).unwrap_or(i32::MAX);
    Point::new(frame.top_left.x.saturating_add(width), frame.top_left.y.max(0))
}
