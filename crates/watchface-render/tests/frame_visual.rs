//! Visual tests for the watchface frame.
//! Uses platform::mocks::MockDisplay for headless rendering and pixel assertions.
//!
//! Run: cargo test -p watchface-render --test frame_visual

#![allow(
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]

use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::BinaryColor;
use platform::config::{CURSOR_WIDTH, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use platform::mocks::MockDisplay;
use watchface::{ClockText, Frame};
use watchface_render::render_frame;

/// Helper: a 12h frame at 4:05 pm with the cursor at its epoch position.
fn mock_frame(cursor_x: i32) -> Frame {
    Frame {
        cursor_x,
        text: ClockText {
            time: " 4:05".into(),
            date: "Mon,  4 September".into(),
            am_pm: Some("pm".into()),
        },
    }
}

fn render(frame: &Frame, background: Option<&ImageRaw<'_, BinaryColor>>) -> MockDisplay {
    let mut display = MockDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    render_frame(&mut display, frame, background).unwrap();
    display
}

fn lit_in_rows(display: &MockDisplay, xs: core::ops::Range<u32>, ys: core::ops::Range<u32>) -> usize {
    xs.flat_map(|x| ys.clone().map(move |y| (x, y)))
        .filter(|&(x, y)| display.pixel_at(x, y) == Some(BinaryColor::On))
        .count()
}

#[test]
fn cursor_bar_spans_full_height() {
    let display = render(&mock_frame(69), None);
    for x in 69..69 + CURSOR_WIDTH {
        assert_eq!(display.lit_in_column(x), DISPLAY_HEIGHT as usize, "column {x}");
    }
}

#[test]
fn area_right_of_text_stays_dark() {
    let display = render(&mock_frame(69), None);
    assert_eq!(display.lit_in_column(DISPLAY_WIDTH - 2), 0);
}

#[test]
fn cursor_at_far_right_is_clipped() {
    let display = render(&mock_frame(142), None);
    assert_eq!(display.lit_in_column(142), DISPLAY_HEIGHT as usize);
    assert_eq!(display.lit_in_column(143), DISPLAY_HEIGHT as usize);
    assert_eq!(display.pixel_at(144, 0), None);
}

#[test]
fn time_text_drawn_left_of_am_pm() {
    let display = render(&mock_frame(140), None);
    assert!(lit_in_rows(&display, 50..100, 0..20) > 0, "time digits missing");
    assert!(lit_in_rows(&display, 100..130, 0..13) > 0, "am/pm missing");
}

#[test]
fn date_text_drawn_below_time() {
    let display = render(&mock_frame(140), None);
    assert!(lit_in_rows(&display, 8..127, 33..46) > 0, "date missing");
}

#[test]
fn no_am_pm_in_24h_style() {
    let mut frame = mock_frame(1);
    frame.text = ClockText {
        time: "16:05".into(),
        date: "Mon,  4 September".into(),
        am_pm: None,
    };
    let display = render(&frame, None);
    assert_eq!(lit_in_rows(&display, 101..131, 0..13), 0);
}

#[test]
fn background_is_drawn_under_everything() {
    // Bottom row of the map is solid; everything else is empty.
    let row_bytes = (DISPLAY_WIDTH / 8) as usize;
    let mut bits = vec![0u8; row_bytes * DISPLAY_HEIGHT as usize];
    let last_row = bits.len() - row_bytes;
    bits[last_row..].fill(0xFF);
    let raw = ImageRaw::<BinaryColor>::new(&bits, DISPLAY_WIDTH);

    let display = render(&mock_frame(1), Some(&raw));
    assert_eq!(display.pixel_at(120, DISPLAY_HEIGHT - 1), Some(BinaryColor::On));
    assert_eq!(display.pixel_at(120, DISPLAY_HEIGHT - 2), Some(BinaryColor::Off));
}

#[test]
fn rerender_clears_previous_cursor() {
    let mut display = MockDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    render_frame(&mut display, &mock_frame(140), None).unwrap();
    render_frame(&mut display, &mock_frame(1), None).unwrap();
    assert_eq!(display.lit_in_column(141), 0);
}
