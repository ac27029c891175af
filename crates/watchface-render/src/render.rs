use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use watchface::cursor::cursor_frame;
use watchface::Frame;

use crate::layout;

/// Draw `frame` onto `target`.
///
/// Clears to black, then draws `background` (if any), the cursor bar and the
/// three text layers. Anything falling outside `target` is clipped by it; the
/// cursor bar at its rightmost positions is partly off-screen.
///
/// # Errors
///
/// Returns `D::Error` if any drawing operation fails.
pub fn render_frame<D>(
    target: &mut D,
    frame: &Frame,
    background: Option<&ImageRaw<'_, BinaryColor>>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    if let Some(raw) = background {
        Image::new(raw, layout::BACKGROUND.top_left).draw(target)?;
    }

    cursor_frame(frame.cursor_x)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)?;

    let left = TextStyleBuilder::new()
        .alignment(Alignment::Left)
        .baseline(Baseline::Top)
        .build();
    let right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();
    let large = MonoTextStyle::new(layout::TIME_FONT, BinaryColor::On);
    let small = MonoTextStyle::new(layout::SMALL_FONT, BinaryColor::On);

    Text::with_text_style(
        &frame.text.time,
        layout::text_origin_right(&layout::TIME),
        large,
        right,
    )
    .draw(target)?;

    if let Some(am_pm) = &frame.text.am_pm {
        Text::with_text_style(am_pm, layout::text_origin(&layout::AM_PM), small, left)
            .draw(target)?;
    }

    Text::with_text_style(
        &frame.text.date,
        layout::text_origin(&layout::DATE),
        small,
        left,
    )
    .draw(target)?;

    Ok(())
}
