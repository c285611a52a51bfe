use ratatui::style::Color;
use smogsense_core::Rgb;

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.red(), rgb.green(), rgb.blue())
}

/// `rgb` blended toward black, for translucent fills on a dark canvas.
pub fn faded(rgb: Rgb, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    // Stays within 0..=255 because opacity is clamped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |value: u8| (f64::from(value) * opacity).round() as u8;
    Color::Rgb(channel(rgb.red()), channel(rgb.green()), channel(rgb.blue()))
}

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: Rgb) -> Color {
    let luma = 0.114f64.mul_add(
        f64::from(background.blue()),
        0.299f64.mul_add(
            f64::from(background.red()),
            0.587 * f64::from(background.green()),
        ),
    );
    if luma > 140.0 {
        Color::Black
    } else {
        Color::White
    }
}
