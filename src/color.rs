//! 256-color palette helpers.
//!
//! Views take 8-bit palette indices. These helpers map RGB values onto the
//! 6x6x6 color cube (indices 16-231) and compute relative luminance so
//! callers can pick a readable foreground for a given background.

/// Channel levels of the xterm 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Map an RGB color to the nearest index of the 6x6x6 color cube.
///
/// # Examples
///
/// ```
/// use tervi::color;
///
/// assert_eq!(color::rgb(0, 0, 0), 16);
/// assert_eq!(color::rgb(255, 255, 255), 231);
/// assert_eq!(color::rgb(255, 0, 0), 196);
/// ```
pub fn rgb(red: u8, green: u8, blue: u8) -> u8 {
    16 + 36 * cube_index(red) + 6 * cube_index(green) + cube_index(blue)
}

/// RGB components of a cube index (16-231). Other indices return None.
pub fn cube_rgb(index: u8) -> Option<(u8, u8, u8)> {
    if !(16..=231).contains(&index) {
        return None;
    }
    let i = (index - 16) as usize;
    Some((CUBE_LEVELS[i / 36], CUBE_LEVELS[(i / 6) % 6], CUBE_LEVELS[i % 6]))
}

/// WCAG relative luminance of an sRGB color (0.0 = black, 1.0 = white).
pub fn relative_luminance(red: u8, green: u8, blue: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(red) + 0.7152 * channel(green) + 0.0722 * channel(blue)
}

/// Pick black (16) or bright white (15) for text drawn over `bg`.
pub fn contrast_fg(bg: u8) -> u8 {
    match cube_rgb(bg) {
        Some((r, g, b)) if relative_luminance(r, g, b) > 0.4 => 16,
        Some(_) => 15,
        None => 15,
    }
}

/// Snap a channel value to the closest cube level (midpoint thresholds).
fn cube_index(value: u8) -> u8 {
    CUBE_LEVELS
        .windows(2)
        .position(|pair| (value as u16) < (pair[0] as u16 + pair[1] as u16) / 2)
        .unwrap_or(CUBE_LEVELS.len() - 1) as u8
}
