//! Color math - HSL conversion, hex conversion and recoloring
//!
//! All conversions work on linear values. RGB -> HSL normalizes by
//! `max(r, g, b, 1.0)` first, so over-bright colors are rescaled into the
//! unit range before hue and lightness are computed. That normalization is
//! lossy on purpose: two colors differing only by brightness scale share a
//! hue/lightness basis, and callers put the intensity back afterwards.

use super::types::{LinearColor, Rgb};
use crate::error::{Error, Result};

/// RGB -> HSL. Output components are in 0.0-1.0.
///
/// Achromatic input (`max == min` after normalization) yields `h = s = 0`.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let scale = r.max(g).max(b).max(1.0);
    let r_norm = r / scale;
    let g_norm = g / scale;
    let b_norm = b / scale;

    let max = r_norm.max(g_norm).max(b_norm);
    let min = r_norm.min(g_norm).min(b_norm);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r_norm {
        (g_norm - b_norm) / d + if g_norm < b_norm { 6.0 } else { 0.0 }
    } else if max == g_norm {
        (b_norm - r_norm) / d + 2.0
    } else {
        (r_norm - g_norm) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// HSL -> RGB, the inverse of [`rgb_to_hsl`] for unit-range colors.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parse `#rgb` or `#rrggbb` into 0.0-1.0 channels.
///
/// Lenient: any other length yields black, and invalid digits read as 0.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    if !hex.is_ascii() {
        return Rgb::default();
    }
    let digit = |s: &str| f64::from(u8::from_str_radix(s, 16).unwrap_or(0)) / 255.0;

    match hex.len() {
        4 => {
            let (r, g, b) = (&hex[1..2], &hex[2..3], &hex[3..4]);
            Rgb::new(
                digit(&r.repeat(2)),
                digit(&g.repeat(2)),
                digit(&b.repeat(2)),
            )
        }
        7 => Rgb::new(digit(&hex[1..3]), digit(&hex[3..5]), digit(&hex[5..7])),
        _ => Rgb::default(),
    }
}

/// Strict hex parsing for user input: optional `#`, then 3 or 6 hex digits.
pub fn parse_hex(input: &str) -> Result<Rgb> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(Error::InvalidHex(input.to_string()));
    }
    Ok(hex_to_rgb(&format!("#{digits}")))
}

/// Format a linear color as `#rrggbb` for display.
///
/// Over-bright colors are normalized by their max channel first so they show
/// as the closest representable hex.
pub fn rgba_to_display_hex(r: f64, g: f64, b: f64) -> String {
    let clean = |c: f64| if c.is_nan() { 0.0 } else { c };
    let (r, g, b) = (clean(r), clean(g), clean(b));
    let scale = r.max(g).max(b).max(1.0);

    let to_byte = |c: f64| (c / scale * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
}

/// Replace the RGB of `current` with `target`, alpha untouched.
///
/// With `preserve_intensity`, the target is normalized to its own max channel
/// and rescaled by the current max channel, so only hue and saturation move.
/// A zero max channel on either side produces pure black.
pub fn recolor(current: LinearColor, target: Rgb, preserve_intensity: bool) -> LinearColor {
    if !preserve_intensity {
        return current.with_rgb(target);
    }

    let original_intensity = current.max_channel();
    let target_max = target.max_channel();
    if original_intensity == 0.0 || target_max == 0.0 {
        return current.with_rgb(Rgb::default());
    }

    current.with_rgb(Rgb::new(
        target.r / target_max * original_intensity,
        target.g / target_max * original_intensity,
        target.b / target_max * original_intensity,
    ))
}

/// Rotate the hue of `current` by `degrees`, keeping its max channel.
///
/// The hue wraps into `[0, 1)` in both directions. The shifted color is
/// rescaled so its max channel equals the original's, which makes a 0 degree
/// shift an exact no-op for both HDR and unit-range colors.
pub fn shift_hue(current: LinearColor, degrees: f64) -> LinearColor {
    let intensity = current.max_channel();
    let (h, s, l) = rgb_to_hsl(current.r, current.g, current.b);
    let hue = (h + degrees / 360.0).rem_euclid(1.0);
    let (r, g, b) = hsl_to_rgb(hue, s, l);

    let shifted_max = r.max(g).max(b);
    if shifted_max <= 0.0 || intensity <= 0.0 {
        return current.with_rgb(Rgb::default());
    }
    let scale = intensity / shifted_max;
    current.with_rgb(Rgb::new(r * scale, g * scale, b * scale))
}
