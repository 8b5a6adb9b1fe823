//! Color module - linear color values and the math behind every transform
//!
//! - [`LinearColor`]: an unclamped RGBA value as stored in the asset exports
//! - RGB/HSL conversion normalized by intensity so HDR values keep a usable hue
//! - Hex parsing and display formatting
//! - Intensity-preserving recolor

mod math;
mod types;

pub use math::{
    hex_to_rgb, hsl_to_rgb, parse_hex, recolor, rgb_to_hsl, rgba_to_display_hex, shift_hue,
};
pub use types::{coerce_channel, Channel, LinearColor, Rgb};
