//! Type definitions for linear color values

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An RGBA value in linear color space.
///
/// Channels are not clamped: values above 1.0 represent over-bright (HDR)
/// colors and are common in VFX materials. Every channel is finite; NaN and
/// unparseable input become 0 on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearColor {
    #[serde(rename = "R", default, deserialize_with = "deserialize_channel")]
    pub r: f64,
    #[serde(rename = "G", default, deserialize_with = "deserialize_channel")]
    pub g: f64,
    #[serde(rename = "B", default, deserialize_with = "deserialize_channel")]
    pub b: f64,
    #[serde(rename = "A", default, deserialize_with = "deserialize_channel")]
    pub a: f64,
}

impl LinearColor {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a JSON object exposing `R`, `G`, `B`, `A` fields.
    ///
    /// Missing or malformed channels become 0.
    pub fn from_json(value: &Value) -> Self {
        let channel = |key: &str| value.get(key).map_or(0.0, coerce_channel);
        Self {
            r: channel("R"),
            g: channel("G"),
            b: channel("B"),
            a: channel("A"),
        }
    }

    /// The largest of the R, G and B channels (the color's intensity).
    pub fn max_channel(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    /// True when R, G and B are exactly equal.
    pub fn is_grayscale(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Replace R, G and B, keeping alpha.
    #[must_use]
    pub fn with_rgb(self, rgb: Rgb) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a: self.a,
        }
    }

    #[must_use]
    pub fn with_channel(self, channel: Channel, value: f64) -> Self {
        let value = sanitize(value);
        let mut out = self;
        match channel {
            Channel::R => out.r = value,
            Channel::G => out.g = value,
            Channel::B => out.b = value,
            Channel::A => out.a = value,
        }
        out
    }

    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => self.a,
        }
    }

    /// Same color with every channel passed through NaN/infinity sanitization.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            r: sanitize(self.r),
            g: sanitize(self.g),
            b: sanitize(self.b),
            a: sanitize(self.a),
        }
    }
}

impl fmt::Display for LinearColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R={:.4} G={:.4} B={:.4} A={:.4}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// A bare RGB triple, used for target colors parsed from hex input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn max_channel(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }
}

/// One channel of an RGBA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];
}

/// Coerce a JSON value into a finite channel value.
///
/// Numbers pass through, strings are parsed from their leading numeric
/// prefix (`"0.5"`, `"1.25e0"`, `"2px"` -> 2), anything else is 0.
pub fn coerce_channel(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_leading_float(s),
        _ => 0.0,
    };
    sanitize(parsed)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let prefix_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    // Longest prefix that parses wins, e.g. "1.5e" -> 1.5
    (1..=prefix_len)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn deserialize_channel<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_channel(&value))
}
