//! Options shared by the bulk color transforms

/// Toggles consulted by every recolor path.
///
/// # Example
///
/// ```
/// use vfxtint::transform::TransformOptions;
///
/// let options = TransformOptions::new()
///     .with_ignore_grayscale(false)
///     .with_preserve_intensity(true);
/// assert!(!options.ignore_grayscale);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Leave parameters with R == G == B untouched.
    /// Default: true
    pub ignore_grayscale: bool,

    /// Keep each parameter's max channel when applying a new color.
    /// Hue shifts always preserve intensity regardless of this flag.
    /// Default: true
    pub preserve_intensity: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformOptions {
    /// Both guards enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ignore_grayscale: true,
            preserve_intensity: true,
        }
    }

    #[must_use]
    pub fn with_ignore_grayscale(mut self, value: bool) -> Self {
        self.ignore_grayscale = value;
        self
    }

    #[must_use]
    pub fn with_preserve_intensity(mut self, value: bool) -> Self {
        self.preserve_intensity = value;
        self
    }
}

/// Whether a recolor honors the grayscale option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrayscaleGuard {
    /// Skip grayscale parameters when `ignore_grayscale` is set.
    #[default]
    Respect,
    /// Always apply. Used by direct per-row edits.
    Bypass,
}
