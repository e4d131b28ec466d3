//! Random color codes that never repeat within a run

use std::{collections::HashSet, fmt, str::FromStr};

use rand::Rng;
use thiserror::Error;

/// Number of hex digits in a color code.
pub const CODE_LEN: usize = 6;

/// Number of distinct color codes (16^6).
pub const COLOR_SPACE: usize = 1 << 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("all 16^6 color codes have already been issued")]
    Exhausted,
    #[error("invalid color code `{0}`: expected six hex digits")]
    Invalid(String),
}

/// An RGB color, rendered as six upper-case hex digits, e.g. `1A2B3C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorCode(u32);

impl ColorCode {
    /// Color with the given `0xRRGGBB` value, `None` above `0xFFFFFF`.
    pub fn from_rgb(rgb: u32) -> Option<Self> {
        ((rgb as usize) < COLOR_SPACE).then_some(Self(rgb))
    }

    pub fn rgb(&self) -> u32 {
        self.0
    }

    /// The `#RRGGBB` form passed to the contract.
    pub fn hex(&self) -> String {
        format!("#{self}")
    }

    /// Every one of the six digits is uniform over `0-F`.
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..COLOR_SPACE as u32))
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

impl FromStr for ColorCode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != CODE_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Invalid(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColorError::Invalid(s.to_string()))
    }
}

/// Returns a color code that is not a member of `used`.
///
/// Rejection sampling: draws uniform codes until the result is new.
/// `used` is left untouched, recording the code is up to the caller.
pub fn next_color<R: Rng + ?Sized>(
    rng: &mut R,
    used: &HashSet<ColorCode>,
) -> Result<ColorCode, ColorError> {
    if used.len() >= COLOR_SPACE {
        return Err(ColorError::Exhausted);
    }
    loop {
        let color = ColorCode::sample(rng);
        if !used.contains(&color) {
            return Ok(color);
        }
    }
}

/// The set of colors issued during one run.
#[derive(Debug, Default, Clone)]
pub struct ColorRegistry {
    used: HashSet<ColorCode>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from colors that must not be handed out again.
    pub fn with_used(used: impl IntoIterator<Item = ColorCode>) -> Self {
        Self { used: used.into_iter().collect() }
    }

    /// Draw a fresh color and remember it.
    pub fn issue<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ColorCode, ColorError> {
        let color = next_color(rng, &self.used)?;
        self.used.insert(color);
        Ok(color)
    }

    /// Draw `count` fresh colors, in issue order.
    pub fn issue_many<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<ColorCode>, ColorError> {
        (0..count).map(|_| self.issue(&mut *rng)).collect()
    }

    pub fn contains(&self, color: &ColorCode) -> bool {
        self.used.contains(color)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
