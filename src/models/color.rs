//! Display color attached to each process.
//!
//! The color is opaque to the scheduler. It exists so a presentation
//! layer can tell processes apart across the ready and completed lists.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest 24-bit RGB value.
const MAX_RGB: u32 = 0xFF_FFFF;

/// A 24-bit RGB color, rendered as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTag(u32);

impl ColorTag {
    /// Creates a color from an RGB value. Bits above 24 are discarded.
    pub fn new(rgb: u32) -> Self {
        Self(rgb & MAX_RGB)
    }

    /// Draws a uniformly random color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..MAX_RGB))
    }

    /// Raw RGB value.
    pub fn rgb(&self) -> u32 {
        self.0
    }

    /// Hex form used by the presentation layer.
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self(0x80_80_80)
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(ColorTag::new(0xff).to_hex(), "#0000ff");
        assert_eq!(ColorTag::new(0x12_34_56).to_string(), "#123456");
    }

    #[test]
    fn test_new_masks_high_bits() {
        assert_eq!(ColorTag::new(0xFF12_3456).rgb(), 0x12_3456);
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = ColorTag::random(&mut rng);
            assert!(c.rgb() < MAX_RGB);
            assert_eq!(c.to_hex().len(), 7);
        }
    }
}
