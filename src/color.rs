// src/color.rs

use crate::rectangle::Rgb;
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;

/// Draws a uniformly random opaque color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let mut channels = [0u8; 3];
    rng.fill(&mut channels);
    let [r, g, b] = channels;
    Rgb::new(r, g, b)
}

impl Rgb {
    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
