//! Tile colors and dealing.
//!
//! A deal is built by drawing one distinct color per pair, duplicating each
//! color, and shuffling the result uniformly.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::BoardSize;

/// A 24-bit RGB color hidden under a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draws a uniformly random color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Draws `count` pairwise distinct random colors.
#[instrument(skip(rng))]
pub fn random_palette<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Color> {
    let mut seen = HashSet::with_capacity(count);
    let mut palette = Vec::with_capacity(count);

    while palette.len() < count {
        let color = Color::random(rng);
        if seen.insert(color) {
            palette.push(color);
        } else {
            debug!(%color, "Discarding duplicate color");
        }
    }

    palette
}

/// Duplicates every palette color and shuffles the pairs into a deal.
///
/// The shuffle is a Fisher-Yates permutation, so every ordering of the
/// resulting sequence is equally likely.
#[instrument(skip(palette, rng), fields(pairs = palette.len()))]
pub fn deal_palette<R: Rng + ?Sized>(palette: &[Color], rng: &mut R) -> Vec<Color> {
    let mut colors: Vec<Color> = palette.iter().flat_map(|&color| [color, color]).collect();
    colors.shuffle(rng);
    colors
}

/// Deals a fresh, shuffled color assignment for a board.
#[instrument(skip(rng))]
pub fn deal<R: Rng + ?Sized>(board_size: BoardSize, rng: &mut R) -> Vec<Color> {
    let palette = random_palette(board_size.pairs(), rng);
    deal_palette(&palette, rng)
}
