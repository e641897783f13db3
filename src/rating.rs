use std::fmt;

pub const DEFAULT_OUT_OF: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Full,
    Half,
    Empty,
}

impl Glyph {
    pub fn symbol(self) -> char {
        match self {
            Glyph::Full => '★',
            Glyph::Half => '½',
            Glyph::Empty => '☆',
        }
    }
}

/// Star rendering of a numeric rating.
///
/// `floor(rating)` full stars, one half star when the remainder is at least
/// 0.5, and empty stars for the rest, `out_of` glyphs in total.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRating {
    out_of: u32,
    full: u32,
    half: bool,
}

impl StarRating {
    pub fn new(rating: f64, out_of: u32) -> Self {
        let out_of = out_of.max(1);
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, f64::from(out_of))
        };
        let full = rating.floor() as u32;
        let half = rating - rating.floor() >= 0.5;
        Self {
            out_of,
            full,
            half,
        }
    }

    pub fn out_of_five(rating: f64) -> Self {
        Self::new(rating, DEFAULT_OUT_OF)
    }

    pub fn full_count(&self) -> u32 {
        self.full
    }

    pub fn has_half(&self) -> bool {
        self.half
    }

    pub fn empty_count(&self) -> u32 {
        self.out_of
            .saturating_sub(self.full)
            .saturating_sub(u32::from(self.half))
    }

    pub fn glyphs(&self) -> Vec<Glyph> {
        let mut glyphs = Vec::with_capacity(self.out_of as usize);
        glyphs.extend((0..self.full).map(|_| Glyph::Full));
        if self.half {
            glyphs.push(Glyph::Half);
        }
        glyphs.extend((0..self.empty_count()).map(|_| Glyph::Empty));
        glyphs
    }

    /// Rating selected by clicking the glyph at `index` (0-based): `index + 1`
    /// for full and empty stars, `full + 0.5` for the half star.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        let glyph = self.glyphs().get(index).copied()?;
        Some(match glyph {
            Glyph::Half => f64::from(self.full) + 0.5,
            Glyph::Full | Glyph::Empty => (index + 1) as f64,
        })
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.glyphs()
            .into_iter()
            .try_for_each(|glyph| write!(f, "{}", glyph.symbol()))
    }
}
