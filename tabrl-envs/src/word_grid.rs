//! Square letter grids with hidden words.
//!
//! This module only places letters; it has no notion of agents or rewards.
use anyhow::Result;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tabrl_core::error::TabrlError;

/// Direction in which a word is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right.
    H,
    /// Top to bottom.
    V,
    /// Down and to the right.
    D1,
    /// Down and to the left.
    D2,
}

impl Direction {
    /// All directions.
    pub const ALL: [Direction; 4] = [Direction::H, Direction::V, Direction::D1, Direction::D2];

    /// `(row, col)` offset between consecutive letters.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::H => (0, 1),
            Direction::V => (1, 0),
            Direction::D1 => (1, 1),
            Direction::D2 => (1, -1),
        }
    }
}

/// Difficulty presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// 8x8, horizontal and vertical words.
    Easy,
    /// 16x16, all directions.
    Hard,
    /// 32x32, all directions.
    Advance,
}

impl Level {
    /// Side length of the grid.
    pub fn size(self) -> usize {
        match self {
            Level::Easy => 8,
            Level::Hard => 16,
            Level::Advance => 32,
        }
    }

    /// Allowed word directions.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Level::Easy => &Direction::ALL[..2],
            Level::Hard | Level::Advance => &Direction::ALL,
        }
    }
}

/// Where a word was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    /// Direction of the word.
    pub direction: Direction,
}

impl Placement {
    /// Cell of the `i`-th letter.
    pub fn cell(&self, i: usize) -> (usize, usize) {
        let (dr, dc) = self.direction.offset();
        let r = self.row as isize + dr * i as isize;
        let c = self.col as isize + dc * i as isize;
        (r as usize, c as usize)
    }
}

/// A square grid of uppercase letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterGrid {
    cells: Vec<Vec<char>>,
}

impl LetterGrid {
    /// A grid of side `n` filled with uniformly drawn letters `A..=Z`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let cells = (0..n)
            .map(|_| (0..n).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect())
            .collect();
        Self { cells }
    }

    /// Builds a grid from its rows. All rows must have as many letters as there are rows.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let cells: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let n = cells.len();
        if n == 0 || cells.iter().any(|r| r.len() != n) {
            return Err(TabrlError::config("letter grid must be square and non-empty").into());
        }
        Ok(Self { cells })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Letter at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> char {
        self.cells[row][col]
    }

    /// Rows as strings.
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }

    /// Returns `true` if the letters at `placement` spell `word`.
    pub fn spells(&self, word: &str, placement: &Placement) -> bool {
        word.chars().enumerate().all(|(i, ch)| {
            let (r, c) = placement.cell(i);
            r < self.size() && c < self.size() && self.cells[r][c] == ch
        })
    }

    fn fits(&self, len: usize, placement: &Placement) -> bool {
        let n = self.size() as isize;
        let (dr, dc) = placement.direction.offset();
        let last = len as isize - 1;
        let r = placement.row as isize + dr * last;
        let c = placement.col as isize + dc * last;
        (0..n).contains(&r) && (0..n).contains(&c)
    }

    /// Writes `word` in one of `directions` from a uniformly drawn anchor.
    ///
    /// Draws that run off the grid are rejected and redrawn. Letters already on the grid
    /// are overwritten.
    pub fn hide_word<R: Rng + ?Sized>(
        &mut self,
        word: &str,
        directions: &[Direction],
        rng: &mut R,
    ) -> Result<Placement> {
        let len = word.chars().count();
        if len == 0 || len > self.size() {
            return Err(TabrlError::config(format!(
                "word {:?} does not fit in a grid of size {}",
                word,
                self.size()
            ))
            .into());
        }
        if directions.is_empty() {
            return Err(TabrlError::config("no direction allowed").into());
        }

        let n = self.size();
        loop {
            let placement = Placement {
                direction: *directions.choose(rng).unwrap_or(&Direction::H),
                row: rng.gen_range(0..n),
                col: rng.gen_range(0..n),
            };
            if self.fits(len, &placement) {
                for (i, ch) in word.chars().enumerate() {
                    let (r, c) = placement.cell(i);
                    self.cells[r][c] = ch;
                }
                return Ok(placement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_random_grid() {
        let mut rng = SmallRng::seed_from_u64(0);
        let grid = LetterGrid::random(Level::Hard.size(), &mut rng);
        assert_eq!(grid.size(), 16);
        assert!(grid
            .rows()
            .iter()
            .all(|r| r.len() == 16 && r.chars().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_hide_word() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(1);
        for level in [Level::Easy, Level::Hard, Level::Advance].iter() {
            let mut grid = LetterGrid::random(level.size(), &mut rng);
            for word in ["DATA", "AI", "MODEL", "RL", "TRAIN", "AGENT"].iter() {
                let placement = grid.hide_word(word, level.directions(), &mut rng)?;
                assert!(level.directions().contains(&placement.direction));
                assert!(grid.spells(word, &placement));
            }
        }
        Ok(())
    }

    #[test]
    fn test_word_too_long() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut grid = LetterGrid::from_rows(&["AB", "CD"])?;
        assert!(grid.hide_word("ABC", &Direction::ALL, &mut rng).is_err());
        assert!(grid.hide_word("AB", &[], &mut rng).is_err());
        Ok(())
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(LetterGrid::from_rows(&["AB", "C"]).is_err());
        assert!(LetterGrid::from_rows::<&str>(&[]).is_err());
    }
}
