//! Pairwise win probabilities and the help table.

use crate::dice::Die;
use std::fmt;

/// Displayed probability for a die playing against itself.
///
/// Self-play is even by convention. The literal pairwise computation over
/// identical face multisets is not exactly 0.5 for dice with repeated
/// values, so the diagonal is pinned rather than computed.
pub const SELF_PLAY_PROBABILITY: f64 = 0.5;

/// Probability that a roll of `a` strictly beats a roll of `b`.
///
/// Counts winning pairs over the full Cartesian product of faces. Ties
/// count as neither a win nor a loss.
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    let wins = a
        .faces()
        .iter()
        .flat_map(|fa| b.faces().iter().map(move |fb| (fa, fb)))
        .filter(|(fa, fb)| fa > fb)
        .count();
    wins as f64 / (a.face_count() * b.face_count()) as f64
}

/// Probability that rolls of `a` and `b` tie
pub fn tie_probability(a: &Die, b: &Die) -> f64 {
    let ties = a
        .faces()
        .iter()
        .flat_map(|fa| b.faces().iter().map(move |fb| (fa, fb)))
        .filter(|(fa, fb)| fa == fb)
        .count();
    ties as f64 / (a.face_count() * b.face_count()) as f64
}

/// N x N win-probability matrix over a dice set
///
/// Row = the user's die, column = the rival's die. The diagonal holds
/// [`SELF_PLAY_PROBABILITY`] and is rendered distinct from computed cells.
#[derive(Clone, Debug)]
pub struct ProbabilityTable {
    labels: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl ProbabilityTable {
    pub fn new(dice: &[Die]) -> Self {
        let labels = dice.iter().map(ToString::to_string).collect();
        let cells = (0..dice.len())
            .map(|row| {
                (0..dice.len())
                    .map(|col| {
                        if row == col {
                            SELF_PLAY_PROBABILITY
                        } else {
                            win_probability(&dice[row], &dice[col])
                        }
                    })
                    .collect()
            })
            .collect();
        Self { labels, cells }
    }

    /// Number of dice in the table
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Probability in the given cell
    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }
}

impl fmt::Display for ProbabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CORNER: &str = "user \\ rival";

        let longest_label = self.labels.iter().map(String::len).max().unwrap_or(0);
        let label_width = longest_label.max(CORNER.len());
        // "- 0.50" is the widest cell rendering
        let cell_width = longest_label.max(6);

        write!(f, "{CORNER:<label_width$}")?;
        for label in &self.labels {
            write!(f, " | {label:<cell_width$}")?;
        }
        writeln!(f)?;

        for (row, label) in self.labels.iter().enumerate() {
            write!(f, "{label:<label_width$}")?;
            for col in 0..self.labels.len() {
                let cell = if row == col {
                    format!("- {:.2}", self.cells[row][col])
                } else {
                    format!("{:.2}", self.cells[row][col])
                };
                write!(f, " | {cell:<cell_width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
