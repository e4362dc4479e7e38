use super::pairs::{PairCountStatistics, PairKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StructureError {
    #[error("Sequence length {sequence} does not match structure length {structure}")]
    LengthMismatch { sequence: usize, structure: usize },

    #[error("Unmatched ')' at position {0}")]
    UnmatchedClose(usize),

    #[error("Unmatched '(' at position {0}")]
    UnmatchedOpen(usize),

    #[error("Invalid structure symbol '{symbol}' at position {position}")]
    InvalidSymbol { position: usize, symbol: char },
}

/// Counts the canonical base pairs formed when `sequence` folds into the dot-bracket
/// `structure`.
///
/// Positions are matched with a stack, so pseudoknot-free structures only. Pairs whose bases
/// are not GC, AU or GU (in either orientation) are valid structurally but are not counted.
pub fn count_pairs(sequence: &str, structure: &str) -> Result<PairCountStatistics, StructureError> {
    let bases: Vec<char> = sequence.chars().collect();
    let symbols: Vec<char> = structure.chars().collect();
    if bases.len() != symbols.len() {
        return Err(StructureError::LengthMismatch {
            sequence: bases.len(),
            structure: symbols.len(),
        });
    }

    let mut stats = PairCountStatistics::default();
    let mut open = Vec::new();
    for (position, symbol) in symbols.iter().copied().enumerate() {
        match symbol {
            '(' => open.push(position),
            ')' => {
                let partner = open
                    .pop()
                    .ok_or(StructureError::UnmatchedClose(position))?;
                if let Some(kind) = PairKind::classify(bases[partner], bases[position]) {
                    stats.record(kind);
                }
            }
            '.' => {}
            other => {
                return Err(StructureError::InvalidSymbol {
                    position,
                    symbol: other,
                });
            }
        }
    }

    match open.pop() {
        Some(position) => Err(StructureError::UnmatchedOpen(position)),
        None => Ok(stats),
    }
}
