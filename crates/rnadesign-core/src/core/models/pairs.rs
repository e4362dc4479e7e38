use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a canonical RNA base pair by the identity of its two bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PairKind {
    Gc,
    Au,
    Gu,
}

impl PairKind {
    pub const ALL: [PairKind; 3] = [PairKind::Gc, PairKind::Au, PairKind::Gu];

    /// The two bases of the pair, in the order used for display (e.g. `G-C`).
    pub fn bases(self) -> (char, char) {
        match self {
            PairKind::Gc => ('G', 'C'),
            PairKind::Au => ('A', 'U'),
            PairKind::Gu => ('G', 'U'),
        }
    }

    /// Classifies an unordered pair of nucleotides. `T` is read as `U`.
    pub fn classify(a: char, b: char) -> Option<PairKind> {
        let normalize = |c: char| match c.to_ascii_uppercase() {
            'T' => 'U',
            other => other,
        };
        match (normalize(a), normalize(b)) {
            ('G', 'C') | ('C', 'G') => Some(PairKind::Gc),
            ('A', 'U') | ('U', 'A') => Some(PairKind::Au),
            ('G', 'U') | ('U', 'G') => Some(PairKind::Gu),
            _ => None,
        }
    }
}

impl fmt::Display for PairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.bases();
        write!(f, "{}{}", a, b)
    }
}

/// Base-pair counts of one folded structure state, computed outside the constraint engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PairCountStatistics {
    pub gc: u32,
    pub au: u32,
    pub gu: u32,
}

impl PairCountStatistics {
    pub fn new(gc: u32, au: u32, gu: u32) -> Self {
        Self { gc, au, gu }
    }

    #[inline]
    pub fn count(&self, kind: PairKind) -> u32 {
        match kind {
            PairKind::Gc => self.gc,
            PairKind::Au => self.au,
            PairKind::Gu => self.gu,
        }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.gc.saturating_add(self.au).saturating_add(self.gu)
    }

    pub(crate) fn record(&mut self, kind: PairKind) {
        match kind {
            PairKind::Gc => self.gc += 1,
            PairKind::Au => self.au += 1,
            PairKind::Gu => self.gu += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_reads_the_matching_field() {
        let stats = PairCountStatistics::new(5, 2, 1);
        assert_eq!(stats.count(PairKind::Gc), 5);
        assert_eq!(stats.count(PairKind::Au), 2);
        assert_eq!(stats.count(PairKind::Gu), 1);
    }

    #[test]
    fn total_sums_all_three_kinds() {
        assert_eq!(PairCountStatistics::new(3, 3, 3).total(), 9);
        assert_eq!(PairCountStatistics::default().total(), 0);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let stats = PairCountStatistics::new(u32::MAX, 1, 1);
        assert_eq!(stats.total(), u32::MAX);
    }

    #[test]
    fn classify_is_order_independent_and_accepts_thymine() {
        assert_eq!(PairKind::classify('G', 'C'), Some(PairKind::Gc));
        assert_eq!(PairKind::classify('c', 'g'), Some(PairKind::Gc));
        assert_eq!(PairKind::classify('A', 'T'), Some(PairKind::Au));
        assert_eq!(PairKind::classify('U', 'G'), Some(PairKind::Gu));
        assert_eq!(PairKind::classify('A', 'G'), None);
        assert_eq!(PairKind::classify('A', 'A'), None);
    }

    #[test]
    fn display_joins_both_bases() {
        assert_eq!(PairKind::Gc.to_string(), "GC");
        assert_eq!(PairKind::Au.to_string(), "AU");
        assert_eq!(PairKind::Gu.to_string(), "GU");
    }
}
