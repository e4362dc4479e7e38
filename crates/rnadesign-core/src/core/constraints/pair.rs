use super::ConstraintError;
use super::variants::{self, ConstraintVariant};
use crate::core::models::pairs::{PairCountStatistics, PairKind};
use std::fmt;

/// Which count a minimum-pair requirement reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairRequirementKind {
    Single(PairKind),
    /// Every canonical pair, regardless of kind.
    Any,
}

/// "At least `min_count` pairs of `kind`". Fixed when the puzzle is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinimumPairRequirement {
    pub kind: PairRequirementKind,
    pub min_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintStatus {
    pub satisfied: bool,
    pub current_count: u32,
}

/// Which screen a constraint is described for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayContext {
    #[default]
    Puzzle,
    Mission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDescription {
    pub satisfied: bool,
    pub clarification_text: String,
    pub summary_text: String,
    pub tooltip_text: String,
    pub icon: &'static str,
    pub show_outline: bool,
}

impl MinimumPairRequirement {
    pub fn new(kind: PairRequirementKind, min_count: u32) -> Self {
        Self { kind, min_count }
    }

    pub fn gc(min_count: u32) -> Self {
        Self::new(PairRequirementKind::Single(PairKind::Gc), min_count)
    }

    pub fn au(min_count: u32) -> Self {
        Self::new(PairRequirementKind::Single(PairKind::Au), min_count)
    }

    pub fn gu(min_count: u32) -> Self {
        Self::new(PairRequirementKind::Single(PairKind::Gu), min_count)
    }

    pub fn any(min_count: u32) -> Self {
        Self::new(PairRequirementKind::Any, min_count)
    }

    pub fn variant(&self) -> &'static ConstraintVariant {
        // Every kind has a table entry; `variants` tests pin this.
        match variants::by_tag(variants::tag_of(self.kind)) {
            Some(variant) => variant,
            None => unreachable!("no constraint variant registered for {:?}", self.kind),
        }
    }

    pub fn current_count(&self, stats: &PairCountStatistics) -> u32 {
        match self.kind {
            PairRequirementKind::Single(kind) => stats.count(kind),
            PairRequirementKind::Any => stats.total(),
        }
    }

    pub fn evaluate(&self, stats: &PairCountStatistics) -> ConstraintStatus {
        let current_count = self.current_count(stats);
        ConstraintStatus {
            satisfied: current_count >= self.min_count,
            current_count,
        }
    }

    /// Evaluates against the states of a possibly multi-state design.
    ///
    /// Only the first state is considered. Callers must supply at least one state; an empty
    /// slice trips a debug assertion and evaluates an all-zero snapshot in release builds.
    pub fn evaluate_states(&self, states: &[PairCountStatistics]) -> ConstraintStatus {
        debug_assert!(
            !states.is_empty(),
            "constraint evaluated without pair statistics"
        );
        let stats = states.first().copied().unwrap_or_default();
        self.evaluate(&stats)
    }

    pub fn describe(
        &self,
        status: &ConstraintStatus,
        context: DisplayContext,
    ) -> ConstraintDescription {
        let variant = self.variant();
        let tooltip_text = match self.kind {
            PairRequirementKind::Single(kind) => {
                let (a, b) = kind.bases();
                format!("You must have {} or more {}-{} pairs.", self.min_count, a, b)
            }
            PairRequirementKind::Any => format!("You must have {} or more pairs.", self.min_count),
        };
        ConstraintDescription {
            satisfied: status.satisfied,
            clarification_text: format!("{} OR MORE", self.min_count),
            summary_text: status.current_count.to_string(),
            tooltip_text,
            icon: match context {
                DisplayContext::Puzzle => variant.icon,
                DisplayContext::Mission => variant.mission_icon,
            },
            show_outline: true,
        }
    }

    pub fn serialize(&self) -> (&'static str, String) {
        (variants::tag_of(self.kind), self.min_count.to_string())
    }

    pub fn deserialize(tag: &str, value: &str) -> Result<Self, ConstraintError> {
        let variant =
            variants::by_tag(tag).ok_or_else(|| ConstraintError::UnknownTag(tag.to_string()))?;
        let min_count = value
            .trim()
            .parse::<u32>()
            .map_err(|_| ConstraintError::InvalidCount {
                tag: tag.to_string(),
                value: value.to_string(),
            })?;
        Ok(Self::new(variant.kind, min_count))
    }
}

impl fmt::Display for MinimumPairRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PairRequirementKind::Single(kind) => write!(f, "{} {} or more", kind, self.min_count),
            PairRequirementKind::Any => write!(f, "pairs {} or more", self.min_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gc_requirement_is_met_at_exactly_the_threshold() {
        let req = MinimumPairRequirement::gc(5);
        let status = req.evaluate(&PairCountStatistics::new(5, 2, 1));
        assert_eq!(
            status,
            ConstraintStatus {
                satisfied: true,
                current_count: 5
            }
        );
    }

    #[test]
    fn gc_requirement_ignores_other_pair_kinds() {
        let req = MinimumPairRequirement::gc(5);
        let status = req.evaluate(&PairCountStatistics::new(4, 9, 9));
        assert_eq!(
            status,
            ConstraintStatus {
                satisfied: false,
                current_count: 4
            }
        );
    }

    #[test]
    fn any_requirement_sums_all_pair_kinds() {
        let req = MinimumPairRequirement::any(10);
        let status = req.evaluate(&PairCountStatistics::new(3, 3, 3));
        assert_eq!(status.current_count, 9);
        assert!(!status.satisfied);

        let status = req.evaluate(&PairCountStatistics::new(4, 3, 3));
        assert!(status.satisfied);
    }

    #[test]
    fn satisfied_matches_threshold_comparison_for_every_kind() {
        let requirements = [
            MinimumPairRequirement::gc(3),
            MinimumPairRequirement::au(3),
            MinimumPairRequirement::gu(3),
            MinimumPairRequirement::any(3),
        ];
        for gc in 0..4 {
            for au in 0..4 {
                for gu in 0..4 {
                    let stats = PairCountStatistics::new(gc, au, gu);
                    for req in requirements {
                        let status = req.evaluate(&stats);
                        assert_eq!(status.satisfied, req.current_count(&stats) >= req.min_count);
                    }
                }
            }
        }
    }

    #[test]
    fn zero_threshold_is_always_satisfied() {
        let status = MinimumPairRequirement::au(0).evaluate(&PairCountStatistics::default());
        assert!(status.satisfied);
        assert_eq!(status.current_count, 0);
    }

    #[test]
    fn evaluate_states_uses_only_the_first_state() {
        let req = MinimumPairRequirement::gu(2);
        let states = [
            PairCountStatistics::new(0, 0, 2),
            PairCountStatistics::new(0, 0, 0),
        ];
        assert!(req.evaluate_states(&states).satisfied);
    }

    #[test]
    fn describe_formats_threshold_and_current_count() {
        let req = MinimumPairRequirement::gc(5);
        let status = req.evaluate(&PairCountStatistics::new(7, 0, 0));
        let desc = req.describe(&status, DisplayContext::Puzzle);
        assert!(desc.satisfied);
        assert_eq!(desc.clarification_text, "5 OR MORE");
        assert_eq!(desc.summary_text, "7");
        assert_eq!(desc.tooltip_text, "You must have 5 or more G-C pairs.");
        assert_eq!(desc.icon, "nova-gc-req");
        assert!(desc.show_outline);
    }

    #[test]
    fn describe_uses_generic_tooltip_and_mission_icon_for_any_pairs() {
        let req = MinimumPairRequirement::any(12);
        let status = req.evaluate(&PairCountStatistics::new(1, 1, 1));
        let desc = req.describe(&status, DisplayContext::Mission);
        assert!(!desc.satisfied);
        assert_eq!(desc.tooltip_text, "You must have 12 or more pairs.");
        assert_eq!(desc.summary_text, "3");
        assert_eq!(desc.icon, "nova-pairs-mission-req");
    }

    #[test]
    fn serialize_uses_one_fixed_tag_per_kind() {
        assert_eq!(MinimumPairRequirement::gc(5).serialize(), ("GCMIN", "5".to_string()));
        assert_eq!(MinimumPairRequirement::au(2).serialize(), ("AU", "2".to_string()));
        assert_eq!(MinimumPairRequirement::gu(0).serialize(), ("GU", "0".to_string()));
        assert_eq!(MinimumPairRequirement::any(11).serialize(), ("PAIRS", "11".to_string()));
    }

    #[test]
    fn deserialize_inverts_serialize() {
        for threshold in [0, 1, 7, 1000, u32::MAX] {
            for req in [
                MinimumPairRequirement::gc(threshold),
                MinimumPairRequirement::au(threshold),
                MinimumPairRequirement::gu(threshold),
                MinimumPairRequirement::any(threshold),
            ] {
                let (tag, value) = req.serialize();
                assert_eq!(MinimumPairRequirement::deserialize(tag, &value), Ok(req));
            }
        }
    }

    #[test]
    fn deserialize_rejects_unknown_tags_and_bad_counts() {
        assert_eq!(
            MinimumPairRequirement::deserialize("SHAPE", "3"),
            Err(ConstraintError::UnknownTag("SHAPE".to_string()))
        );
        assert_eq!(
            MinimumPairRequirement::deserialize("AU", "-1"),
            Err(ConstraintError::InvalidCount {
                tag: "AU".to_string(),
                value: "-1".to_string()
            })
        );
        assert!(MinimumPairRequirement::deserialize("GU", "three").is_err());
    }
}
