use super::ConstraintError;
use super::pair::{ConstraintDescription, ConstraintStatus, DisplayContext, MinimumPairRequirement};
use crate::core::models::pairs::PairCountStatistics;
use std::str::FromStr;

/// The constraints of one puzzle, in definition order.
///
/// The wire form is a flat comma-separated list of alternating tags and values, e.g.
/// `GCMIN,5,PAIRS,10`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintSet {
    requirements: Vec<MinimumPairRequirement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStatus {
    pub statuses: Vec<(MinimumPairRequirement, ConstraintStatus)>,
    pub all_satisfied: bool,
}

impl ConstraintSet {
    pub fn new(requirements: Vec<MinimumPairRequirement>) -> Self {
        Self { requirements }
    }

    pub fn requirements(&self) -> &[MinimumPairRequirement] {
        &self.requirements
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn push(&mut self, requirement: MinimumPairRequirement) {
        self.requirements.push(requirement);
    }

    pub fn evaluate(&self, stats: &PairCountStatistics) -> SetStatus {
        let statuses: Vec<_> = self
            .requirements
            .iter()
            .map(|req| (*req, req.evaluate(stats)))
            .collect();
        let all_satisfied = statuses.iter().all(|(_, status)| status.satisfied);
        SetStatus {
            statuses,
            all_satisfied,
        }
    }

    pub fn describe(
        &self,
        stats: &PairCountStatistics,
        context: DisplayContext,
    ) -> Vec<ConstraintDescription> {
        self.requirements
            .iter()
            .map(|req| req.describe(&req.evaluate(stats), context))
            .collect()
    }

    pub fn serialize(&self) -> String {
        self.requirements
            .iter()
            .flat_map(|req| {
                let (tag, value) = req.serialize();
                [tag.to_string(), value]
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for ConstraintSet {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split(',').map(str::trim).filter(|t| !t.is_empty());
        let mut requirements = Vec::new();
        while let Some(tag) = tokens.next() {
            let value = tokens
                .next()
                .ok_or_else(|| ConstraintError::MissingValue(tag.to_string()))?;
            requirements.push(MinimumPairRequirement::deserialize(tag, value)?);
        }
        Ok(Self { requirements })
    }
}
