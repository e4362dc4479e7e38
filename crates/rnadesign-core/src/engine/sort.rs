use crate::core::models::category::DesignCategory;
use crate::core::models::solution::{PropertyValue, Solution};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SortError {
    #[error("Unknown sort order '{0}'. Expected 'asc' or 'desc'.")]
    UnknownOrder(String),

    #[error("Column '{0}' cannot be sorted here")]
    NotSortable(DesignCategory),

    #[error("Sorting by sequence requires a reference sequence")]
    MissingReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reverse(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "increasing" | "up" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "decreasing" | "down" => Ok(SortOrder::Descending),
            _ => Err(SortError::UnknownOrder(s.to_string())),
        }
    }
}

/// Secondary parameters of a sort key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortArgs {
    #[default]
    None,
    /// Rank sequences by their distance to this sequence.
    ReferenceSequence(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    pub category: DesignCategory,
    pub order: SortOrder,
    pub args: SortArgs,
}

impl SortCriterion {
    pub fn new(category: DesignCategory, order: SortOrder) -> Self {
        Self {
            category,
            order,
            args: SortArgs::None,
        }
    }

    pub fn with_args(mut self, args: SortArgs) -> Self {
        self.args = args;
        self
    }

    pub fn compare(&self, a: &Solution, b: &Solution) -> Ordering {
        let ordering = match (&self.args, self.category) {
            (SortArgs::ReferenceSequence(reference), DesignCategory::Sequence) => {
                mismatches(&a.sequence, reference).cmp(&mismatches(&b.sequence, reference))
            }
            (_, category) => compare_values(a.property(category), b.property(category)),
        };
        self.order.apply(ordering)
    }
}

/// Ordered sort keys. Earlier criteria take precedence; later ones only break ties.
///
/// Each category appears at most once. Re-adding a category updates it in place, so its
/// tie-break position is kept.
#[derive(Debug, Clone, Default)]
pub struct SortSpecification {
    criteria: Vec<SortCriterion>,
    positions: HashMap<DesignCategory, usize>,
}

impl SortSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_criterion(&mut self, category: DesignCategory, order: SortOrder, args: SortArgs) {
        match self.positions.get(&category) {
            Some(&index) => {
                let criterion = &mut self.criteria[index];
                criterion.order = order;
                criterion.args = args;
            }
            None => {
                self.positions.insert(category, self.criteria.len());
                self.criteria.push(SortCriterion {
                    category,
                    order,
                    args,
                });
            }
        }
    }

    pub fn remove_criterion(&mut self, category: DesignCategory) -> Option<SortCriterion> {
        let index = self.positions.remove(&category)?;
        let removed = self.criteria.remove(index);
        for position in self.positions.values_mut() {
            if *position > index {
                *position -= 1;
            }
        }
        Some(removed)
    }

    pub fn order_of(&self, category: DesignCategory) -> Option<SortOrder> {
        self.positions
            .get(&category)
            .map(|&index| self.criteria[index].order)
    }

    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn compare(&self, a: &Solution, b: &Solution) -> Ordering {
        self.criteria
            .iter()
            .map(|criterion| criterion.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable sort: solutions equal under every criterion keep their relative order.
    pub fn sort(&self, solutions: &mut [Solution]) {
        if self.criteria.is_empty() {
            return;
        }
        solutions.sort_by(|a, b| self.compare(a, b));
    }
}

/// Total order over column values of one type. Missing values and NaN rank after everything
/// else in ascending order.
fn compare_values(a: PropertyValue<'_>, b: PropertyValue<'_>) -> Ordering {
    match (a, b) {
        (PropertyValue::Missing, PropertyValue::Missing) => Ordering::Equal,
        (PropertyValue::Missing, _) => Ordering::Greater,
        (_, PropertyValue::Missing) => Ordering::Less,
        (PropertyValue::Int(x), PropertyValue::Int(y)) => x.cmp(&y),
        (PropertyValue::UInt(x), PropertyValue::UInt(y)) => x.cmp(&y),
        (PropertyValue::Text(x), PropertyValue::Text(y)) => compare_text(x, y),
        (PropertyValue::Flag(x), PropertyValue::Flag(y)) => x.cmp(&y),
        (x, y) => match (x.as_number(), y.as_number()) {
            (Some(x), Some(y)) => compare_numbers(x, y),
            _ => Ordering::Equal,
        },
    }
}

fn compare_numbers(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y)
        .unwrap_or_else(|| x.is_nan().cmp(&y.is_nan()))
}

fn compare_text(x: &str, y: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(x).cmp(&folded(y)).then_with(|| x.cmp(y))
}

/// Hamming distance, counting any length difference as mismatches.
fn mismatches(sequence: &str, reference: &str) -> usize {
    let mut a = sequence.chars();
    let mut b = reference.chars();
    let mut count = 0;
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => {
                if !x.eq_ignore_ascii_case(&y) {
                    count += 1;
                }
            }
            (Some(_), None) | (None, Some(_)) => count += 1,
            (None, None) => return count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::SolutionId;

    fn solution(id: u64, title: &str, votes: u32) -> Solution {
        Solution {
            id: SolutionId(id),
            title: title.to_string(),
            votes,
            ..Default::default()
        }
    }

    #[test]
    fn later_criteria_break_ties_of_earlier_ones() {
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Votes, SortOrder::Descending, SortArgs::None);
        spec.add_criterion(DesignCategory::Title, SortOrder::Ascending, SortArgs::None);

        let a = solution(1, "A", 5);
        let b = solution(2, "B", 5);
        assert_eq!(spec.compare(&a, &b), Ordering::Less);

        let c = solution(3, "C", 9);
        assert_eq!(spec.compare(&c, &a), Ordering::Less);
    }

    #[test]
    fn re_adding_a_category_updates_it_in_place() {
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Votes, SortOrder::Descending, SortArgs::None);
        spec.add_criterion(DesignCategory::Title, SortOrder::Ascending, SortArgs::None);
        spec.add_criterion(DesignCategory::Votes, SortOrder::Ascending, SortArgs::None);

        let categories: Vec<_> = spec.criteria().iter().map(|c| c.category).collect();
        assert_eq!(categories, vec![DesignCategory::Votes, DesignCategory::Title]);
        assert_eq!(spec.order_of(DesignCategory::Votes), Some(SortOrder::Ascending));
    }

    #[test]
    fn remove_criterion_keeps_the_remaining_sequence() {
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Round, SortOrder::Ascending, SortArgs::None);
        spec.add_criterion(DesignCategory::Votes, SortOrder::Descending, SortArgs::None);
        spec.add_criterion(DesignCategory::Title, SortOrder::Ascending, SortArgs::None);

        assert!(spec.remove_criterion(DesignCategory::Round).is_some());
        assert!(spec.remove_criterion(DesignCategory::Round).is_none());
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.order_of(DesignCategory::Title), Some(SortOrder::Ascending));

        spec.add_criterion(DesignCategory::Title, SortOrder::Descending, SortArgs::None);
        let categories: Vec<_> = spec.criteria().iter().map(|c| c.category).collect();
        assert_eq!(categories, vec![DesignCategory::Votes, DesignCategory::Title]);
        assert_eq!(spec.order_of(DesignCategory::Title), Some(SortOrder::Descending));
    }

    #[test]
    fn reversing_a_criterion_flips_the_comparison() {
        let a = solution(1, "A", 1);
        let b = solution(2, "A", 2);
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Votes, SortOrder::Ascending, SortArgs::None);
        let forward = spec.compare(&a, &b);
        spec.add_criterion(DesignCategory::Votes, SortOrder::Descending, SortArgs::None);
        assert_eq!(spec.compare(&a, &b), forward.reverse());
        assert_ne!(forward, Ordering::Equal);
    }

    #[test]
    fn sort_is_stable_for_fully_tied_solutions() {
        let mut solutions = vec![
            solution(1, "x", 2),
            solution(2, "y", 1),
            solution(3, "z", 2),
            solution(4, "w", 1),
        ];
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Votes, SortOrder::Descending, SortArgs::None);
        spec.sort(&mut solutions);

        let ids: Vec<_> = solutions.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn empty_specification_leaves_order_untouched() {
        let mut solutions = vec![solution(2, "b", 0), solution(1, "a", 0)];
        SortSpecification::new().sort(&mut solutions);
        assert_eq!(solutions[0].id, SolutionId(2));
        assert_eq!(
            SortSpecification::new().compare(&solutions[0], &solutions[1]),
            Ordering::Equal
        );
    }

    #[test]
    fn text_comparison_folds_case_first() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Apple", "apple"), Ordering::Less);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn missing_and_nan_values_rank_last_in_ascending_order() {
        assert_eq!(
            compare_values(PropertyValue::Missing, PropertyValue::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(PropertyValue::Number(f64::NAN), PropertyValue::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(PropertyValue::Number(f64::NAN), PropertyValue::Number(f64::NAN)),
            Ordering::Equal
        );
    }

    #[test]
    fn ids_above_the_signed_range_sort_after_small_ones() {
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Id, SortOrder::Ascending, SortArgs::None);
        let mut solutions = vec![solution(u64::MAX, "Big", 0), solution(1, "Small", 0)];
        spec.sort(&mut solutions);
        let ids: Vec<_> = solutions.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, u64::MAX]);

        spec.add_criterion(DesignCategory::Id, SortOrder::Descending, SortArgs::None);
        spec.sort(&mut solutions);
        assert_eq!(solutions[0].id, SolutionId(u64::MAX));
    }

    #[test]
    fn booleans_sort_false_before_true() {
        let mut spec = SortSpecification::new();
        spec.add_criterion(DesignCategory::Synthesized, SortOrder::Ascending, SortArgs::None);
        let yes = Solution {
            synthesized: true,
            ..Default::default()
        };
        let no = Solution::default();
        assert_eq!(spec.compare(&no, &yes), Ordering::Less);
    }

    #[test]
    fn reference_sequence_ranks_by_similarity() {
        let mut spec = SortSpecification::new();
        spec.add_criterion(
            DesignCategory::Sequence,
            SortOrder::Ascending,
            SortArgs::ReferenceSequence("GGGAAACCC".to_string()),
        );
        let close = Solution {
            sequence: "GGGAAACCA".to_string(),
            ..Default::default()
        };
        let far = Solution {
            sequence: "AAAAAAAAA".to_string(),
            ..Default::default()
        };
        assert_eq!(spec.compare(&close, &far), Ordering::Less);
    }

    #[test]
    fn mismatches_count_length_differences() {
        assert_eq!(mismatches("ACGU", "ACGU"), 0);
        assert_eq!(mismatches("acgu", "ACGA"), 1);
        assert_eq!(mismatches("AC", "ACGU"), 2);
        assert_eq!(mismatches("", "AC"), 2);
    }

    #[test]
    fn sort_order_parses_common_spellings() {
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert_eq!("increasing".parse::<SortOrder>(), Ok(SortOrder::Ascending));
        assert_eq!(
            "sideways".parse::<SortOrder>(),
            Err(SortError::UnknownOrder("sideways".to_string()))
        );
    }
}
