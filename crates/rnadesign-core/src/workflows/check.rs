use crate::core::constraints::pair::{ConstraintDescription, DisplayContext};
use crate::core::constraints::set::{ConstraintSet, SetStatus};
use crate::core::models::ids::SolutionId;
use crate::core::models::pairs::PairCountStatistics;
use crate::core::models::solution::Solution;
use crate::core::models::structure;
use crate::engine::error::EngineError;
use tracing::{debug, info, instrument};

/// Where a solution's pair counts come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PairSource {
    /// The pair-count columns recorded with each solution.
    #[default]
    Recorded,
    /// Count the pairs each sequence forms in this dot-bracket target structure.
    Structure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionCheck {
    pub solution_id: SolutionId,
    pub title: String,
    pub stats: PairCountStatistics,
    pub status: SetStatus,
    pub descriptions: Vec<ConstraintDescription>,
}

impl SolutionCheck {
    pub fn passed(&self) -> bool {
        self.status.all_satisfied
    }
}

#[instrument(skip_all, name = "check_workflow")]
pub fn run(
    solutions: &[Solution],
    constraints: &ConstraintSet,
    context: DisplayContext,
    source: &PairSource,
) -> Result<Vec<SolutionCheck>, EngineError> {
    info!(
        "Checking {} solution(s) against {} constraint(s).",
        solutions.len(),
        constraints.len()
    );

    let checks = solutions
        .iter()
        .map(|solution| {
            let stats = match source {
                PairSource::Recorded => solution.pair_counts(),
                PairSource::Structure(target) => structure::count_pairs(&solution.sequence, target)
                    .map_err(|e| EngineError::Structure {
                        solution_id: solution.id,
                        source: e,
                    })?,
            };
            let status = constraints.evaluate(&stats);
            debug!(
                "Solution {}: {} GC, {} AU, {} GU; satisfied: {}.",
                solution.id, stats.gc, stats.au, stats.gu, status.all_satisfied
            );
            Ok(SolutionCheck {
                solution_id: solution.id,
                title: solution.title.clone(),
                stats,
                descriptions: constraints.describe(&stats, context),
                status,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    let passed = checks.iter().filter(|c| c.passed()).count();
    info!("{} of {} solution(s) satisfy every constraint.", passed, checks.len());
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::StructureError;

    fn solution(id: u64, sequence: &str, pairs: (u32, u32, u32)) -> Solution {
        Solution {
            id: SolutionId(id),
            sequence: sequence.to_string(),
            gc_pairs: pairs.0,
            au_pairs: pairs.1,
            gu_pairs: pairs.2,
            ..Default::default()
        }
    }

    #[test]
    fn recorded_counts_are_checked_against_every_constraint() {
        let constraints: ConstraintSet = "GCMIN,2,PAIRS,4".parse().unwrap();
        let solutions = [solution(1, "", (2, 1, 1)), solution(2, "", (3, 0, 0))];
        let checks = run(&solutions, &constraints, DisplayContext::Puzzle, &PairSource::Recorded)
            .unwrap();

        assert!(checks[0].passed());
        assert!(!checks[1].passed());
        assert_eq!(checks[1].descriptions[1].summary_text, "3");
        assert_eq!(checks[1].descriptions[1].clarification_text, "4 OR MORE");
    }

    #[test]
    fn target_structure_counts_pairs_from_each_sequence() {
        let constraints: ConstraintSet = "GCMIN,3".parse().unwrap();
        let solutions = [
            solution(1, "GGGAAACCC", (0, 0, 0)),
            solution(2, "GAGAAACUC", (0, 0, 0)),
        ];
        let source = PairSource::Structure("(((...)))".to_string());
        let checks = run(&solutions, &constraints, DisplayContext::Mission, &source).unwrap();

        assert_eq!(checks[0].stats, PairCountStatistics::new(3, 0, 0));
        assert!(checks[0].passed());
        assert_eq!(checks[1].stats, PairCountStatistics::new(2, 1, 0));
        assert!(!checks[1].passed());
        assert_eq!(checks[1].descriptions[0].icon, "nova-gc-mission-req");
    }

    #[test]
    fn malformed_structures_name_the_solution() {
        let constraints = ConstraintSet::default();
        let solutions = [solution(8, "GGAA", (0, 0, 0))];
        let source = PairSource::Structure("((.".to_string());
        match run(&solutions, &constraints, DisplayContext::Puzzle, &source) {
            Err(EngineError::Structure {
                solution_id,
                source,
            }) => {
                assert_eq!(solution_id, SolutionId(8));
                assert_eq!(
                    source,
                    StructureError::LengthMismatch {
                        sequence: 4,
                        structure: 3
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
