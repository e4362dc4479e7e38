use super::traits::SolutionTable;
use crate::core::models::ids::SolutionId;
use crate::core::models::solution::Solution;
use std::collections::HashSet;
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate solution id {0}")]
    DuplicateId(SolutionId),
}

/// Comma-separated solution table with one header row naming the [`Solution`] fields.
///
/// An empty `synthesis_score` cell means the design has not been scored.
pub struct CsvSolutionTable;

impl SolutionTable for CsvSolutionTable {
    type Error = TableError;

    fn read_from(reader: &mut impl Read) -> Result<Vec<Solution>, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut seen = HashSet::new();
        let mut solutions = Vec::new();
        for record in csv_reader.deserialize::<Solution>() {
            let solution = record?;
            if !seen.insert(solution.id) {
                return Err(TableError::DuplicateId(solution.id));
            }
            solutions.push(solution);
        }

        debug!("Read {} solution(s) from table.", solutions.len());
        Ok(solutions)
    }

    fn write_to(solutions: &[Solution], writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for solution in solutions {
            csv_writer.serialize(solution)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const HEADER: &str = "id,title,designer,votes,my_votes,round,description,sequence,melting_point,free_energy,synthesis_score,synthesized,gc_pairs,au_pairs,gu_pairs";

    fn table(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn read_parses_every_column() {
        let text = table(&[
            "7,Loop,alice,4,1,2,First try,GGAAACC,55.5,-3.2,91.5,true,2,0,1",
        ]);
        let solutions = CsvSolutionTable::read_from(&mut Cursor::new(text)).unwrap();

        assert_eq!(solutions.len(), 1);
        let s = &solutions[0];
        assert_eq!(s.id, SolutionId(7));
        assert_eq!(s.title, "Loop");
        assert_eq!(s.designer, "alice");
        assert_eq!(s.votes, 4);
        assert_eq!(s.my_votes, 1);
        assert_eq!(s.round, 2);
        assert_eq!(s.description, "First try");
        assert_eq!(s.sequence, "GGAAACC");
        assert_eq!(s.melting_point, 55.5);
        assert_eq!(s.free_energy, -3.2);
        assert_eq!(s.synthesis_score, Some(91.5));
        assert!(s.synthesized);
        assert_eq!((s.gc_pairs, s.au_pairs, s.gu_pairs), (2, 0, 1));
    }

    #[test]
    fn empty_synthesis_score_reads_as_none() {
        let text = table(&["1,A,bob,0,0,1,,ACGU,40,-1,,false,0,0,0"]);
        let solutions = CsvSolutionTable::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(solutions[0].synthesis_score, None);
        assert!(!solutions[0].synthesized);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = table(&[
            "1,A,bob,0,0,1,,ACGU,40,-1,,false,0,0,0",
            "1,B,bob,0,0,1,,ACGU,40,-1,,false,0,0,0",
        ]);
        let result = CsvSolutionTable::read_from(&mut Cursor::new(text));
        assert!(matches!(result, Err(TableError::DuplicateId(SolutionId(1)))));
    }

    #[test]
    fn malformed_numbers_are_reported_as_csv_errors() {
        let text = table(&["x,A,bob,0,0,1,,ACGU,40,-1,,false,0,0,0"]);
        let result = CsvSolutionTable::read_from(&mut Cursor::new(text));
        assert!(matches!(result, Err(TableError::Csv(_))));
    }

    #[test]
    fn written_table_reads_back_identically() {
        let solutions = vec![
            Solution {
                id: SolutionId(3),
                title: "Comma, inside".to_string(),
                synthesis_score: Some(80.0),
                synthesized: true,
                ..Default::default()
            },
            Solution {
                id: SolutionId(4),
                title: "Plain".to_string(),
                ..Default::default()
            },
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join("solutions.csv");
        CsvSolutionTable::write_to_path(&solutions, &path).unwrap();
        let back = CsvSolutionTable::read_from_path(&path).unwrap();
        assert_eq!(back, solutions);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = CsvSolutionTable::read_from_path(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(TableError::Io(_))));
    }
}
