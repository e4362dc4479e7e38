use crate::core::models::solution::Solution;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing a table of solutions.
///
/// Implementors handle format-specific parsing and serialization.
pub trait SolutionTable {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads every solution from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl Read) -> Result<Vec<Solution>, Self::Error>;

    /// Writes the solutions to a writer, header first.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or I/O operations encounter issues.
    fn write_to(solutions: &[Solution], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads every solution from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Solution>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes the solutions to a file path, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(solutions: &[Solution], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(solutions, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
