use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Common interface for the on-disk formats of analysis artifacts.
///
/// Implementors handle one format each; the path helpers wrap the stream methods in
/// buffered file handles.
pub trait ArtifactFile {
    /// The in-memory value stored by the format.
    type Data;

    /// The error type for parsing and I/O failures.
    type Error: Error + From<io::Error>;

    /// Parses a value from a buffered reader.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error>;

    /// Serializes a value to a writer.
    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Data, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(data: &Self::Data, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(data, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// A logical sample of raw nucleotide reads.
///
/// The workflows only need the reads of one sample at a time, in order; where they come
/// from is up to the implementor.
pub trait ReadSource {
    type Error: Error + Send + Sync + 'static;

    /// Name used to label the sample's outputs.
    fn name(&self) -> String;

    fn reads(&self) -> Result<Vec<Vec<u8>>, Self::Error>;
}
