mod aliases;
mod normalizer;
mod parser;

pub use normalizer::{normalize_headers, slugify};

use crate::roster::domain::{RawTable, RosterError};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Loads roster exports into a validated [`RawTable`].
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RawTable, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RawTable, RosterError> {
        let table = parser::parse_table(reader)?.validate()?;
        debug!(
            rows = table.len(),
            columns = table.headers().len(),
            "roster export parsed"
        );
        Ok(table)
    }
}
