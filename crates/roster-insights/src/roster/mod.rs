pub mod classify;
pub mod cleaner;
pub mod domain;
pub mod import;
pub mod report;
pub mod router;
pub mod table;

pub use cleaner::clean;
pub use domain::{LeaveStatus, QueueType, RawTable, RoleCategory, RosterError, Scalar};
pub use import::RosterImporter;
pub use report::{AnalysisOptions, RosterAnalysis};
pub use router::roster_router;
pub use table::{CanonicalRecord, CanonicalTable};

use std::io::Read;

/// Parses, validates and cleans a roster export in one step.
pub fn load_roster<R: Read>(reader: R) -> Result<CanonicalTable, RosterError> {
    let raw = RosterImporter::from_reader(reader)?;
    Ok(clean(&raw))
}
