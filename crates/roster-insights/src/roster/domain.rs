use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical column names shared by the cleaner, classifiers and reports.
pub mod columns {
    pub const EMPLOYEE_ID: &str = "employee_id";
    pub const EMPLOYEE_NAME: &str = "employee_name";
    pub const DEPARTMENT: &str = "department";
    pub const QUEUE: &str = "queue";
    pub const POSITION: &str = "position";
    pub const STATUS: &str = "status";
    pub const LOCATION: &str = "location";
    pub const SHIFT: &str = "shift";

    pub const QUEUE_TYPE: &str = "queue_type";
    pub const LOA_STATUS: &str = "loa_status";
    pub const ROLE_CATEGORY: &str = "role_category";

    /// Columns written by the classifiers rather than read from the upload.
    pub const DERIVED: [&str; 3] = [QUEUE_TYPE, LOA_STATUS, ROLE_CATEGORY];

    pub fn is_derived(name: &str) -> bool {
        DERIVED.contains(&name)
    }
}

/// A single spreadsheet cell as handed over by the import layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Empty,
}

impl Scalar {
    /// Missing cells are the ones a spreadsheet reader reports as blank.
    pub fn is_missing(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Number(value) => value.is_nan(),
            Scalar::Text(_) => false,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Scalar::Text(value) => value.clone(),
            Scalar::Number(value) => format_number(*value),
            Scalar::Empty => String::new(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Uploaded roster before header normalization. Rows are aligned to the
/// header row: short rows are padded with [`Scalar::Empty`], long rows are cut.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Scalar>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Scalar>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Scalar::Empty);
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Scalar>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// The only check allowed to fail the whole pipeline.
    pub fn validate(self) -> Result<Self, RosterError> {
        if self.rows.is_empty() {
            return Err(RosterError::InvalidInput(
                "roster contains no data rows".to_string(),
            ));
        }

        if self.headers.len() < 2 {
            return Err(RosterError::InvalidInput(format!(
                "roster needs at least 2 columns, found {}",
                self.headers.len()
            )));
        }

        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QueueType {
    #[serde(rename = "Voice")]
    Voice,
    #[serde(rename = "Non-Voice")]
    NonVoice,
    #[serde(rename = "Not Assigned")]
    NotAssigned,
}

impl QueueType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Voice, Self::NonVoice, Self::NotAssigned]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Voice => "Voice",
            Self::NonVoice => "Non-Voice",
            Self::NotAssigned => "Not Assigned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "LOA")]
    Loa,
    #[serde(rename = "Work from Home")]
    WorkFromHome,
    #[serde(rename = "Project")]
    Project,
    #[serde(rename = "Other")]
    Other,
}

impl LeaveStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Active,
            Self::Loa,
            Self::WorkFromHome,
            Self::Project,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Loa => "LOA",
            Self::WorkFromHome => "Work from Home",
            Self::Project => "Project",
            Self::Other => "Other",
        }
    }

    /// Statuses rolled up into the ATT/Move-out summary column.
    pub const fn is_attrition(self) -> bool {
        matches!(self, Self::Project | Self::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Director")]
    Director,
    #[serde(rename = "Manager")]
    Manager,
    #[serde(rename = "Team Leader")]
    TeamLeader,
    #[serde(rename = "Individual Contributor")]
    IndividualContributor,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RoleCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Director,
            Self::Manager,
            Self::TeamLeader,
            Self::IndividualContributor,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Director => "Director",
            Self::Manager => "Manager",
            Self::TeamLeader => "Team Leader",
            Self::IndividualContributor => "Individual Contributor",
            Self::Unknown => "Unknown",
        }
    }

    /// Director, Manager and Team Leader count toward the management tier.
    pub const fn is_management(self) -> bool {
        matches!(self, Self::Director | Self::Manager | Self::TeamLeader)
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_label!(QueueType, LeaveStatus, RoleCategory);

/// Failures surfaced by the roster pipeline. Only input loading can fail;
/// classification and aggregation are total.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid roster input: {0}")]
    InvalidInput(String),
    #[error("unknown export table `{0}`")]
    UnknownExport(String),
}
