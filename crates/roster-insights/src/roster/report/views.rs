use crate::roster::domain::{columns, LeaveStatus, QueueType, RoleCategory};
use crate::roster::table::CanonicalRecord;
use serde::{Deserialize, Serialize};

/// Grouping dimensions the aggregations can pivot on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    QueueType,
    LoaStatus,
    RoleCategory,
    Department,
    Queue,
}

impl Dimension {
    pub const fn column(self) -> &'static str {
        match self {
            Self::QueueType => columns::QUEUE_TYPE,
            Self::LoaStatus => columns::LOA_STATUS,
            Self::RoleCategory => columns::ROLE_CATEGORY,
            Self::Department => columns::DEPARTMENT,
            Self::Queue => columns::QUEUE,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::QueueType => "Queue Type",
            Self::LoaStatus => "Status",
            Self::RoleCategory => "Role",
            Self::Department => "Department",
            Self::Queue => "Vertical/Queue",
        }
    }

    pub fn value(self, record: &CanonicalRecord) -> Option<&str> {
        record.get(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub dimension: Dimension,
    pub entries: Vec<DistributionEntry>,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map_or(0, |entry| entry.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTabRow {
    pub key: String,
    pub counts: Vec<usize>,
}

/// Wide pivot of pair counts; `counts[i]` lines up with `columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub row_dimension: Dimension,
    pub column_dimension: Dimension,
    pub columns: Vec<String>,
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count(&self, row_key: &str, column_key: &str) -> usize {
        let Some(index) = self.columns.iter().position(|column| column == column_key) else {
            return 0;
        };

        self.rows
            .iter()
            .find(|row| row.key == row_key)
            .map_or(0, |row| row.counts[index])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLevel {
    Lob,
    Vertical,
}

impl SummaryLevel {
    pub const fn key_header(self) -> &'static str {
        match self {
            Self::Lob => "LOB",
            Self::Vertical => "Vertical",
        }
    }
}

/// One line of the headcount tracker. `cte_fc`, `training` and `quality`
/// have no source data and stay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub is_total: bool,
    pub voice: usize,
    pub non_voice: usize,
    pub loa: usize,
    pub att_move_out: usize,
    pub cte_fc: usize,
    pub training: usize,
    pub total: usize,
    pub team_leaders: usize,
    pub quality: usize,
    pub directors: usize,
    pub managers: usize,
    pub total_management: usize,
}

impl SummaryRow {
    pub const HEADERS: [&'static str; 12] = [
        "Voice",
        "Non-Voice",
        "LOA",
        "ATT/Move out",
        "CTE/FC",
        "Training",
        "Total",
        "TL",
        "Quality",
        "Director",
        "Manager",
        "Total Mgmt",
    ];

    /// Numeric columns in `HEADERS` order.
    pub fn counts(&self) -> [usize; 12] {
        [
            self.voice,
            self.non_voice,
            self.loa,
            self.att_move_out,
            self.cte_fc,
            self.training,
            self.total,
            self.team_leaders,
            self.quality,
            self.directors,
            self.managers,
            self.total_management,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub level: SummaryLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.is_total)
    }

    pub fn row(&self, label: &str) -> Option<&SummaryRow> {
        self.rows
            .iter()
            .find(|row| !row.is_total && row.label == label)
    }

    pub fn group_rows(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().filter(|row| !row.is_total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    EmployeesPerDirector,
    EmployeesPerManager,
    EmployeesPerTeamLeader,
    ManagementToIc,
}

impl RatioKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmployeesPerDirector => "Employees per Director",
            Self::EmployeesPerManager => "Employees per Manager",
            Self::EmployeesPerTeamLeader => "Employees per Team Leader",
            Self::ManagementToIc => "Management to IC Ratio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagementRatio {
    pub kind: RatioKind,
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticRow {
    pub metric: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossDepartmentRow {
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_type: Option<QueueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loa_status: Option<LeaveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_category: Option<RoleCategory>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossDepartmentTable {
    pub dimensions: Vec<Dimension>,
    pub rows: Vec<CrossDepartmentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub category: &'static str,
    pub metric: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentMetrics {
    pub headcount: usize,
    pub active: usize,
    pub voice: usize,
    pub non_voice: usize,
    pub loa: usize,
    pub management: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_category: Option<RoleCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loa_status: Option<LeaveStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalDetail {
    pub department: String,
    pub queue: String,
    pub metrics: SegmentMetrics,
    pub active_rate: f64,
    pub management_rate: f64,
    pub voice_coverage: f64,
    pub status_breakdown: Vec<DistributionEntry>,
    /// Five most common locations; empty when the roster has no location.
    pub top_locations: Vec<DistributionEntry>,
    pub shifts: Vec<DistributionEntry>,
    pub employees: Vec<EmployeeEntry>,
    pub management_staff: Vec<EmployeeEntry>,
}

/// Drill-down into a whole department (LOB) across its queues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentDetail {
    pub department: String,
    pub metrics: SegmentMetrics,
    pub active_rate: f64,
    pub management_rate: f64,
    pub voice_coverage: f64,
    pub unique_queues: usize,
    pub role_breakdown: Vec<DistributionEntry>,
    pub queue_type_breakdown: Vec<DistributionEntry>,
    pub status_breakdown: Vec<DistributionEntry>,
    pub top_queues: Vec<DistributionEntry>,
    pub management_staff: Vec<EmployeeEntry>,
}
