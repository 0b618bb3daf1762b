mod distribution;
mod drilldown;
mod export;
mod insights;
mod summary;
pub mod views;

pub use distribution::{
    cross_department, cross_tab, distribution, management_ratios, summary_report,
    summary_statistics,
};
pub use drilldown::{department_detail, vertical_detail};
pub use export::{export_file_name, to_csv_string, write_csv, ExportTable, TabularView};
pub use insights::generate_insights;
pub use summary::{lob_summary, vertical_summary, TOTAL_LABEL};

use super::table::{CanonicalRecord, CanonicalTable, ClassifierSources};
use serde::{Deserialize, Serialize};
use views::{
    CrossDepartmentTable, CrossTab, DepartmentDetail, Dimension, Distribution, ManagementRatio,
    StatisticRow, SummaryTable, VerticalDetail,
};

/// Optional drill-down scope for [`RosterAnalysis::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub include_records: bool,
}

/// Everything the dashboard shows for one roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterAnalysis {
    pub employees: usize,
    pub sources: ClassifierSources,
    pub lob_summary: SummaryTable,
    pub queue_types: Distribution,
    pub loa_statuses: Distribution,
    pub role_categories: Distribution,
    pub departments: Distribution,
    pub management_ratios: Vec<ManagementRatio>,
    pub statistics: Vec<StatisticRow>,
    pub queue_by_department: CrossTab,
    pub loa_by_department: CrossTab,
    pub cross_department: CrossDepartmentTable,
    pub insights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_detail: Option<DepartmentDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_summary: Option<SummaryTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_detail: Option<VerticalDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<CanonicalRecord>>,
}

impl RosterAnalysis {
    pub fn build(table: &CanonicalTable, options: &AnalysisOptions) -> Self {
        let department = options.department.as_deref();

        let vertical_detail = match (department, options.queue.as_deref()) {
            (Some(department), Some(queue)) => vertical_detail(table, department, queue),
            _ => None,
        };

        Self {
            employees: table.len(),
            sources: table.sources().clone(),
            lob_summary: lob_summary(table),
            queue_types: distribution(table, Dimension::QueueType),
            loa_statuses: distribution(table, Dimension::LoaStatus),
            role_categories: distribution(table, Dimension::RoleCategory),
            departments: distribution(table, Dimension::Department),
            management_ratios: management_ratios(table),
            statistics: summary_statistics(table),
            queue_by_department: cross_tab(table, Dimension::Department, Dimension::QueueType),
            loa_by_department: cross_tab(table, Dimension::Department, Dimension::LoaStatus),
            cross_department: cross_department(table),
            insights: generate_insights(table),
            department_detail: department
                .and_then(|department| department_detail(table, department)),
            vertical_summary: department.map(|department| vertical_summary(table, department)),
            vertical_detail,
            records: options
                .include_records
                .then(|| table.records().to_vec()),
        }
    }
}
