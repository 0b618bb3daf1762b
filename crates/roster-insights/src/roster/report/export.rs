use super::distribution::{cross_department, cross_tab, distribution, summary_report};
use super::summary::{lob_summary, vertical_summary};
use super::views::{
    CrossDepartmentTable, CrossTab, Dimension, Distribution, StatisticRow, SummaryReport,
    SummaryRow, SummaryTable,
};
use crate::roster::domain::RosterError;
use crate::roster::table::CanonicalTable;
use chrono::NaiveDateTime;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// A header row plus string cells, ready for spreadsheet export.
pub trait TabularView {
    fn header(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<String>>;
}

fn percentage_cell(value: f64) -> String {
    format!("{value:.2}")
}

impl TabularView for SummaryTable {
    fn header(&self) -> Vec<String> {
        std::iter::once(self.level.key_header())
            .chain(SummaryRow::HEADERS)
            .map(str::to_string)
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.label.clone())
                    .chain(row.counts().iter().map(usize::to_string))
                    .collect()
            })
            .collect()
    }
}

impl TabularView for Distribution {
    fn header(&self) -> Vec<String> {
        vec![
            self.dimension.label().to_string(),
            "Count".to_string(),
            "Percentage".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|entry| {
                vec![
                    entry.label.clone(),
                    entry.count.to_string(),
                    percentage_cell(entry.percentage),
                ]
            })
            .collect()
    }
}

impl TabularView for CrossTab {
    fn header(&self) -> Vec<String> {
        std::iter::once(self.row_dimension.label().to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.key.clone())
                    .chain(row.counts.iter().map(usize::to_string))
                    .collect()
            })
            .collect()
    }
}

impl TabularView for CanonicalTable {
    fn header(&self) -> Vec<String> {
        self.column_names().into_iter().map(str::to_string).collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let names = self.column_names();
        self.records()
            .iter()
            .map(|record| {
                names
                    .iter()
                    .map(|name| record.get(name).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }
}

impl TabularView for [StatisticRow] {
    fn header(&self) -> Vec<String> {
        vec!["Metric".to_string(), "Count".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|row| vec![row.metric.clone(), row.count.to_string()])
            .collect()
    }
}

impl TabularView for SummaryReport {
    fn header(&self) -> Vec<String> {
        ["Category", "Metric", "Count", "Percentage"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.category.to_string(),
                    row.metric.clone(),
                    row.count.to_string(),
                    row.percentage.map(percentage_cell).unwrap_or_default(),
                ]
            })
            .collect()
    }
}

impl TabularView for CrossDepartmentTable {
    fn header(&self) -> Vec<String> {
        std::iter::once(Dimension::Department.label())
            .chain(self.dimensions.iter().map(|dimension| dimension.label()))
            .chain(std::iter::once("Count"))
            .map(str::to_string)
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.department.clone()];
                for dimension in &self.dimensions {
                    let label = match dimension {
                        Dimension::QueueType => row.queue_type.map(|value| value.label()),
                        Dimension::LoaStatus => row.loa_status.map(|value| value.label()),
                        Dimension::RoleCategory => row.role_category.map(|value| value.label()),
                        Dimension::Department | Dimension::Queue => None,
                    };
                    cells.push(label.unwrap_or_default().to_string());
                }
                cells.push(row.count.to_string());
                cells
            })
            .collect()
    }
}

/// Writes the header row followed by every data row. No index column.
pub fn write_csv<T, W>(view: &T, writer: W) -> Result<(), RosterError>
where
    T: TabularView + ?Sized,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(view.header())?;
    for row in view.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string<T: TabularView + ?Sized>(view: &T) -> Result<String, RosterError> {
    let mut buffer = Vec::new();
    write_csv(view, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// `roster_summary_table_20240131_091500.csv` style export names.
pub fn export_file_name(stem: &str, at: NaiveDateTime) -> String {
    format!("{stem}_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Every table the roster can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTable {
    Lob,
    Vertical,
    Report,
    Records,
    DepartmentRecords,
    Queue,
    Loa,
    Roles,
    Departments,
    QueueByDepartment,
    LoaByDepartment,
    CrossDepartment,
}

impl ExportTable {
    pub const ALL: [ExportTable; 12] = [
        ExportTable::Lob,
        ExportTable::Vertical,
        ExportTable::Report,
        ExportTable::Records,
        ExportTable::DepartmentRecords,
        ExportTable::Queue,
        ExportTable::Loa,
        ExportTable::Roles,
        ExportTable::Departments,
        ExportTable::QueueByDepartment,
        ExportTable::LoaByDepartment,
        ExportTable::CrossDepartment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lob => "lob",
            Self::Vertical => "vertical",
            Self::Report => "report",
            Self::Records => "records",
            Self::DepartmentRecords => "department_records",
            Self::Queue => "queue",
            Self::Loa => "loa",
            Self::Roles => "roles",
            Self::Departments => "departments",
            Self::QueueByDepartment => "queue_by_department",
            Self::LoaByDepartment => "loa_by_department",
            Self::CrossDepartment => "cross_department",
        }
    }

    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Lob => "roster_summary_table",
            Self::Vertical => "vertical_summary",
            Self::Report => "roster_summary_report",
            Self::Records => "cleaned_roster",
            Self::DepartmentRecords => "department_data",
            Self::Queue => "queue_distribution",
            Self::Loa => "loa_distribution",
            Self::Roles => "role_distribution",
            Self::Departments => "department_distribution",
            Self::QueueByDepartment => "detailed_queue_analysis",
            Self::LoaByDepartment => "loa_trends",
            Self::CrossDepartment => "cross_department_analysis",
        }
    }

    /// Tables scoped to a single department.
    pub const fn needs_department(self) -> bool {
        matches!(self, Self::Vertical | Self::DepartmentRecords)
    }

    /// Renders the table as CSV text. Department-scoped tables fail without a
    /// department; `queue` narrows the scoped records to one vertical.
    pub fn render(
        self,
        table: &CanonicalTable,
        department: Option<&str>,
        queue: Option<&str>,
    ) -> Result<String, RosterError> {
        let scope = || {
            department.ok_or_else(|| {
                RosterError::InvalidInput(format!("{self} export requires a department"))
            })
        };

        match self {
            Self::Lob => to_csv_string(&lob_summary(table)),
            Self::Vertical => to_csv_string(&vertical_summary(table, scope()?)),
            Self::Report => to_csv_string(&summary_report(table)),
            Self::Records => to_csv_string(table),
            Self::DepartmentRecords => to_csv_string(&table.scoped(scope()?, queue)),
            Self::Queue => to_csv_string(&distribution(table, Dimension::QueueType)),
            Self::Loa => to_csv_string(&distribution(table, Dimension::LoaStatus)),
            Self::Roles => to_csv_string(&distribution(table, Dimension::RoleCategory)),
            Self::Departments => to_csv_string(&distribution(table, Dimension::Department)),
            Self::QueueByDepartment => to_csv_string(&cross_tab(
                table,
                Dimension::Department,
                Dimension::QueueType,
            )),
            Self::LoaByDepartment => to_csv_string(&cross_tab(
                table,
                Dimension::Department,
                Dimension::LoaStatus,
            )),
            Self::CrossDepartment => to_csv_string(&cross_department(table)),
        }
    }
}

impl fmt::Display for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTable {
    type Err = RosterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == value)
            .ok_or_else(|| RosterError::UnknownExport(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::cleaner::clean;
    use crate::roster::domain::{RawTable, Scalar};
    use crate::roster::report::distribution::summary_statistics;
    use chrono::NaiveDate;

    fn roster() -> CanonicalTable {
        let headers = ["Name", "LOB", "Phone Queue", "Title", "QueueStatus"]
            .iter()
            .map(|header| header.to_string())
            .collect();
        let rows = [
            ["Ada", "Sales", "Pro Support", "Manager", "Normal"],
            ["Bo", "Sales", "Chat", "Agent", "LOA"],
            ["Cy", "Support", "Email", "Agent", "Normal"],
        ]
        .iter()
        .map(|row| row.iter().map(|cell| Scalar::from(*cell)).collect())
        .collect();
        clean(&RawTable::new(headers, rows))
    }

    fn lines(csv: &str) -> Vec<&str> {
        csv.lines().collect()
    }

    #[test]
    fn lob_summary_exports_header_then_rows() {
        let csv = to_csv_string(&lob_summary(&roster())).expect("csv");
        let lines = lines(&csv);
        assert_eq!(
            lines[0],
            "LOB,Voice,Non-Voice,LOA,ATT/Move out,CTE/FC,Training,Total,TL,Quality,Director,Manager,Total Mgmt"
        );
        assert_eq!(lines[1], "Sales,1,1,1,0,0,0,2,0,0,0,1,1");
        assert_eq!(lines[3], "Total,1,2,1,0,0,0,3,0,0,0,1,1");
    }

    #[test]
    fn distribution_exports_two_decimal_percentages() {
        let csv = to_csv_string(&distribution(&roster(), Dimension::QueueType)).expect("csv");
        assert_eq!(
            lines(&csv),
            vec!["Queue Type,Count,Percentage", "Non-Voice,2,66.67", "Voice,1,33.33"]
        );
    }

    #[test]
    fn canonical_records_export_derived_labels() {
        let csv = to_csv_string(&roster()).expect("csv");
        let lines = lines(&csv);
        assert_eq!(
            lines[0],
            "employee_name,department,queue,position,status,queue_type,loa_status,role_category"
        );
        assert_eq!(
            lines[1],
            "Ada,Sales,Pro Support,Manager,NORMAL,Voice,Active,Manager"
        );
    }

    #[test]
    fn other_views_export_headers() {
        let table = roster();
        let cross = to_csv_string(&cross_tab(&table, Dimension::Department, Dimension::LoaStatus))
            .expect("csv");
        assert_eq!(lines(&cross)[0], "Department,Active,LOA");

        let stats = summary_statistics(&table);
        let csv = to_csv_string(stats.as_slice()).expect("csv");
        assert_eq!(lines(&csv)[1], "Total Employees,3");

        let csv = to_csv_string(&cross_department(&table)).expect("csv");
        assert_eq!(lines(&csv)[0], "Department,Queue Type,Status,Role,Count");

        let csv = to_csv_string(&summary_report(&table)).expect("csv");
        assert_eq!(lines(&csv)[1], "Overall Statistics,Total Employees,3,");
    }

    #[test]
    fn export_tables_parse_and_render() {
        let table = roster();
        for export in ExportTable::ALL {
            assert_eq!(export.as_str().parse::<ExportTable>().ok(), Some(export));
        }
        assert!(matches!(
            "payroll".parse::<ExportTable>(),
            Err(RosterError::UnknownExport(name)) if name == "payroll"
        ));
        for export in ExportTable::ALL {
            let rendered = export.render(&table, None, None);
            if export.needs_department() {
                assert!(matches!(rendered, Err(RosterError::InvalidInput(_))));
            } else {
                assert!(rendered.is_ok(), "{export} renders without a department");
            }
        }
        let vertical = ExportTable::Vertical
            .render(&table, Some("Sales"), None)
            .expect("vertical csv");
        assert!(vertical.starts_with("Vertical,Voice"));
    }

    #[test]
    fn department_pivots_export_as_wide_tables() {
        let table = roster();
        let queue = ExportTable::QueueByDepartment
            .render(&table, None, None)
            .expect("queue pivot");
        assert_eq!(
            lines(&queue),
            vec!["Department,Non-Voice,Voice", "Sales,1,1", "Support,1,0"]
        );

        let loa = ExportTable::LoaByDepartment
            .render(&table, None, None)
            .expect("loa pivot");
        assert_eq!(
            lines(&loa),
            vec!["Department,Active,LOA", "Sales,1,1", "Support,1,0"]
        );

        let cross = ExportTable::CrossDepartment
            .render(&table, None, None)
            .expect("cross department");
        assert_eq!(lines(&cross)[0], "Department,Queue Type,Status,Role,Count");
        assert_eq!(lines(&cross).len(), 4);
    }

    #[test]
    fn department_records_export_is_scoped() {
        let table = roster();
        let sales = ExportTable::DepartmentRecords
            .render(&table, Some("Sales"), None)
            .expect("sales records");
        let sales = lines(&sales);
        assert_eq!(sales.len(), 3);
        assert!(sales[0].starts_with("employee_name,department"));

        let chat = ExportTable::DepartmentRecords
            .render(&table, Some("Sales"), Some("Chat"))
            .expect("chat records");
        let chat = lines(&chat);
        assert_eq!(chat.len(), 2);
        assert!(chat[1].starts_with("Bo,Sales,Chat,"));
    }

    #[test]
    fn export_file_names_carry_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|date| date.and_hms_opt(9, 15, 0))
            .expect("valid timestamp");
        assert_eq!(
            export_file_name(ExportTable::Lob.file_stem(), at),
            "roster_summary_table_20240131_091500.csv"
        );
    }
}
