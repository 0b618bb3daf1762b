use super::classify::{RuleSet, LEAVE_STATUS_RULES, QUEUE_TYPE_RULES, ROLE_CATEGORY_RULES};
use super::domain::{columns, RawTable, Scalar};
use super::import::normalize_headers;
use super::table::{CanonicalRecord, CanonicalTable, ClassifierSources, ColumnRef};
use tracing::debug;

/// Normalizes headers, drops blank rows, tidies text and appends the three
/// derived classification columns. Never fails on irregular cells.
pub fn clean(raw: &RawTable) -> CanonicalTable {
    let names = normalize_headers(raw.headers());
    let mut columns: Vec<ColumnRef> = names
        .into_iter()
        .zip(raw.headers())
        .map(|(name, header)| ColumnRef {
            name,
            source_header: header.clone(),
        })
        .collect();

    let mut records: Vec<CanonicalRecord> = raw
        .rows()
        .iter()
        .filter(|row| !row.iter().all(Scalar::is_missing))
        .map(|row| clean_row(&columns, row))
        .collect();

    let column_names: Vec<String> = columns.iter().map(|column| column.name.clone()).collect();
    let sources = ClassifierSources {
        queue_type: source_for(&QUEUE_TYPE_RULES, &column_names),
        loa_status: source_for(&LEAVE_STATUS_RULES, &column_names),
        role_category: source_for(&ROLE_CATEGORY_RULES, &column_names),
    };

    for (rules_column, source) in [
        (QUEUE_TYPE_RULES.column, &sources.queue_type),
        (LEAVE_STATUS_RULES.column, &sources.loa_status),
        (ROLE_CATEGORY_RULES.column, &sources.role_category),
    ] {
        if source.is_none() {
            drop_unsourced_column(&mut columns, rules_column);
        }
    }

    if let Some(source) = &sources.queue_type {
        for record in &mut records {
            record.queue_type = Some(QUEUE_TYPE_RULES.classify(record_value(record, source)));
        }
        attach_derived_column(&mut columns, QUEUE_TYPE_RULES.column);
    }

    if let Some(source) = &sources.loa_status {
        for record in &mut records {
            record.loa_status = Some(LEAVE_STATUS_RULES.classify(record_value(record, source)));
        }
        attach_derived_column(&mut columns, LEAVE_STATUS_RULES.column);
    }

    if let Some(source) = &sources.role_category {
        for record in &mut records {
            record.role_category =
                Some(ROLE_CATEGORY_RULES.classify(record_value(record, source)));
        }
        attach_derived_column(&mut columns, ROLE_CATEGORY_RULES.column);
    }

    debug!(
        rows = records.len(),
        dropped = raw.len() - records.len(),
        columns = columns.len(),
        queue_source = sources.queue_type.as_deref().unwrap_or("-"),
        status_source = sources.loa_status.as_deref().unwrap_or("-"),
        role_source = sources.role_category.as_deref().unwrap_or("-"),
        "roster cleaned"
    );

    CanonicalTable {
        columns,
        records,
        sources,
    }
}

fn clean_row(columns: &[ColumnRef], row: &[Scalar]) -> CanonicalRecord {
    let mut values = Vec::with_capacity(columns.len());

    for (column, cell) in columns.iter().zip(row) {
        // Derived columns from an earlier pass are recomputed, not carried.
        if columns::is_derived(&column.name) {
            continue;
        }

        let mut text = clean_text(cell);
        if column.name == columns::STATUS {
            text = text.to_uppercase();
        }
        values.push((column.name.clone(), text));
    }

    CanonicalRecord {
        values,
        ..CanonicalRecord::default()
    }
}

fn clean_text(cell: &Scalar) -> String {
    let text = cell.to_text();
    let trimmed = text.trim();
    if trimmed == "nan" {
        String::new()
    } else {
        trimmed.to_string()
    }
}

fn source_for<L: Copy>(rules: &RuleSet<L>, column_names: &[String]) -> Option<String> {
    rules.source_column(column_names).map(str::to_string)
}

fn record_value<'a>(record: &'a CanonicalRecord, column: &str) -> &'a str {
    record.get(column).unwrap_or("")
}

/// An uploaded column named like a derived one is only rebuilt when a source
/// column exists; otherwise it leaves the table.
fn drop_unsourced_column(columns: &mut Vec<ColumnRef>, name: &str) {
    if let Some(index) = columns.iter().position(|column| column.name == name) {
        let column = columns.remove(index);
        debug!(
            column = %column.name,
            source_header = %column.source_header,
            "uploaded derived column dropped, no source column to classify from"
        );
    }
}

fn attach_derived_column(columns: &mut Vec<ColumnRef>, name: &str) {
    if columns.iter().any(|column| column.name == name) {
        return;
    }

    columns.push(ColumnRef {
        name: name.to_string(),
        source_header: name.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::{LeaveStatus, QueueType, RoleCategory};

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|header| header.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| {
                            if cell.is_empty() {
                                Scalar::Empty
                            } else {
                                Scalar::from(*cell)
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    fn sample() -> RawTable {
        raw(
            &["Badge", "Name", "LOB", "Phone Queue", "Title", "QueueStatus"],
            &[
                &["1001", " Ada ", "Sales", "Pro Support", "Senior Manager, Support", "Normal"],
                &["1002", "Grace", "Sales", "Chat", "Team Lead", "On Leave of Absence"],
                &["", "", "", "", "", ""],
                &["1003", "nan", "Support", "", "", "Work From Home - Approved"],
            ],
        )
    }

    #[test]
    fn clean_normalizes_headers_and_appends_derived_columns() {
        let table = clean(&sample());
        assert_eq!(
            table.column_names(),
            vec![
                "employee_id",
                "employee_name",
                "department",
                "queue",
                "position",
                "status",
                "queue_type",
                "loa_status",
                "role_category",
            ]
        );
        assert_eq!(table.sources().queue_type.as_deref(), Some("queue"));
        assert_eq!(table.sources().loa_status.as_deref(), Some("status"));
        assert_eq!(table.sources().role_category.as_deref(), Some("position"));
    }

    #[test]
    fn clean_drops_blank_rows_and_tidies_text() {
        let table = clean(&sample());
        assert_eq!(table.len(), 3);

        let first = &table.records()[0];
        assert_eq!(first.employee_name(), Some("Ada"));
        assert_eq!(first.status(), Some("NORMAL"));

        let third = &table.records()[2];
        assert_eq!(third.employee_name(), Some(""));
    }

    #[test]
    fn clean_classifies_every_row() {
        let table = clean(&sample());
        let records = table.records();

        assert_eq!(records[0].queue_type, Some(QueueType::Voice));
        assert_eq!(records[0].loa_status, Some(LeaveStatus::Active));
        assert_eq!(records[0].role_category, Some(RoleCategory::Manager));

        assert_eq!(records[1].queue_type, Some(QueueType::NonVoice));
        assert_eq!(records[1].loa_status, Some(LeaveStatus::Loa));
        assert_eq!(records[1].role_category, Some(RoleCategory::TeamLeader));

        assert_eq!(records[2].queue_type, Some(QueueType::NotAssigned));
        assert_eq!(records[2].loa_status, Some(LeaveStatus::WorkFromHome));
        assert_eq!(records[2].role_category, Some(RoleCategory::Unknown));
    }

    #[test]
    fn missing_source_columns_leave_derived_fields_absent() {
        let table = clean(&raw(&["Name", "LOB"], &[&["Ada", "Sales"]]));
        assert!(!table.has_column("queue_type"));
        assert!(!table.has_column("loa_status"));
        assert!(!table.has_column("role_category"));
        assert!(table.records()[0].queue_type.is_none());
    }

    #[test]
    fn numeric_cells_are_stringified() {
        let table = clean(&RawTable::new(
            vec!["Badge".to_string(), "Name".to_string()],
            vec![vec![Scalar::Number(1001.0), Scalar::from("Ada")]],
        ));
        assert_eq!(table.records()[0].employee_id(), Some("1001"));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean(&sample());
        let twice = clean(&once.to_raw());

        assert_eq!(once.column_names(), twice.column_names());
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.sources(), twice.sources());
        for (first, second) in once.records().iter().zip(twice.records()) {
            assert_eq!(first, second);
        }
    }

    #[test]
    fn unsourced_derived_columns_are_dropped() {
        let table = clean(&raw(
            &["Name", "Queue Type", "Role Category", "Title"],
            &[&["Ada", "Voice", "Director", "Agent"]],
        ));

        assert_eq!(
            table.column_names(),
            vec!["employee_name", "role_category", "position"]
        );
        let record = &table.records()[0];
        assert!(record.queue_type.is_none());
        assert_eq!(record.get("queue_type"), None);
        assert_eq!(record.role_category, Some(RoleCategory::IndividualContributor));
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = clean(&RawTable::default());
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
