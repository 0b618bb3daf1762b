use super::distribution::percent;
use crate::roster::domain::columns;
use crate::roster::table::CanonicalTable;
use std::collections::BTreeSet;

/// Short observations about the roster, always in the same order. Each one
/// is only emitted when the roster has something to say about it.
pub fn generate_insights(table: &CanonicalTable) -> Vec<String> {
    let mut insights = Vec::new();
    if table.is_empty() {
        return insights;
    }

    let total = table.len();
    let records = table.records();

    let loa = records.iter().filter(|record| record.is_loa()).count();
    if loa > 0 {
        insights.push(format!(
            "{:.1}% of employees are currently on Leave of Absence",
            percent(loa, total)
        ));
    }

    let voice = records.iter().filter(|record| record.is_voice()).count();
    if voice > 0 {
        insights.push(format!(
            "{:.1}% of employees work in Voice queues",
            percent(voice, total)
        ));
    }

    let management = records
        .iter()
        .filter(|record| record.is_management())
        .count();
    if management > 0 {
        insights.push(format!(
            "Management ratio: 1 manager-tier employee per {:.1} total employees",
            total as f64 / management as f64
        ));
    }

    if table.has_column(columns::DEPARTMENT) {
        let departments: BTreeSet<&str> = records
            .iter()
            .filter_map(|record| record.department())
            .collect();
        insights.push(format!(
            "Workforce spans across {} departments",
            departments.len()
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::cleaner::clean;
    use crate::roster::domain::{RawTable, Scalar};

    fn table(headers: &[&str], rows: &[&[&str]]) -> CanonicalTable {
        clean(&RawTable::new(
            headers.iter().map(|header| header.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| Scalar::from(*cell)).collect())
                .collect(),
        ))
    }

    #[test]
    fn insights_follow_fixed_order() {
        let roster = table(
            &["LOB", "Phone Queue", "Title", "QueueStatus"],
            &[
                &["Sales", "Pro Support", "Manager", "LOA"],
                &["Sales", "Chat", "Agent", "Normal"],
                &["Support", "Chat", "Agent", "Normal"],
                &["Ops", "Server", "Agent", "Normal"],
            ],
        );

        assert_eq!(
            generate_insights(&roster),
            vec![
                "25.0% of employees are currently on Leave of Absence".to_string(),
                "50.0% of employees work in Voice queues".to_string(),
                "Management ratio: 1 manager-tier employee per 4.0 total employees".to_string(),
                "Workforce spans across 3 departments".to_string(),
            ]
        );
    }

    #[test]
    fn insights_skip_absent_signals() {
        let roster = table(
            &["Name", "Phone Queue", "Title"],
            &[&["Ada", "Chat", "Agent"], &["Bo", "Email", "Analyst"]],
        );
        assert!(generate_insights(&roster).is_empty());
    }

    #[test]
    fn empty_roster_has_no_insights() {
        assert!(generate_insights(&CanonicalTable::default()).is_empty());
    }
}
