use super::views::{SummaryLevel, SummaryRow, SummaryTable};
use crate::roster::domain::{columns, LeaveStatus, QueueType, RoleCategory};
use crate::roster::table::{CanonicalRecord, CanonicalTable};
use std::collections::BTreeMap;

pub const TOTAL_LABEL: &str = "Total";

/// Headcount tracker grouped by department, sorted by name, Total row last.
pub fn lob_summary(table: &CanonicalTable) -> SummaryTable {
    let rows = if table.is_empty() || !table.has_column(columns::DEPARTMENT) {
        Vec::new()
    } else {
        summarize_groups(table.records().iter(), CanonicalRecord::department)
    };

    SummaryTable {
        level: SummaryLevel::Lob,
        department: None,
        rows,
    }
}

/// Same shape as [`lob_summary`], grouped by queue inside one department.
pub fn vertical_summary(table: &CanonicalTable, department: &str) -> SummaryTable {
    let rows = if table.has_column(columns::DEPARTMENT) && table.has_column(columns::QUEUE) {
        summarize_groups(table.department_records(department), CanonicalRecord::queue)
    } else {
        Vec::new()
    };

    SummaryTable {
        level: SummaryLevel::Vertical,
        department: Some(department.to_string()),
        rows,
    }
}

fn summarize_groups<'a, I, K>(records: I, key: K) -> Vec<SummaryRow>
where
    I: Iterator<Item = &'a CanonicalRecord>,
    K: Fn(&'a CanonicalRecord) -> Option<&'a str>,
{
    let mut groups: BTreeMap<&str, Vec<&CanonicalRecord>> = BTreeMap::new();
    for record in records {
        if let Some(value) = key(record) {
            groups.entry(value).or_default().push(record);
        }
    }

    if groups.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|(label, members)| summarize_members(label, &members))
        .collect();

    let total = total_row(&rows);
    rows.push(total);
    rows
}

pub(crate) fn summarize_members(label: &str, members: &[&CanonicalRecord]) -> SummaryRow {
    let count_queue =
        |wanted: QueueType| members.iter().filter(|r| r.queue_type == Some(wanted)).count();
    let count_role = |wanted: RoleCategory| {
        members
            .iter()
            .filter(|r| r.role_category == Some(wanted))
            .count()
    };

    let loa = members
        .iter()
        .filter(|r| r.loa_status == Some(LeaveStatus::Loa))
        .count();
    let att_move_out = members
        .iter()
        .filter(|r| r.loa_status.is_some_and(LeaveStatus::is_attrition))
        .count();

    let team_leaders = count_role(RoleCategory::TeamLeader);
    let directors = count_role(RoleCategory::Director);
    let managers = count_role(RoleCategory::Manager);
    let quality = 0;

    SummaryRow {
        label: label.to_string(),
        is_total: false,
        voice: count_queue(QueueType::Voice),
        non_voice: count_queue(QueueType::NonVoice),
        loa,
        att_move_out,
        cte_fc: 0,
        training: 0,
        total: members.len(),
        team_leaders,
        quality,
        directors,
        managers,
        total_management: team_leaders + managers + directors + quality,
    }
}

fn total_row(rows: &[SummaryRow]) -> SummaryRow {
    rows.iter().fold(
        SummaryRow {
            label: TOTAL_LABEL.to_string(),
            is_total: true,
            ..SummaryRow::default()
        },
        |mut total, row| {
            total.voice += row.voice;
            total.non_voice += row.non_voice;
            total.loa += row.loa;
            total.att_move_out += row.att_move_out;
            total.cte_fc += row.cte_fc;
            total.training += row.training;
            total.total += row.total;
            total.team_leaders += row.team_leaders;
            total.quality += row.quality;
            total.directors += row.directors;
            total.managers += row.managers;
            total.total_management += row.total_management;
            total
        },
    )
}
