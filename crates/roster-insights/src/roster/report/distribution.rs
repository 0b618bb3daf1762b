use super::views::{
    CrossDepartmentRow, CrossDepartmentTable, CrossTab, CrossTabRow, Dimension, Distribution,
    DistributionEntry, ManagementRatio, RatioKind, ReportRow, StatisticRow, SummaryReport,
};
use crate::roster::domain::{columns, RoleCategory};
use crate::roster::table::CanonicalTable;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Counts each value, largest group first and ties by label. Percentages are
/// taken against `total`.
pub(crate) fn tally<'a, I>(values: I, total: usize) -> Vec<DistributionEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut entries: Vec<DistributionEntry> = counts
        .into_iter()
        .map(|(label, count)| DistributionEntry {
            label: label.to_string(),
            count,
            percentage: round2(percent(count, total)),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

/// Label counts for one dimension, largest group first.
pub fn distribution(table: &CanonicalTable, dimension: Dimension) -> Distribution {
    let entries = if !table.is_empty() && table.has_column(dimension.column()) {
        tally(
            table
                .records()
                .iter()
                .filter_map(|record| dimension.value(record)),
            table.len(),
        )
    } else {
        Vec::new()
    };

    Distribution { dimension, entries }
}

/// Pivots pair counts into one row per `rows` value and one column per
/// `columns` value, both ascending. Missing pairs count as zero.
pub fn cross_tab(table: &CanonicalTable, rows: Dimension, columns: Dimension) -> CrossTab {
    let mut cross = CrossTab {
        row_dimension: rows,
        column_dimension: columns,
        columns: Vec::new(),
        rows: Vec::new(),
    };

    if table.is_empty() || !table.has_column(rows.column()) || !table.has_column(columns.column())
    {
        return cross;
    }

    let mut pairs: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    let mut column_keys: BTreeSet<&str> = BTreeSet::new();
    for record in table.records() {
        if let (Some(row_key), Some(column_key)) = (rows.value(record), columns.value(record)) {
            column_keys.insert(column_key);
            *pairs
                .entry(row_key)
                .or_default()
                .entry(column_key)
                .or_default() += 1;
        }
    }

    cross.rows = pairs
        .into_iter()
        .map(|(key, counts)| CrossTabRow {
            key: key.to_string(),
            counts: column_keys
                .iter()
                .map(|column| counts.get(column).copied().unwrap_or(0))
                .collect(),
        })
        .collect();
    cross.columns = column_keys.into_iter().map(str::to_string).collect();
    cross
}

/// Span-of-control ratios. Denominators of zero drop their ratio entirely.
pub fn management_ratios(table: &CanonicalTable) -> Vec<ManagementRatio> {
    if table.is_empty() || !table.has_column(columns::ROLE_CATEGORY) {
        return Vec::new();
    }

    let count = |wanted: RoleCategory| {
        table
            .records()
            .iter()
            .filter(|record| record.role_category == Some(wanted))
            .count()
    };

    let total = table.len() as f64;
    let directors = count(RoleCategory::Director);
    let managers = count(RoleCategory::Manager);
    let team_leaders = count(RoleCategory::TeamLeader);
    let contributors = count(RoleCategory::IndividualContributor);

    let mut ratios = Vec::new();
    for (kind, denominator) in [
        (RatioKind::EmployeesPerDirector, directors),
        (RatioKind::EmployeesPerManager, managers),
        (RatioKind::EmployeesPerTeamLeader, team_leaders),
    ] {
        if denominator > 0 {
            ratios.push(ManagementRatio {
                kind,
                label: kind.label(),
                value: round2(total / denominator as f64),
            });
        }
    }

    if contributors > 0 {
        let management = (directors + managers + team_leaders) as f64;
        ratios.push(ManagementRatio {
            kind: RatioKind::ManagementToIc,
            label: RatioKind::ManagementToIc.label(),
            value: round2(management / contributors as f64),
        });
    }

    ratios
}

/// Headline counts: total headcount, then every status, queue type and role
/// in the order each label first appears in the roster.
pub fn summary_statistics(table: &CanonicalTable) -> Vec<StatisticRow> {
    if table.is_empty() {
        return Vec::new();
    }

    let mut rows = vec![StatisticRow {
        metric: "Total Employees".to_string(),
        count: table.len(),
    }];

    let sections: [(Dimension, fn(&str) -> String); 3] = [
        (Dimension::LoaStatus, |label| format!("{label} Employees")),
        (Dimension::QueueType, |label| format!("{label} Queue")),
        (Dimension::RoleCategory, |label| label.to_string()),
    ];

    for (dimension, metric) in sections {
        if !table.has_column(dimension.column()) {
            continue;
        }

        let mut seen: Vec<(&str, usize)> = Vec::new();
        for record in table.records() {
            let Some(value) = dimension.value(record) else {
                continue;
            };
            match seen.iter_mut().find(|(label, _)| *label == value) {
                Some((_, count)) => *count += 1,
                None => seen.push((value, 1)),
            }
        }

        rows.extend(seen.into_iter().map(|(label, count)| StatisticRow {
            metric: metric(label),
            count,
        }));
    }

    rows
}

/// Counts grouped by department and every classified dimension present.
pub fn cross_department(table: &CanonicalTable) -> CrossDepartmentTable {
    let dimensions: Vec<Dimension> = [
        Dimension::QueueType,
        Dimension::LoaStatus,
        Dimension::RoleCategory,
    ]
    .into_iter()
    .filter(|dimension| table.has_column(dimension.column()))
    .collect();

    if table.is_empty() || !table.has_column(columns::DEPARTMENT) || dimensions.is_empty() {
        return CrossDepartmentTable {
            dimensions: Vec::new(),
            rows: Vec::new(),
        };
    }

    let mut groups: BTreeMap<_, usize> = BTreeMap::new();
    for record in table.records() {
        let Some(department) = record.department() else {
            continue;
        };
        let key = (
            department,
            record.queue_type,
            record.loa_status,
            record.role_category,
        );
        *groups.entry(key).or_default() += 1;
    }

    let rows = groups
        .into_iter()
        .map(
            |((department, queue_type, loa_status, role_category), count)| CrossDepartmentRow {
                department: department.to_string(),
                queue_type,
                loa_status,
                role_category,
                count,
            },
        )
        .collect();

    CrossDepartmentTable { dimensions, rows }
}

/// Export-ready report stacking the overall statistics and each distribution.
pub fn summary_report(table: &CanonicalTable) -> SummaryReport {
    let mut rows = Vec::new();
    if table.is_empty() {
        return SummaryReport { rows };
    }

    rows.extend(summary_statistics(table).into_iter().map(|row| ReportRow {
        category: "Overall Statistics",
        metric: row.metric,
        count: row.count,
        percentage: None,
    }));

    let sections = [
        ("Queue Distribution", Dimension::QueueType),
        ("LOA Status", Dimension::LoaStatus),
        ("Role Hierarchy", Dimension::RoleCategory),
        ("Department Distribution", Dimension::Department),
    ];

    for (category, dimension) in sections {
        rows.extend(
            distribution(table, dimension)
                .entries
                .into_iter()
                .map(|entry| ReportRow {
                    category,
                    metric: entry.label,
                    count: entry.count,
                    percentage: Some(entry.percentage),
                }),
        );
    }

    SummaryReport { rows }
}
