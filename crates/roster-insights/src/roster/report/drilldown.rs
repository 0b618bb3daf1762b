use super::distribution::{percent, round2, tally};
use super::views::{
    DepartmentDetail, DistributionEntry, EmployeeEntry, SegmentMetrics, VerticalDetail,
};
use crate::roster::domain::{columns, LeaveStatus, QueueType, RoleCategory};
use crate::roster::table::{CanonicalRecord, CanonicalTable};
use std::collections::BTreeSet;

const TOP_QUEUES: usize = 10;
const TOP_LOCATIONS: usize = 5;

/// Drill-down into one department across all of its queues.
pub fn department_detail(table: &CanonicalTable, department: &str) -> Option<DepartmentDetail> {
    let members: Vec<&CanonicalRecord> = table.department_records(department).collect();
    if members.is_empty() {
        return None;
    }

    let metrics = segment_metrics(&members);
    let (active_rate, management_rate, voice_coverage) = rates(metrics);
    let unique_queues = members
        .iter()
        .filter_map(|record| record.queue())
        .filter(|queue| !queue.is_empty())
        .collect::<BTreeSet<_>>()
        .len();

    Some(DepartmentDetail {
        department: department.to_string(),
        metrics,
        active_rate,
        management_rate,
        voice_coverage,
        unique_queues,
        role_breakdown: breakdown(&members, |record| {
            record.role_category.map(RoleCategory::label)
        }),
        queue_type_breakdown: breakdown(&members, |record| {
            record.queue_type.map(QueueType::label)
        }),
        status_breakdown: breakdown(&members, |record| {
            record.loa_status.map(LeaveStatus::label)
        }),
        top_queues: top_values(&members, columns::QUEUE, TOP_QUEUES),
        management_staff: management_staff(&members),
    })
}

/// Drill-down into one queue inside a department.
pub fn vertical_detail(
    table: &CanonicalTable,
    department: &str,
    queue: &str,
) -> Option<VerticalDetail> {
    let members: Vec<&CanonicalRecord> = table
        .department_records(department)
        .filter(|record| record.queue() == Some(queue))
        .collect();
    if members.is_empty() {
        return None;
    }

    let metrics = segment_metrics(&members);
    let (active_rate, management_rate, voice_coverage) = rates(metrics);

    Some(VerticalDetail {
        department: department.to_string(),
        queue: queue.to_string(),
        metrics,
        active_rate,
        management_rate,
        voice_coverage,
        status_breakdown: breakdown(&members, |record| {
            record.loa_status.map(LeaveStatus::label)
        }),
        top_locations: top_values(&members, columns::LOCATION, TOP_LOCATIONS),
        shifts: top_values(&members, columns::SHIFT, usize::MAX),
        employees: members.iter().map(|record| entry(record)).collect(),
        management_staff: management_staff(&members),
    })
}

fn rates(metrics: SegmentMetrics) -> (f64, f64, f64) {
    (
        round2(percent(metrics.active, metrics.headcount)),
        round2(percent(metrics.management, metrics.headcount)),
        round2(percent(metrics.voice, metrics.headcount)),
    )
}

fn breakdown<F>(members: &[&CanonicalRecord], label: F) -> Vec<DistributionEntry>
where
    F: Fn(&CanonicalRecord) -> Option<&'static str>,
{
    tally(members.iter().filter_map(|record| label(*record)), members.len())
}

/// Most common non-blank values of a plain column, at most `limit` of them.
fn top_values(members: &[&CanonicalRecord], column: &str, limit: usize) -> Vec<DistributionEntry> {
    let mut entries = tally(
        members
            .iter()
            .filter_map(|record| record.get(column))
            .filter(|value| !value.is_empty()),
        members.len(),
    );
    entries.truncate(limit);
    entries
}

fn management_staff(members: &[&CanonicalRecord]) -> Vec<EmployeeEntry> {
    members
        .iter()
        .filter(|record| record.is_management())
        .map(|record| entry(record))
        .collect()
}

fn segment_metrics(members: &[&CanonicalRecord]) -> SegmentMetrics {
    members
        .iter()
        .fold(SegmentMetrics::default(), |mut metrics, record| {
            metrics.headcount += 1;
            if !record.is_loa() {
                metrics.active += 1;
            } else {
                metrics.loa += 1;
            }
            match record.queue_type {
                Some(QueueType::Voice) => metrics.voice += 1,
                Some(QueueType::NonVoice) => metrics.non_voice += 1,
                _ => {}
            }
            if record.is_management() {
                metrics.management += 1;
            }
            metrics
        })
}

fn entry(record: &CanonicalRecord) -> EmployeeEntry {
    EmployeeEntry {
        employee_id: record.employee_id().map(str::to_string),
        employee_name: record.employee_name().map(str::to_string),
        queue: record.queue().map(str::to_string),
        position: record.position().map(str::to_string),
        role_category: record.role_category,
        loa_status: record.loa_status,
    }
}
