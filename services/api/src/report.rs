use chrono::{Local, NaiveDateTime};
use clap::Args;
use roster_insights::error::AppError;
use roster_insights::roster::report::views::{
    DepartmentDetail, Distribution, DistributionEntry, SummaryTable, VerticalDetail,
};
use roster_insights::roster::report::{export_file_name, AnalysisOptions, ExportTable};
use roster_insights::roster::{clean, CanonicalTable, RosterAnalysis, RosterImporter};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Roster CSV export to analyze
    pub(crate) path: PathBuf,
    /// Drill into one department (LOB) and print its vertical summary
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// With --department, print the detail view for one queue
    #[arg(long)]
    pub(crate) queue: Option<String>,
    /// Write every output table as a timestamped CSV into this directory
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
}

pub(crate) fn run_roster_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        path,
        department,
        queue,
        export_dir,
    } = args;

    let table = clean(&RosterImporter::from_path(&path)?);
    let options = AnalysisOptions {
        department,
        queue,
        include_records: false,
    };
    let analysis = RosterAnalysis::build(&table, &options);

    render_roster_report(&path, &analysis);

    if let Some(dir) = export_dir {
        let written = export_tables(
            &table,
            options.department.as_deref(),
            options.queue.as_deref(),
            &dir,
            Local::now().naive_local(),
        )?;
        println!("\nExported {} tables to {}", written.len(), dir.display());
        for file in written {
            println!("- {}", file.display());
        }
    }

    Ok(())
}

pub(crate) fn render_roster_report(path: &Path, analysis: &RosterAnalysis) {
    println!("Roster report for {}", path.display());
    println!("Employees: {}", analysis.employees);

    let sources = &analysis.sources;
    println!(
        "Classifier sources: queue type <- {}, status <- {}, role <- {}",
        sources.queue_type.as_deref().unwrap_or("none"),
        sources.loa_status.as_deref().unwrap_or("none"),
        sources.role_category.as_deref().unwrap_or("none"),
    );

    render_summary_table("LOB summary", &analysis.lob_summary);

    for distribution in [
        &analysis.queue_types,
        &analysis.loa_statuses,
        &analysis.role_categories,
    ] {
        render_distribution(distribution);
    }

    if analysis.management_ratios.is_empty() {
        println!("\nManagement ratios: none");
    } else {
        println!("\nManagement ratios");
        for ratio in &analysis.management_ratios {
            println!("- {}: {:.2}", ratio.label, ratio.value);
        }
    }

    if analysis.insights.is_empty() {
        println!("\nInsights: none");
    } else {
        println!("\nInsights");
        for insight in &analysis.insights {
            println!("- {insight}");
        }
    }

    if let Some(detail) = &analysis.department_detail {
        render_department_detail(detail);
    }

    if let Some(vertical) = &analysis.vertical_summary {
        let department = vertical.department.as_deref().unwrap_or_default();
        render_summary_table(&format!("Vertical summary for {department}"), vertical);
    }

    if let Some(detail) = &analysis.vertical_detail {
        render_vertical_detail(detail);
    }
}

fn render_summary_table(title: &str, summary: &SummaryTable) {
    if summary.is_empty() {
        println!("\n{title}: no data");
        return;
    }

    println!("\n{title}");
    println!("{:<24} Voice Non-Voice LOA ATT Total TL Dir Mgr Mgmt", summary.level.key_header());
    for row in &summary.rows {
        println!(
            "{:<24} {:>5} {:>9} {:>3} {:>3} {:>5} {:>2} {:>3} {:>3} {:>4}",
            row.label,
            row.voice,
            row.non_voice,
            row.loa,
            row.att_move_out,
            row.total,
            row.team_leaders,
            row.directors,
            row.managers,
            row.total_management,
        );
    }
}

fn render_distribution(distribution: &Distribution) {
    if distribution.is_empty() {
        return;
    }

    println!("\n{} distribution", distribution.dimension.label());
    for entry in &distribution.entries {
        println!(
            "- {}: {} ({:.2}%)",
            entry.label, entry.count, entry.percentage
        );
    }
}

fn render_entries(title: &str, entries: &[DistributionEntry]) {
    if entries.is_empty() {
        return;
    }

    println!("{title}");
    for entry in entries {
        println!("- {}: {} ({:.1}%)", entry.label, entry.count, entry.percentage);
    }
}

fn render_department_detail(detail: &DepartmentDetail) {
    let metrics = &detail.metrics;
    println!("\n{} deep dive", detail.department);
    println!(
        "Headcount {}, active {} ({:.1}%), voice {} ({:.1}%), management {} ({:.1}%), queues {}",
        metrics.headcount,
        metrics.active,
        detail.active_rate,
        metrics.voice,
        detail.voice_coverage,
        metrics.management,
        detail.management_rate,
        detail.unique_queues,
    );

    render_entries("Roles", &detail.role_breakdown);
    render_entries("Queue types", &detail.queue_type_breakdown);
    render_entries("Statuses", &detail.status_breakdown);
    render_entries("Top queues", &detail.top_queues);

    if !detail.management_staff.is_empty() {
        println!("Management staff");
        for employee in &detail.management_staff {
            println!(
                "- {} ({}, {})",
                employee.employee_name.as_deref().unwrap_or("unnamed"),
                employee.role_category.map(|role| role.label()).unwrap_or("Unknown"),
                employee.queue.as_deref().unwrap_or("no queue"),
            );
        }
    }
}

fn render_vertical_detail(detail: &VerticalDetail) {
    let metrics = &detail.metrics;
    println!("\n{} / {}", detail.department, detail.queue);
    println!(
        "Headcount {}, active {} ({:.1}%), voice {} ({:.1}%), LOA {}, management {} ({:.1}%)",
        metrics.headcount,
        metrics.active,
        detail.active_rate,
        metrics.voice,
        detail.voice_coverage,
        metrics.loa,
        metrics.management,
        detail.management_rate,
    );

    render_entries("Statuses", &detail.status_breakdown);
    render_entries("Top locations", &detail.top_locations);
    render_entries("Shifts", &detail.shifts);

    if !detail.management_staff.is_empty() {
        println!("Management staff");
        for employee in &detail.management_staff {
            println!(
                "- {} ({})",
                employee.employee_name.as_deref().unwrap_or("unnamed"),
                employee.role_category.map(|role| role.label()).unwrap_or("Unknown"),
            );
        }
    }
}

/// Writes each export table into `dir`; department-scoped tables only when a
/// department was chosen.
pub(crate) fn export_tables(
    table: &CanonicalTable,
    department: Option<&str>,
    queue: Option<&str>,
    dir: &Path,
    at: NaiveDateTime,
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for export in ExportTable::ALL {
        if export.needs_department() && department.is_none() {
            continue;
        }

        let csv = export.render(table, department, queue)?;
        let file = dir.join(export_file_name(export.file_stem(), at));
        std::fs::write(&file, csv)?;
        written.push(file);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_insights::roster::load_roster;

    const ROSTER: &str = "Name,LOB,Phone Queue,Title,QueueStatus\n\
        Ada,Sales,Pro Support,Manager,Normal\n\
        Bo,Sales,Chat,Agent,LOA\n";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "roster-insights-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn export_tables_skips_scoped_tables_without_department() {
        let table = load_roster(ROSTER.as_bytes()).expect("roster loads");
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(8, 30, 0))
            .expect("timestamp");
        let dir = scratch_dir("export");

        let scoped = ExportTable::ALL
            .iter()
            .filter(|export| export.needs_department())
            .count();
        let written = export_tables(&table, None, None, &dir, at).expect("exports");
        assert_eq!(written.len(), ExportTable::ALL.len() - scoped);
        assert!(written
            .iter()
            .any(|file| file.ends_with("roster_summary_table_20240501_083000.csv")));

        let written =
            export_tables(&table, Some("Sales"), Some("Chat"), &dir, at).expect("exports");
        assert_eq!(written.len(), ExportTable::ALL.len());
        let vertical = std::fs::read_to_string(dir.join("vertical_summary_20240501_083000.csv"))
            .expect("vertical export");
        assert!(vertical.starts_with("Vertical,"));
        let records = std::fs::read_to_string(dir.join("department_data_20240501_083000.csv"))
            .expect("department records export");
        assert_eq!(records.lines().count(), 2);
        let pivot = std::fs::read_to_string(dir.join("loa_trends_20240501_083000.csv"))
            .expect("loa pivot export");
        assert_eq!(pivot.lines().next(), Some("Department,Active,LOA"));

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
