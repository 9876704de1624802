//! The `estimate` command: gather exam details, size the instance, report
//!
//! Inputs come from flags, from a CSV roster file, or both; explicit flags
//! win over CSV values. A structural CSV failure aborts the command, while a
//! CSV with a non-numeric student count still contributes its text fields
//! and leaves the count to `--students`. Successful analyses are appended to
//! the history store unless `--no-save` is given.

use console::style;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::catalog::Catalog;
use crate::csv_import::{parse_csv, CsvImport};
use crate::error::{ExamcostError, Result};
use crate::estimate::{estimate, ResourceEstimate, SAFETY_MARGIN};
use crate::history::{AnalysisRecord, HistoryStore};
use crate::utils::{daily_cost, format_hourly_cost, format_usd};
use crate::validation;

/// Fully resolved exam details, ready for estimation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamInputs {
    pub university: String,
    pub subject: String,
    pub students: u32,
}

/// Merge flag values and an optional CSV import into validated inputs
///
/// Flags override CSV fields. A CSV whose count cell was soft-invalid
/// contributes university/subject only; the count must then come from
/// `--students`.
pub fn resolve_inputs(
    university: Option<String>,
    subject: Option<String>,
    students: Option<u32>,
    csv: Option<&CsvImport>,
) -> Result<ExamInputs> {
    let csv_university = csv
        .map(|import| import.university.clone())
        .filter(|value| !value.is_empty());
    let csv_subject = csv
        .map(|import| import.subject.clone())
        .filter(|value| !value.is_empty());

    let university = university
        .filter(|value| !value.trim().is_empty())
        .or(csv_university)
        .unwrap_or_default();
    let subject = subject
        .filter(|value| !value.trim().is_empty())
        .or(csv_subject)
        .unwrap_or_default();
    let students = students.or_else(|| csv.and_then(|import| import.students));

    validation::validate_university(&university)?;
    validation::validate_subject(&subject)?;

    let students = students.ok_or_else(|| ExamcostError::Validation {
        field: "students".to_string(),
        reason: if csv.is_some() {
            "student count missing: the CSV count cell was not a number, pass --students instead"
                .to_string()
        } else {
            "student count missing: pass --students or import it from a CSV file".to_string()
        },
    })?;
    validation::validate_student_count(students)?;

    Ok(ExamInputs {
        university,
        subject,
        students,
    })
}

#[derive(Serialize)]
struct AnalysisJson<'a> {
    university: &'a str,
    subject: &'a str,
    students: u32,
    estimate: &'a ResourceEstimate,
    daily_cost: f64,
    cpu_utilization_pct: f64,
    memory_utilization_pct: f64,
    saved: bool,
}

/// Run a full cost analysis and render the result
#[allow(clippy::too_many_arguments)]
pub fn run_estimate(
    university: Option<String>,
    subject: Option<String>,
    students: Option<u32>,
    csv_path: Option<&Path>,
    no_save: bool,
    catalog: &Catalog,
    store: &dyn HistoryStore,
    output_format: &str,
) -> Result<()> {
    let import = match csv_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let import = parse_csv(&raw)?;
            debug!(
                "CSV import: university={:?} subject={:?} students={:?}",
                import.university, import.subject, import.students
            );
            Some(import)
        }
        None => None,
    };

    let inputs = resolve_inputs(university, subject, students, import.as_ref())?;
    let result = estimate(catalog, inputs.students)?;

    let saved = !no_save;
    if saved {
        store.append(AnalysisRecord::new(
            &inputs.university,
            &inputs.subject,
            inputs.students,
            &result.recommended.name,
            result.recommended.cost_per_hour,
        ))?;
    }

    if output_format == "json" {
        let report = AnalysisJson {
            university: &inputs.university,
            subject: &inputs.subject,
            students: inputs.students,
            estimate: &result,
            daily_cost: daily_cost(result.recommended.cost_per_hour),
            cpu_utilization_pct: result.cpu_utilization(),
            memory_utilization_pct: result.memory_utilization(),
            saved,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_text(&inputs, &result, saved);
    Ok(())
}

fn render_text(inputs: &ExamInputs, result: &ResourceEstimate, saved: bool) {
    let instance = &result.recommended;

    println!("{}", "=".repeat(80));
    println!("Exam Hosting Cost Analysis");
    println!("{}", "=".repeat(80));
    println!("University: {}", inputs.university);
    println!("Subject:    {}", inputs.subject);
    println!("Students:   {}", inputs.students);
    println!();

    println!(
        "Recommended Instance: {}",
        style(&instance.name).cyan().bold()
    );
    println!("  {} vCPU, {:.0} GB RAM", instance.vcpu, instance.memory_gb);
    println!();

    println!("COST:");
    println!(
        "  hourly: {}",
        format_hourly_cost(instance.cost_per_hour)
    );
    println!(
        "  daily:  {}",
        format_usd(daily_cost(instance.cost_per_hour))
    );
    println!();

    println!("Resource Requirements:");
    println!(
        "  CPU:    {:.2}/{} vCPU ({:.0}% utilization)",
        result.demand.cpu,
        instance.vcpu,
        result.cpu_utilization()
    );
    println!(
        "  Memory: {:.2}/{:.0} GB ({:.0}% utilization)",
        result.demand.memory_gb,
        instance.memory_gb,
        result.memory_utilization()
    );

    if let Some(headroom) = &result.headroom {
        println!(
            "  Headroom: {:.2} vCPU, {:.2} GB",
            headroom.cpu, headroom.memory_gb
        );
    }

    if let Some(warning) = &result.warning {
        println!();
        println!(
            "{} {}",
            style("WARNING:").red().bold(),
            style(warning).red().bold()
        );
    }

    println!();
    println!(
        "Calculation includes a {:.0}% safety margin",
        (SAFETY_MARGIN - 1.0) * 100.0
    );
    if saved {
        println!("Saved to history");
    }
}
