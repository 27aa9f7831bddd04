use colored::*;
use indexmap::IndexMap;
use std::fmt::Write;

use crate::core::report::{AnalysisReport, ClassEntry, FileEntry};
use crate::pipeline::PipelineOutcome;

fn heading(out: &mut String, title: &str, count: usize) {
    let _ = writeln!(out, "{} {}", title.bold(), format!("({count})").dimmed());
}

fn classes(out: &mut String, title: &str, entries: &IndexMap<String, ClassEntry>) {
    heading(out, title, entries.len());
    for (name, entry) in entries {
        let parent = entry
            .extends
            .as_deref()
            .map(|p| format!(" extends {p}"))
            .unwrap_or_default();
        let _ = writeln!(out, "  {}{}", name.cyan(), parent.dimmed());
        for method in &entry.methods {
            let _ = writeln!(
                out,
                "    {} {}({})",
                method.visibility.to_string().dimmed(),
                method.name,
                method.params.join(", ")
            );
        }
        if !entry.tables.is_empty() {
            let _ = writeln!(out, "    tables: {}", entry.tables.join(", "));
        }
    }
}

fn files(out: &mut String, title: &str, entries: &IndexMap<String, FileEntry>) {
    heading(out, title, entries.len());
    for (name, entry) in entries {
        let _ = writeln!(
            out,
            "  {} {}",
            name.cyan(),
            entry.file.display().to_string().dimmed()
        );
    }
}

pub fn format_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    classes(&mut out, "Controllers", &report.controllers);
    classes(&mut out, "Models", &report.models);

    heading(&mut out, "Routes", report.routes.len());
    for route in &report.routes {
        let _ = writeln!(
            out,
            "  {:<6} {} -> {}::{}",
            route.http.to_string().green(),
            route.uri,
            route.controller,
            route.method
        );
    }

    files(&mut out, "Libraries", &report.libraries);
    files(&mut out, "Helpers", &report.helpers);

    if report.has_errors() {
        heading(&mut out, "Errors", report.errors.len());
        for (path, message) in &report.errors {
            let _ = writeln!(out, "  {} {}", path.display().to_string().red(), message);
        }
    }
    out
}

pub fn format_outcome(outcome: &PipelineOutcome) -> String {
    let mut out = String::new();
    let status = if outcome.success {
        "SUCCESS".green().bold()
    } else {
        "FAILED".red().bold()
    };
    let _ = writeln!(out, "{} {}", status, outcome.message);
    let _ = writeln!(out, "Generation: {}", outcome.generation.label());

    if let Some(report) = &outcome.report {
        if let Some(error) = report.analysis.as_ref().and_then(|a| a.error()) {
            let _ = writeln!(out, "Analysis: {}", error.red());
        }
        if let Some(analysis) = report.analysis() {
            let _ = writeln!(
                out,
                "Analysis: {} controllers, {} models, {} routes, {} libraries, {} helpers",
                analysis.controllers.len(),
                analysis.models.len(),
                analysis.routes.len(),
                analysis.libraries.len(),
                analysis.helpers.len()
            );
            if analysis.has_errors() {
                let _ = writeln!(
                    out,
                    "{}",
                    format!("{} file(s) could not be parsed", analysis.errors.len()).yellow()
                );
            }
        }
    }
    out
}
