//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The link, element or file that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Findings of one output file, before they are merged into a report.
#[derive(Debug, Default)]
pub struct FileFindings {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl FileFindings {
    pub fn error(&mut self, target: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(ValidationError {
            target: target.into(),
            reason: reason.into(),
        });
    }

    pub fn warning(&mut self, target: impl Into<String>, reason: impl Into<String>) {
        self.warnings.push(ValidationError {
            target: target.into(),
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Unified validation report for all checks
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Failures, grouped by output file.
    pub errors: BTreeMap<String, Vec<ValidationError>>,
    /// Advisories and policy warnings, grouped by output file.
    pub warnings: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationReport {
    /// Merge the findings of one file.
    pub fn add_file(&mut self, source: String, findings: FileFindings) {
        if !findings.errors.is_empty() {
            self.errors
                .entry(source.clone())
                .or_default()
                .extend(findings.errors);
        }
        if !findings.warnings.is_empty() {
            self.warnings
                .entry(source)
                .or_default()
                .extend(findings.warnings);
        }
    }

    /// Total error count.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    /// Total warning count.
    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(|v| v.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Print the full report (errors -> warnings).
    pub fn print(&self) {
        self.print_section("errors", &self.errors, true);
        self.print_section("warnings", &self.warnings, false);
    }

    /// Print section with format (target + reason for non-empty reason).
    fn print_section(&self, name: &str, entries: &BTreeMap<String, Vec<ValidationError>>, error: bool) {
        if entries.is_empty() {
            return;
        }
        eprintln!();

        let file_count = entries.len();
        let count: usize = entries.values().map(|v| v.len()).sum();
        let heading = if error {
            name.red().bold().to_string()
        } else {
            name.yellow().bold().to_string()
        };

        eprintln!(
            "{} {}",
            heading,
            format!("({file_count} file{}, {count} finding{})", plural_s(file_count), plural_s(count))
                .dimmed()
        );

        for (path, errs) in entries {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                let arrow = if error {
                    "→".red().to_string()
                } else {
                    "→".yellow().to_string()
                };
                if e.reason.is_empty() {
                    eprintln!("{arrow} {}", e.target);
                } else {
                    eprintln!("{arrow} {} {}", e.target, e.reason.dimmed());
                }
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors == 0 {
            write!(f, "{}", "all checks passed".green())?;
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                errors.to_string().red().bold(),
                format!("error{}", plural_s(errors)).dimmed()
            )?;
        }
        if warnings > 0 {
            write!(
                f,
                " {}",
                format!("({warnings} warning{})", plural_s(warnings)).yellow()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_groups_per_file() {
        let mut report = ValidationReport::default();

        let mut a = FileFindings::default();
        a.error("/missing/", "target not found");
        a.warning("/blog/", "missing od-internal-link");
        report.add_file("index.html".into(), a);

        let mut b = FileFindings::default();
        b.warning("svg #1", "missing viewBox");
        report.add_file("blog/x/index.html".into(), b);
        report.add_file("partner/index.html".into(), FileFindings::default());

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.errors.len(), 1);
        let files: Vec<&String> = report.warnings.keys().collect();
        assert_eq!(files, ["blog/x/index.html", "index.html"]);
        assert!(report.has_errors());
    }

    #[test]
    fn test_display_summary() {
        let report = ValidationReport::default();
        assert!(report.to_string().contains("all checks passed"));

        let mut report = ValidationReport::default();
        let mut a = FileFindings::default();
        a.error("x", "");
        a.error("y", "");
        report.add_file("index.html".into(), a);
        let summary = report.to_string();
        assert!(summary.contains('2'));
        assert!(summary.contains("errors"));
    }
}
