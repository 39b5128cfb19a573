//! Pure formatting functions for UI output.
//!
//! Per-package lines go to stdout so a run can be captured as one log;
//! only fatal start-up errors go to stderr. Styling comes from `console`,
//! which drops colours when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::{PackageOutcome, RetagOutcome, RetagSummary, RunSummary};

/// Format and print a fatal error message in red (stderr).
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a per-package failure with a red cross (stdout).
pub fn display_failure(message: &str) {
    println!("{} {}", style("✗").red(), message);
}

/// Display a non-fatal warning.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{} {}", style("!").yellow().bold(), warning);
}

/// Display the tag a dry run would have created.
pub fn display_dry_run(package: &str, tag: &str) {
    println!(
        "{} {} would be tagged {}",
        style("[dry-run]").cyan(),
        package,
        style(tag).green()
    );
}

/// Display the move a retag dry run would have made.
pub fn display_retag_dry_run(tag: &str, target: &str) {
    println!(
        "{} {} would be moved to {}",
        style("[dry-run]").cyan(),
        style(tag).green(),
        target
    );
}

/// One-line description of a package outcome
pub fn outcome_line(outcome: &PackageOutcome) -> String {
    match outcome {
        PackageOutcome::Bumped {
            package,
            previous,
            next,
            ..
        } => format!("Updated {} from {} to version {}", package, previous, next),
        PackageOutcome::Planned {
            package,
            previous,
            next,
            ..
        } => format!("{} would go from {} to {}", package, previous, next),
        PackageOutcome::NoValidTag { package } => {
            format!("No valid tag found for package {}", package)
        }
        PackageOutcome::Failed { package, message } => format!("{}: {}", package, message),
    }
}

/// Summary counts, e.g. "2 bumped, 1 without tag, 0 failed"
pub fn summary_line(summary: &RunSummary) -> String {
    let mut parts = vec![format!("{} bumped", summary.bumped_count())];
    if summary.planned_count() > 0 {
        parts.push(format!("{} planned", summary.planned_count()));
    }
    parts.push(format!("{} without tag", summary.no_tag_count()));
    parts.push(format!("{} failed", summary.failed_count()));
    parts.join(", ")
}

/// Display the run summary after all packages were processed.
pub fn display_summary(summary: &RunSummary) {
    if summary.outcomes.is_empty() {
        display_status("No packages to process");
        return;
    }

    println!("\n{}", style("Summary:").bold());
    for outcome in &summary.outcomes {
        let line = outcome_line(outcome);
        match outcome {
            PackageOutcome::Bumped { tag, .. } | PackageOutcome::Planned { tag, .. } => {
                println!("  {} {} ({})", style("✓").green(), line, tag);
            }
            PackageOutcome::NoValidTag { .. } => {
                println!("  {} {}", style("-").yellow(), line);
            }
            PackageOutcome::Failed { .. } => println!("  {} {}", style("✗").red(), line),
        }
    }
    println!("{}", summary_line(summary));
}

pub fn retag_line(outcome: &RetagOutcome) -> String {
    match outcome {
        RetagOutcome::Moved { tag, target } => format!("Moved {} to {}", tag, target),
        RetagOutcome::Planned { tag, target } => format!("{} would move to {}", tag, target),
        RetagOutcome::Failed { message, .. } => message.clone(),
    }
}

/// Display the retag summary after all tags were processed.
pub fn display_retag_summary(summary: &RetagSummary) {
    if summary.outcomes.is_empty() {
        return;
    }

    println!("\n{}", style("Summary:").bold());
    for outcome in &summary.outcomes {
        let marker = match outcome {
            RetagOutcome::Failed { .. } => style("✗").red(),
            _ => style("✓").green(),
        };
        println!("  {} {}", marker, retag_line(outcome));
    }
    println!(
        "{} moved, {} failed",
        summary.moved_count(),
        summary.failed_count()
    );
}
