//! User interface module - status output for bump and retag runs.
//!
//! tag-bump never prompts; everything here is output. `formatter` holds the
//! display functions, re-exported for convenience.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_dry_run, display_error, display_failure,
    display_retag_dry_run, display_retag_summary, display_status, display_success,
    display_summary, outcome_line, retag_line, summary_line,
};
