use std::process::ExitCode;

use fpscan_lib::{FpError, Report};

/// Outcome of a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// The page exposed at least one fingerprint field.
    Complete,
    /// A schema-shaped report was written, but every field came back empty.
    Empty,
}

pub fn scan_status(report: &Report) -> ScanStatus {
    if report.has_features() {
        ScanStatus::Complete
    } else {
        ScanStatus::Empty
    }
}

/// Map a scan outcome to the process exit code.
///
/// Exit code 3 flags "no fingerprint data found" to callers; fatal errors
/// use 1 (see [`render_error`]).
pub fn exit_code_for_scan(status: ScanStatus) -> ExitCode {
    match status {
        ScanStatus::Complete => ExitCode::SUCCESS,
        ScanStatus::Empty => ExitCode::from(3),
    }
}

/// Render an error to stderr with its remediation hint and return the fatal
/// exit code.
pub fn render_error(err: FpError) -> ExitCode {
    let payload = err.to_payload();
    eprintln!("[error] {}: {}", payload.category, payload.message);
    if let Some(remediation) = payload.remediation {
        eprintln!("Hint: {remediation}");
    }
    ExitCode::from(1)
}
