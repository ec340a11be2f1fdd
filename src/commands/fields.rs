use std::process::ExitCode;

use fpscan_lib::EXPECTED_FIELDS;

/// Print the canonical expected-field schema, one name per line, in report
/// order.
pub fn run_fields() -> ExitCode {
    for name in EXPECTED_FIELDS {
        println!("{name}");
    }
    ExitCode::SUCCESS
}
