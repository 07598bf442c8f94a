//! Print server-reported errors and warnings to a diagnostic stream.

use crate::response::ApiResponse;
use std::io::Write;

/// Write `ERROR: <msg>` for every server error. Returns true if there were any.
pub fn report_errors(res: &ApiResponse, out: &mut impl Write) -> bool {
    report(&res.errors, "ERROR: ", out)
}

/// Write `WARNING: <msg>` for every server warning. Returns true if there were any.
pub fn report_warnings(res: &ApiResponse, out: &mut impl Write) -> bool {
    report(&res.warnings, "WARNING: ", out)
}

/// Write each message with `tag` prefixed, one per line.
pub fn report(messages: &[String], tag: &str, out: &mut impl Write) -> bool {
    for m in messages {
        // write failures on the diagnostic stream are ignored
        let _ = writeln!(out, "{}{}", tag, m);
    }
    !messages.is_empty()
}
