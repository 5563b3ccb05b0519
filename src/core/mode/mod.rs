pub mod hosted;
pub mod input;
pub mod interactive;

use std::io::{self, Write};

use super::monitor::{report_fetch_failure, report_outcome, CheckOutcome, StatusMonitor};

/// One check plus its console report. `None` means the fetch failed and was
/// already reported.
pub(crate) async fn run_cycle(
    monitor: &StatusMonitor,
    out: &mut impl Write,
) -> io::Result<Option<CheckOutcome>> {
    let outcome = match monitor.check().await {
        Ok(outcome) => outcome,
        Err(error) => {
            report_fetch_failure(out, &error)?;
            out.flush()?;
            return Ok(None);
        }
    };
    report_outcome(out, &outcome)?;
    out.flush()?;
    Ok(Some(outcome))
}
