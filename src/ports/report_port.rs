//! Report rendering port trait.

use crate::domain::error::TechdashError;
use crate::domain::report::IndicatorReport;
use std::io::Write;

/// Port for rendering indicator reports.
pub trait ReportPort {
    fn render(&self, report: &IndicatorReport, out: &mut dyn Write) -> Result<(), TechdashError>;

    /// Default implementation: renders each report in turn.
    fn render_all(
        &self,
        reports: &[IndicatorReport],
        out: &mut dyn Write,
    ) -> Result<(), TechdashError> {
        for report in reports {
            self.render(report, out)?;
        }
        Ok(())
    }
}
