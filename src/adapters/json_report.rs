//! JSON report adapter implementing ReportPort.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::domain::error::TechdashError;
use crate::domain::report::IndicatorReport;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter {
    include_raw: bool,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    report: &'a IndicatorReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<&'a Value>,
}

impl JsonReportAdapter {
    pub fn new(include_raw: bool) -> Self {
        Self { include_raw }
    }

    fn document<'a>(&self, report: &'a IndicatorReport) -> JsonDocument<'a> {
        JsonDocument {
            report,
            raw: self.include_raw.then(|| report.raw.raw()),
        }
    }
}

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &IndicatorReport, out: &mut dyn Write) -> Result<(), TechdashError> {
        serde_json::to_writer_pretty(&mut *out, &self.document(report))
            .map_err(std::io::Error::from)?;
        writeln!(out)?;
        Ok(())
    }

    /// Several reports render as one JSON array.
    fn render_all(
        &self,
        reports: &[IndicatorReport],
        out: &mut dyn Write,
    ) -> Result<(), TechdashError> {
        let documents: Vec<JsonDocument<'_>> = reports.iter().map(|r| self.document(r)).collect();
        serde_json::to_writer_pretty(&mut *out, &documents).map_err(std::io::Error::from)?;
        writeln!(out)?;
        Ok(())
    }
}
