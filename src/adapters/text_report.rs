//! Plain-text report adapter implementing ReportPort.

use std::io::Write;

use crate::domain::error::TechdashError;
use crate::domain::payload::{IndicatorRecord, PriceInfo};
use crate::domain::report::IndicatorReport;
use crate::ports::report_port::ReportPort;

const NOT_AVAILABLE: &str = "N/A";

pub struct TextReportAdapter {
    show_raw: bool,
}

impl TextReportAdapter {
    pub fn new(show_raw: bool) -> Self {
        Self { show_raw }
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new(false)
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn write_price(out: &mut dyn Write, price: &PriceInfo) -> std::io::Result<()> {
    writeln!(
        out,
        "Current Price: ₹{}  Change: ₹{} ({}%)  High: ₹{}  Low: ₹{}",
        or_na(&price.last_price),
        price.change.as_deref().unwrap_or("0"),
        price.percent_change.as_deref().unwrap_or("0"),
        or_na(&price.high),
        or_na(&price.low),
    )
}

fn write_indicator(out: &mut dyn Write, record: &IndicatorRecord) -> std::io::Result<()> {
    let name = if record.name.is_empty() {
        "Indicator"
    } else {
        record.name.as_str()
    };
    let marker = if record.is_buy() { "+" } else { "-" };
    writeln!(
        out,
        "  {:<24} value {:<10} signal {:<10} action {} [{}]",
        name,
        or_na(&record.value),
        or_na(&record.signal),
        or_na(&record.action),
        marker,
    )
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &IndicatorReport, out: &mut dyn Write) -> Result<(), TechdashError> {
        writeln!(out, "== {} ({}) ==", report.name, report.symbol)?;
        writeln!(
            out,
            "ISIN: {}  sc_id: {}",
            or_na(&report.isin),
            or_na(&report.sc_id)
        )?;
        if let Some(price) = &report.price {
            write_price(out, price)?;
        }

        if !report.has_indicators() {
            writeln!(out, "No technical indicators found in the response.")?;
            if self.show_raw {
                let raw = serde_json::to_string_pretty(report.raw.raw())
                    .map_err(std::io::Error::from)?;
                writeln!(out, "{}", raw)?;
            }
            writeln!(out)?;
            return Ok(());
        }

        for group in report.non_empty_groups() {
            writeln!(out)?;
            writeln!(out, "{} Indicators", group.category)?;
            for record in &group.indicators {
                write_indicator(out, record)?;
            }
        }
        writeln!(out)?;
        Ok(())
    }

    fn render_all(
        &self,
        reports: &[IndicatorReport],
        out: &mut dyn Write,
    ) -> Result<(), TechdashError> {
        for report in reports {
            self.render(report, out)?;
        }
        if let Some(last) = reports.last() {
            writeln!(out, "---")?;
            writeln!(
                out,
                "Data provided by MoneyControl API | Updated at {}",
                last.generated_at.format("%Y-%m-%d %H:%M:%S")
            )?;
            writeln!(
                out,
                "Note: This tool is for educational purposes only. Not investment advice."
            )?;
        }
        Ok(())
    }
}
