//! Sensor health report.

use crate::config::OutputFormat;
use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::source::SystemMetrics;
use std::io::Write;

/// Write `metrics` to `out` in the requested format.
pub fn write_status<W: Write>(
    mut out: W,
    metrics: &SystemMetrics,
    format: OutputFormat,
    csv_bom: bool,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "CPU usage:   {:.1}%", metrics.cpu_usage)?;
            writeln!(out, "RAM usage:   {:.1}%", metrics.ram_usage)?;
            writeln!(out, "Disk usage:  {:.1}%", metrics.disk_usage)?;
            match metrics.temperature {
                Some(t) => writeln!(out, "Temperature: {t:.1}°C")?,
                None => writeln!(out, "Temperature: N/A")?,
            }
            out.flush()?;
        }
        OutputFormat::Csv => {
            if csv_bom {
                out.write_all(UTF8_BOM)?;
            }
            let mut writer = csv::Writer::from_writer(out);
            writer.serialize(metrics)?;
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, metrics).map_err(Error::JsonWrite)?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    Ok(())
}
