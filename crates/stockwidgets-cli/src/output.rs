use std::io::Write;

use crate::cli::OutputFormat;
use crate::commands::Report;
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&mut out, report)?,
    }
    out.flush()?;
    Ok(())
}

fn write_text(out: &mut impl Write, report: &Report) -> Result<(), CliError> {
    if let Some(matches) = &report.matches {
        if matches.is_empty() {
            writeln!(out, "no matches")?;
        }
        for (index, entry) in matches.iter().enumerate() {
            writeln!(out, "{:>2}. {} - {}", index + 1, entry.symbol, entry.name)?;
        }
    }

    if let Some(price) = &report.price {
        if report.matches.is_some() {
            writeln!(out)?;
        }
        match &price.symbol {
            Some(symbol) => writeln!(out, "{symbol}: {}", price.display)?,
            None => writeln!(out, "{}", price.display)?,
        }
    }
    Ok(())
}
