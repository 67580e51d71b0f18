//! Output encodings for the ranked author summaries.
//!
//! Every format consumes the same ranked slice and writes to any
//! [`std::io::Write`]; the binary hands in locked stdout.

use crate::error::{GitfameError, Result};
use crate::ranking::AuthorSummary;
use prettytable::{format, Attr, Cell, Row, Table};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Column headers shared by the tabular, CSV and pretty encodings.
pub const HEADERS: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

/// Output encoding, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Space separated, left aligned columns.
    #[default]
    Tabular,
    /// Comma separated values with a header row.
    Csv,
    /// One JSON array.
    Json,
    /// One JSON object per line.
    JsonLines,
    /// Bordered terminal table.
    Pretty,
}

impl OutputFormat {
    /// The format's name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::JsonLines => "json-lines",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = GitfameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tabular" => Ok(Self::Tabular),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "json-lines" => Ok(Self::JsonLines),
            "pretty" => Ok(Self::Pretty),
            _ => Err(GitfameError::config_error(format!(
                "invalid format '{}': expected one of tabular, csv, json, json-lines, pretty",
                s
            ))),
        }
    }
}

/// Writes `summaries` to `out` in `format`.
///
/// # Errors
///
/// Returns a [`GitfameError::RenderError`] if serialization or the underlying
/// writer fails.
pub fn render<W: Write>(format: OutputFormat, summaries: &[AuthorSummary], out: &mut W) -> Result<()> {
    tracing::debug!(%format, authors = summaries.len(), "Rendering statistics");
    match format {
        OutputFormat::Tabular => write_tabular(summaries, out),
        OutputFormat::Csv => write_csv(summaries, out),
        OutputFormat::Json => write_json(summaries, out),
        OutputFormat::JsonLines => write_json_lines(summaries, out),
        OutputFormat::Pretty => write_pretty(summaries, out),
    }
}

/// Renders into a `String`; handy for tests and embedding.
pub fn render_to_string(format: OutputFormat, summaries: &[AuthorSummary]) -> Result<String> {
    let mut buf = Vec::new();
    render(format, summaries, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| GitfameError::render_error(format.as_str(), format!("output is not UTF-8: {}", e)))
}

fn write_failed(format: OutputFormat, err: io::Error) -> GitfameError {
    GitfameError::RenderError {
        format: format.as_str().to_string(),
        message: format!("Failed to write output: {}", err),
        source: Some(Box::new(err)),
    }
}

fn row_values(summary: &AuthorSummary) -> [String; 4] {
    [
        summary.name.clone(),
        summary.lines.to_string(),
        summary.commits.to_string(),
        summary.files.to_string(),
    ]
}

fn write_tabular<W: Write>(summaries: &[AuthorSummary], out: &mut W) -> Result<()> {
    let rows: Vec<[String; 4]> = summaries.iter().map(row_values).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let header = HEADERS.map(str::to_string);
    for row in std::iter::once(&header).chain(&rows) {
        let mut line = String::new();
        for (idx, value) in row.iter().enumerate() {
            if idx + 1 == row.len() {
                line.push_str(value);
            } else {
                line.push_str(&format!("{:<width$} ", value, width = widths[idx]));
            }
        }
        writeln!(out, "{}", line).map_err(|e| write_failed(OutputFormat::Tabular, e))?;
    }
    Ok(())
}

fn write_csv<W: Write>(summaries: &[AuthorSummary], out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADERS)?;
    for summary in summaries {
        writer.write_record(row_values(summary))?;
    }
    writer.flush().map_err(|e| write_failed(OutputFormat::Csv, e))
}

fn write_json<W: Write>(summaries: &[AuthorSummary], out: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *out, summaries)?;
    writeln!(out).map_err(|e| write_failed(OutputFormat::Json, e))
}

fn write_json_lines<W: Write>(summaries: &[AuthorSummary], out: &mut W) -> Result<()> {
    for summary in summaries {
        serde_json::to_writer(&mut *out, summary)?;
        writeln!(out).map_err(|e| write_failed(OutputFormat::JsonLines, e))?;
    }
    Ok(())
}

fn write_pretty<W: Write>(summaries: &[AuthorSummary], out: &mut W) -> Result<()> {
    let mut table = Table::new();
    table.set_format(
        format::FormatBuilder::new()
            .column_separator('│')
            .borders('│')
            .separator(
                format::LinePosition::Top,
                format::LineSeparator::new('─', '┬', '┌', '┐'),
            )
            .separator(
                format::LinePosition::Title,
                format::LineSeparator::new('═', '╪', '╞', '╡'),
            )
            .separator(
                format::LinePosition::Bottom,
                format::LineSeparator::new('─', '┴', '└', '┘'),
            )
            .padding(1, 1)
            .build(),
    );

    table.set_titles(Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::new(h).with_style(Attr::Bold))
            .collect(),
    ));

    for summary in summaries {
        table.add_row(Row::new(vec![
            Cell::new(&summary.name),
            Cell::new(&summary.lines.to_string()),
            Cell::new(&summary.commits.to_string()),
            Cell::new(&summary.files.to_string()),
        ]));
    }

    table
        .print(out)
        .map(|_| ())
        .map_err(|e| write_failed(OutputFormat::Pretty, e))
}
