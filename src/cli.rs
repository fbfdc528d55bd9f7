//! Streams a numeric CSV column through the lag engine.
//!
//! Rows are read, lagged and written one at a time; the input is never held
//! in memory beyond the `offset` values the lag window needs.

use serde::Serialize;
use std::fmt;
use std::io::{Read, Write};

use crate::config::{LagConfig, OutputFormat};
use crate::error::ArgumentError;
use crate::ops::{LagExt, WindowStrategy};

/// Errors that can occur while running the lag tool
#[derive(Debug)]
pub enum CliError {
    /// Bad configuration value
    Argument(ArgumentError),
    /// Requested column is not in the header row
    UnknownColumn(String),
    /// A record is shorter than the selected column index
    MissingField { row: usize },
    /// A field could not be read as a number
    Parse { row: usize, value: String },
    Csv(csv::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Argument(err) => write!(f, "{}", err),
            CliError::UnknownColumn(name) => write!(f, "Column not found: {}", name),
            CliError::MissingField { row } => write!(f, "Row {} has no value in the selected column", row),
            CliError::Parse { row, value } => write!(f, "Row {}: not a number: {:?}", row, value),
            CliError::Csv(err) => write!(f, "CSV error: {}", err),
            CliError::Json(err) => write!(f, "JSON error: {}", err),
            CliError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Argument(err) => Some(err),
            CliError::Csv(err) => Some(err),
            CliError::Json(err) => Some(err),
            CliError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArgumentError> for CliError {
    fn from(err: ArgumentError) -> Self {
        CliError::Argument(err)
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Csv(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagRow {
    pub index: usize,
    pub current: f64,
    pub lagged: Option<f64>,
    pub value: Option<f64>,
}

/// Summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written
    pub rows: usize,
    /// Leading rows paired with the default rather than a real predecessor
    pub burn_in: usize,
}

enum RowSink<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> RowSink<W> {
    fn new(format: OutputFormat, output: W) -> Self {
        match format {
            OutputFormat::Csv => RowSink::Csv(csv::Writer::from_writer(output)),
            OutputFormat::Json => RowSink::Json(output),
        }
    }

    fn write(&mut self, row: &LagRow) -> Result<(), CliError> {
        match self {
            RowSink::Csv(writer) => writer.serialize(row)?,
            RowSink::Json(writer) => {
                serde_json::to_writer(&mut *writer, row)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<(), CliError> {
        match self {
            RowSink::Csv(mut writer) => writer.flush()?,
            RowSink::Json(mut writer) => writer.flush()?,
        }
        Ok(())
    }
}

/// Reads CSV from `input`, lags the configured column and writes the rows to
/// `output`.
///
/// A malformed row stops the run at that row; rows before it are already
/// written.
pub fn run<R: Read, W: Write>(
    config: &LagConfig,
    input: R,
    output: W,
) -> Result<RunSummary, CliError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let column = match &config.column {
        Some(name) => headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| CliError::UnknownColumn(name.clone()))?,
        None => 0,
    };

    tracing::info!(
        offset = config.offset,
        column = headers.get(column).unwrap_or(""),
        projection = %config.projection,
        "lagging CSV column"
    );

    let values = reader
        .into_records()
        .enumerate()
        .map(move |(row, record)| -> Result<f64, CliError> {
            let record = record?;
            let field = record.get(column).ok_or(CliError::MissingField { row })?;
            field.trim().parse::<f64>().map_err(|_| CliError::Parse {
                row,
                value: field.to_string(),
            })
        });

    let projection = config.projection;
    let mut index = 0;
    let rows = values.try_lag(config.offset, config.default, move |current, lagged: Option<f64>| {
        let row = LagRow {
            index,
            current,
            lagged,
            value: projection.apply(current, lagged),
        };
        index += 1;
        Ok::<_, CliError>(row)
    })?;
    let burn_in = rows.burn_in();

    let mut sink = RowSink::new(config.format, output);
    let mut written = 0;
    for row in rows {
        sink.write(&row?)?;
        written += 1;
    }
    sink.finish()?;

    tracing::debug!(rows = written, "lag run complete");
    Ok(RunSummary {
        rows: written,
        burn_in: burn_in.min(written),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;

    fn run_to_string(config: &LagConfig, input: &str) -> Result<(RunSummary, String), CliError> {
        let mut output = Vec::new();
        let summary = run(config, input.as_bytes(), &mut output)?;
        Ok((summary, String::from_utf8(output).unwrap()))
    }

    #[test]
    fn csv_output_leaves_priming_lag_empty() {
        let config = LagConfig::new(2);
        let (summary, output) = run_to_string(&config, "close\n10\n20\n30\n").unwrap();

        assert_eq!(summary, RunSummary { rows: 3, burn_in: 2 });
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, vec!["index,current,lagged,value", "0,10.0,,", "1,20.0,,", "2,30.0,10.0,"]);
    }

    #[test]
    fn json_output_applies_projection_to_named_column() {
        let config = LagConfig {
            column: Some("close".to_string()),
            projection: Projection::Difference,
            format: OutputFormat::Json,
            default: Some(0.0),
            ..LagConfig::new(1)
        };
        let (_, output) = run_to_string(&config, "date,close\nmon,5\ntue,8\n").unwrap();

        let rows: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["lagged"], 0.0);
        assert_eq!(rows[0]["value"], 5.0);
        assert_eq!(rows[1]["lagged"], 5.0);
        assert_eq!(rows[1]["value"], 3.0);
    }

    #[test]
    fn unknown_column_is_reported() {
        let config = LagConfig {
            column: Some("volume".to_string()),
            ..LagConfig::default()
        };
        let err = run_to_string(&config, "close\n1\n").unwrap_err();
        assert!(matches!(err, CliError::UnknownColumn(ref name) if name == "volume"));
    }

    #[test]
    fn bad_value_stops_at_its_row() {
        let config = LagConfig::default();
        let mut output = Vec::new();
        let err = run(&config, "close\n1\nabc\n3\n".as_bytes(), &mut output).unwrap_err();

        assert!(matches!(err, CliError::Parse { row: 1, .. }));
        let written = String::from_utf8(output).unwrap();
        assert!(written.contains("0,1.0,,"));
        assert!(!written.contains("3.0"));
    }
}
