//! Export helpers for trajectory files and orbital element reports.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while reading or writing exported artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trajectory line {line}: {message}")]
    Row { line: u64, message: String },
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Propagator trajectory files: one `x y z vx vy vz` row per sample, tab-separated, no header.
pub mod trajectory {
    use std::fs::File;
    use std::io::{Read, Write};
    use std::path::Path;

    use csv::{ReaderBuilder, Trim, WriterBuilder};
    use qspace_orbits::CartesianState;
    use tracing::debug;

    use super::ExportError;

    const COLUMNS: usize = 6;

    /// Read every state row from a trajectory file.
    pub fn read_trajectory(path: &Path) -> Result<Vec<CartesianState>, ExportError> {
        let states = read_trajectory_from(File::open(path)?)?;
        debug!(path = %path.display(), rows = states.len(), "read trajectory");
        Ok(states)
    }

    /// Read state rows from any reader. Blank lines are skipped.
    pub fn read_trajectory_from<R: Read>(reader: R) -> Result<Vec<CartesianState>, ExportError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut states = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != COLUMNS {
                return Err(ExportError::Row {
                    line,
                    message: format!("expected {COLUMNS} columns, found {}", record.len()),
                });
            }
            let mut values = [0.0_f64; COLUMNS];
            for (slot, field) in values.iter_mut().zip(record.iter()) {
                *slot = field.parse().map_err(|_| ExportError::Row {
                    line,
                    message: format!("`{field}` is not a number"),
                })?;
            }
            states.push(CartesianState::new(
                [values[0], values[1], values[2]],
                [values[3], values[4], values[5]],
            ));
        }
        Ok(states)
    }

    /// Write states in the trajectory layout.
    pub fn write_trajectory<W: Write>(
        writer: W,
        states: &[CartesianState],
    ) -> Result<(), ExportError> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        for state in states {
            let r = &state.position_km;
            let v = &state.velocity_km_s;
            csv_writer.write_record(
                [r[0], r[1], r[2], v[0], v[1], v[2]]
                    .iter()
                    .map(|value| value.to_string()),
            )?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Element tables (CSV) and single-orbit reports (JSON).
pub mod elements {
    use std::io::Write;

    use qspace_orbits::{CartesianState, KeplerianElements};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::ExportError;

    /// One row of an element table; angles in degrees.
    #[derive(Debug, Clone, Serialize)]
    pub struct ElementRow {
        pub index: usize,
        pub a_km: f64,
        pub e: f64,
        pub i_deg: f64,
        pub raan_deg: f64,
        pub argp_deg: f64,
        pub nu_deg: f64,
    }

    impl ElementRow {
        pub fn new(index: usize, elements: &KeplerianElements) -> Self {
            let [i_deg, raan_deg, argp_deg, nu_deg] = elements.angles_deg();
            Self {
                index,
                a_km: elements.a,
                e: elements.e,
                i_deg,
                raan_deg,
                argp_deg,
                nu_deg,
            }
        }
    }

    /// Write rows with the header `index,a_km,e,i_deg,raan_deg,argp_deg,nu_deg`.
    pub fn write_elements_csv<W: Write>(writer: W, rows: &[ElementRow]) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Angles of an element set in degrees.
    #[derive(Debug, Clone, Serialize)]
    pub struct AnglesDeg {
        pub i: f64,
        pub raan: f64,
        pub omega: f64,
        pub theta: f64,
    }

    /// Summary of one orbit: the state, its elements, and derived quantities.
    #[derive(Debug, Clone, Serialize)]
    pub struct ElementsReport {
        pub body: String,
        pub mu_km3_s2: f64,
        pub state: CartesianState,
        pub elements: KeplerianElements,
        pub degrees: AnglesDeg,
        pub period_s: Option<f64>,
    }

    impl ElementsReport {
        pub fn new(
            body: &str,
            mu_km3_s2: f64,
            state: CartesianState,
            elements: KeplerianElements,
        ) -> Self {
            let [i, raan, omega, theta] = elements.angles_deg();
            Self {
                body: body.to_string(),
                mu_km3_s2,
                state,
                elements,
                degrees: AnglesDeg {
                    i,
                    raan,
                    omega,
                    theta,
                },
                period_s: elements.period(mu_km3_s2),
            }
        }
    }

    /// Serialize a report as pretty-printed JSON.
    pub fn write_report<W: Write>(writer: W, report: &ElementsReport) -> Result<(), ExportError> {
        to_writer_pretty(writer, report)?;
        Ok(())
    }
}
