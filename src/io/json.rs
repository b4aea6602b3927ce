use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dynamics::state::{Params, Record};

/// Summary statistics of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub final_time: f64,
    pub final_position: f64,
    pub final_velocity: f64,
    pub final_force: f64,
    pub min_position: f64,
    pub max_position: f64,
    pub max_speed: f64,
}

impl RunSummary {
    /// Compute summary from run records. An empty run reports the initial state.
    pub fn from_records(params: &Params, records: &[Record]) -> Self {
        let (min_position, max_position) = records
            .iter()
            .map(|r| r.position)
            .fold((params.initial_position, params.initial_position), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });

        let max_speed = records
            .iter()
            .map(|r| r.velocity.abs())
            .fold(params.initial_velocity.abs(), f64::max);

        let (final_time, final_position, final_velocity, final_force) = match records.last() {
            Some(r) => (r.time, r.position, r.velocity, r.force),
            None => (
                0.0,
                params.initial_position,
                params.initial_velocity,
                -(params.spring_constant * params.initial_position),
            ),
        };

        RunSummary {
            steps: records.len(),
            final_time,
            final_position,
            final_velocity,
            final_force,
            min_position,
            max_position,
            max_speed,
        }
    }
}

/// Write run summary as JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, params: &Params, summary: &RunSummary) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"parameters\": {{")?;
    writeln!(writer, "    \"initial_position\": {},", params.initial_position)?;
    writeln!(writer, "    \"initial_velocity\": {},", params.initial_velocity)?;
    writeln!(writer, "    \"time_step\": {},", params.time_step)?;
    writeln!(writer, "    \"time_interval\": {},", params.time_interval)?;
    writeln!(writer, "    \"mass\": {},", params.mass)?;
    writeln!(writer, "    \"spring_constant\": {}", params.spring_constant)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"run\": {{")?;
    writeln!(writer, "    \"steps\": {},", summary.steps)?;
    writeln!(writer, "    \"final_time\": {:.6},", summary.final_time)?;
    writeln!(writer, "    \"final_position\": {:.6},", summary.final_position)?;
    writeln!(writer, "    \"final_velocity\": {:.6},", summary.final_velocity)?;
    writeln!(writer, "    \"final_force\": {:.6},", summary.final_force)?;
    writeln!(writer, "    \"min_position\": {:.6},", summary.min_position)?;
    writeln!(writer, "    \"max_position\": {:.6},", summary.max_position)?;
    writeln!(writer, "    \"max_speed\": {:.6}", summary.max_speed)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write run summary JSON to a file.
pub fn write_summary_file(path: &Path, params: &Params, summary: &RunSummary) -> io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    write_summary(&mut file, params, summary)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        Params {
            initial_position: 1.0,
            initial_velocity: 0.0,
            time_step: 1.0,
            time_interval: 3.0,
            mass: 1.0,
            spring_constant: 1.0,
        }
    }

    fn records() -> Vec<Record> {
        vec![
            Record {
                time: 1.0,
                force: 0.0,
                position: 0.0,
                velocity: -1.0,
            },
            Record {
                time: 2.0,
                force: 1.0,
                position: -1.0,
                velocity: -1.0,
            },
            Record {
                time: 3.0,
                force: 0.0,
                position: 0.0,
                velocity: 1.0,
            },
        ]
    }

    #[test]
    fn summary_tracks_extremes_and_final_state() {
        let s = RunSummary::from_records(&params(), &records());
        assert_eq!(s.steps, 3);
        assert_eq!(s.final_time, 3.0);
        assert_eq!(s.final_velocity, 1.0);
        assert_eq!(s.min_position, -1.0);
        assert_eq!(s.max_position, 1.0); // initial position counts
        assert_eq!(s.max_speed, 1.0);
    }

    #[test]
    fn empty_run_reports_initial_state() {
        let s = RunSummary::from_records(&params(), &[]);
        assert_eq!(s.steps, 0);
        assert_eq!(s.final_position, 1.0);
        assert_eq!(s.final_force, -1.0);
    }

    #[test]
    fn json_output_has_sections() {
        let p = params();
        let summary = RunSummary::from_records(&p, &records());
        let mut buf = Vec::new();
        write_summary(&mut buf, &p, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"parameters\""));
        assert!(json.contains("\"spring_constant\": 1"));
        assert!(json.contains("\"steps\": 3,"));
        assert!(json.trim_end().ends_with('}'));
    }
}
