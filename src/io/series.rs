use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dynamics::state::Record;

/// One column of the trajectory, written to its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Position,
    Velocity,
    Force,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Position, Quantity::Velocity, Quantity::Force];

    pub fn name(self) -> &'static str {
        match self {
            Quantity::Position => "position",
            Quantity::Velocity => "velocity",
            Quantity::Force => "force",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }

    pub fn of(self, r: &Record) -> f64 {
        match self {
            Quantity::Position => r.position,
            Quantity::Velocity => r.velocity,
            Quantity::Force => r.force,
        }
    }
}

/// Write `time <tab> value` lines for one quantity.
pub fn write_series<W: Write>(writer: &mut W, records: &[Record], quantity: Quantity) -> io::Result<()> {
    writeln!(writer, "# time\t{}", quantity.name())?;
    for r in records {
        writeln!(writer, "{:.6}\t{:.6}", r.time, quantity.of(r))?;
    }
    Ok(())
}

/// Write position.txt, velocity.txt and force.txt into `dir`.
pub fn write_series_files(dir: &Path, records: &[Record]) -> io::Result<()> {
    for q in Quantity::ALL {
        let mut file = BufWriter::new(std::fs::File::create(dir.join(q.file_name()))?);
        write_series(&mut file, records, q)?;
        file.flush()?;
    }
    Ok(())
}
