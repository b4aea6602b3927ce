use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dynamics::state::Record;

/// Write records as a tab-separated table.
///
/// Header: `Force  Position  Velocity  Time`, then one row per step in the
/// same column order, six decimals each.
pub fn write_table<W: Write>(writer: &mut W, records: &[Record]) -> io::Result<()> {
    writeln!(writer, "Force {:>18} {:>16} {:>11}", "Position", "Velocity", "Time")?;

    for r in records {
        writeln!(
            writer,
            "{:.6}\t{:.6}\t{:.6}\t{:.6}",
            r.force, r.position, r.velocity, r.time
        )?;
    }

    Ok(())
}

/// Write the table to a file at the given path.
pub fn write_table_file(path: &Path, records: &[Record]) -> io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    write_table(&mut file, records)?;
    file.flush()
}
