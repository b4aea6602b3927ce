use std::io::{self, BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::dynamics::state::Record;

/// Default element label for the particle.
pub const DEFAULT_LABEL: &str = "P";

/// Points per frame. There is only ever one particle.
const POINTS_PER_FRAME: usize = 1;

/// Embed the 1D position in 3D space along the x axis.
pub fn frame_point(record: &Record) -> Vector3<f64> {
    Vector3::new(record.position, 0.0, 0.0)
}

/// Write an XYZ trajectory: one frame per record, each frame a single point.
///
/// ```text
/// 1
/// step=1 time=0.100000
/// P 0.990000 0.000000 0.000000
/// ```
pub fn write_xyz<W: Write>(writer: &mut W, records: &[Record], label: &str) -> io::Result<()> {
    for (i, r) in records.iter().enumerate() {
        let p = frame_point(r);
        writeln!(writer, "{}", POINTS_PER_FRAME)?;
        writeln!(writer, "step={} time={:.6}", i + 1, r.time)?;
        writeln!(writer, "{} {:.6} {:.6} {:.6}", label, p.x, p.y, p.z)?;
    }
    Ok(())
}

/// Write the XYZ trajectory to a file.
pub fn write_xyz_file(path: &Path, records: &[Record], label: &str) -> io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    write_xyz(&mut file, records, label)?;
    file.flush()
}
