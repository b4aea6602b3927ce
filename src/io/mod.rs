pub mod json;
pub mod series;
pub mod table;
pub mod xyz;

use std::io;
use std::path::Path;

use log::debug;

use crate::dynamics::state::{Params, Record};

/// File names written by [`write_all`].
pub const TABLE_FILE: &str = "output.txt";
pub const XYZ_FILE: &str = "trajectory.xyz";
pub const SUMMARY_FILE: &str = "summary.json";

/// Write every output artifact for a finished run into `dir`.
pub fn write_all(dir: &Path, params: &Params, records: &[Record], label: &str) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;

    table::write_table_file(&dir.join(TABLE_FILE), records)?;
    series::write_series_files(dir, records)?;
    xyz::write_xyz_file(&dir.join(XYZ_FILE), records, label)?;

    let summary = json::RunSummary::from_records(params, records);
    json::write_summary_file(&dir.join(SUMMARY_FILE), params, &summary)?;

    debug!("wrote {} records to {}", records.len(), dir.display());
    Ok(())
}
