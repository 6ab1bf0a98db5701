use crate::error::DumpError;
use crate::tree::DisplayRow;
use std::io::Write;

pub fn dump_json<W: Write>(rows: &[DisplayRow], mut out: W) -> Result<(), DumpError> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
