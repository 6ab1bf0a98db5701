use crate::error::DumpError;
use crate::tree::DisplayRow;
use std::io::Write;

/// Writes rows depth-first, one record per row, with its depth first.
pub fn dump_csv<W: Write>(
    rows: &[DisplayRow],
    headers: [&str; 3],
    out: W,
) -> Result<(), DumpError> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(["Depth", headers[0], headers[1], headers[2]])?;

    for row in rows {
        write_row(&mut writer, row, 0)?;
    }

    writer.flush()?;

    Ok(())
}

fn write_row<W: Write>(
    writer: &mut csv::Writer<W>,
    row: &DisplayRow,
    depth: usize,
) -> Result<(), DumpError> {
    writer.write_record([
        depth.to_string().as_str(),
        row.label.as_str(),
        row.value.as_str(),
        row.id.as_str(),
    ])?;
    for child in &row.children {
        write_row(writer, child, depth + 1)?;
    }
    Ok(())
}
