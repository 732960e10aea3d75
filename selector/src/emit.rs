//! The second pass: write the selected records in input order.
use crate::fasta::{open_fasta, parse, records, write_wrapped};
use bio::io::fasta;
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

/// Write every record of `reader` whose id is in `ids`, `line_width` residues per line.
/// Returns the number of records written.
pub fn emit_selected<R: Read, W: Write>(
    reader: R,
    ids: &HashSet<String>,
    wtr: &mut fasta::Writer<W>,
    line_width: usize,
) -> std::io::Result<usize> {
    emit_from_records(records(reader), ids, wtr, line_width)
}

pub fn emit_selected_from_path<P: AsRef<Path>, W: Write>(
    path: P,
    ids: &HashSet<String>,
    wtr: &mut fasta::Writer<W>,
    line_width: usize,
) -> std::io::Result<usize> {
    let reader = open_fasta(path)?;
    emit_from_records(parse(reader), ids, wtr, line_width)
}

fn emit_from_records<I, W>(
    records: I,
    ids: &HashSet<String>,
    wtr: &mut fasta::Writer<W>,
    line_width: usize,
) -> std::io::Result<usize>
where
    I: Iterator<Item = std::io::Result<fasta::Record>>,
    W: Write,
{
    let mut emitted = 0;
    for record in records {
        let record = record?;
        if ids.contains(record.id()) {
            write_wrapped(wtr, &record, line_width)?;
            emitted += 1;
        }
    }
    wtr.flush()?;
    debug!("EMIT\tRecords\t{}", emitted);
    Ok(emitted)
}
