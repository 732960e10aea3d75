//! FASTA input and output on top of `bio::io::fasta`.
use bio::io::fasta;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Residues per line in the output.
pub const DEFAULT_LINE_WIDTH: usize = 60;

pub type FastaReader = fasta::Reader<BufReader<Box<dyn Read>>>;

/// True if the file name ends with `.gz`. The content is never sniffed.
pub fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().to_string_lossy().ends_with(".gz")
}

/// Open a FASTA file, decompressing it on the fly if the name ends with `.gz`.
pub fn open_fasta<P: AsRef<Path>>(path: P) -> std::io::Result<FastaReader> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader: Box<dyn Read> = if is_gzipped(path) {
        debug!("Opening\t{}\tgzip", path.display());
        // Multi-member streams (e.g., bgzip) are concatenated.
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        debug!("Opening\t{}\tplain", path.display());
        Box::new(file)
    };
    Ok(fasta::Reader::new(reader))
}

/// Records of a FASTA stream. Malformed input is reported as `InvalidData`.
pub fn records<R: Read>(reader: R) -> impl Iterator<Item = std::io::Result<fasta::Record>> {
    parse(fasta::Reader::new(reader))
}

pub fn parse<B: std::io::BufRead>(
    reader: fasta::Reader<B>,
) -> impl Iterator<Item = std::io::Result<fasta::Record>> {
    reader.records().map(|record| {
        record.map_err(|why| std::io::Error::new(std::io::ErrorKind::InvalidData, why.to_string()))
    })
}

/// The whole header line after `>`: the id, then the description if any.
pub fn title(record: &fasta::Record) -> String {
    match record.desc() {
        Some(desc) => format!("{} {}", record.id(), desc),
        None => record.id().to_string(),
    }
}

/// Write `record`, `line_width` residues per line. `0` puts the sequence on one line.
pub fn write_wrapped<W: Write>(
    wtr: &mut fasta::Writer<W>,
    record: &fasta::Record,
    line_width: usize,
) -> std::io::Result<()> {
    match line_width {
        0 => wtr.set_linewrap(None),
        width => wtr.set_linewrap(Some(width)),
    }
    wtr.write_record(record)
}
