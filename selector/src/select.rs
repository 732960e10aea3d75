//! The first pass: pick the longest record of each gene.
use crate::fasta::{open_fasta, parse, records, title};
use crate::gene_key::GeneKeyExtractor;
use definitions::Selection;
use std::io::{Read, Write};
use std::path::Path;

/// Scan every record of `reader` and return the longest record of each gene.
/// A record without any annotation is reported to `diagnostics` and takes no part in the selection.
/// On a tie the record seen first is kept.
pub fn select_longest<R: Read, W: Write>(
    reader: R,
    extractor: &GeneKeyExtractor,
    diagnostics: &mut W,
) -> std::io::Result<Selection> {
    select_from_records(records(reader), extractor, diagnostics)
}

pub fn select_longest_from_path<P: AsRef<Path>, W: Write>(
    path: P,
    extractor: &GeneKeyExtractor,
    diagnostics: &mut W,
) -> std::io::Result<Selection> {
    let reader = open_fasta(path)?;
    select_from_records(parse(reader), extractor, diagnostics)
}

fn select_from_records<I, W>(
    records: I,
    extractor: &GeneKeyExtractor,
    diagnostics: &mut W,
) -> std::io::Result<Selection>
where
    I: Iterator<Item = std::io::Result<bio::io::fasta::Record>>,
    W: Write,
{
    let mut selection = Selection::new();
    for record in records {
        let record = record?;
        match extractor.extract(&title(&record)) {
            Some(gene) => {
                // One byte per residue.
                let (id, len) = (record.id(), record.seq().len());
                if selection.offer(&gene, id, len) {
                    trace!("SELECT\t{}\t{}\t{}", gene, id, len);
                }
            }
            None => {
                writeln!(diagnostics, "{}", extractor.missing_message(record.id()))?;
                selection.skip();
            }
        }
    }
    let stats = selection.stats();
    debug!("SELECT\tRecords\t{}", stats.records);
    debug!("SELECT\tSkipped\t{}", stats.skipped);
    debug!("SELECT\tGenes\t{}", stats.genes);
    Ok(selection)
}

#[cfg(test)]
mod test {
    use super::*;
    fn fasta(entries: &[(&str, usize)]) -> String {
        entries
            .iter()
            .map(|(header, len)| format!(">{}\n{}\n", header, "A".repeat(*len)))
            .collect()
    }
    #[test]
    fn longest_per_gene() {
        let input = fasta(&[
            ("A [gene=X]", 100),
            ("B [gene=X]", 150),
            ("C [locus_tag=Y]", 80),
            ("D no annotation", 500),
        ]);
        let mut diag: Vec<u8> = vec![];
        let extractor = GeneKeyExtractor::default();
        let selection = select_longest(input.as_bytes(), &extractor, &mut diag).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get("X").unwrap().id, "B");
        assert_eq!(selection.get("X").unwrap().length, 150);
        assert_eq!(selection.get("Y").unwrap().id, "C");
        let diag = String::from_utf8(diag).unwrap();
        assert_eq!(
            diag,
            "D : No '[gene=XXX]' or '[locus_tag=XXX]', will not be output!\n"
        );
        let stats = selection.stats();
        assert_eq!((stats.records, stats.skipped, stats.genes), (4, 1, 2));
    }
    #[test]
    fn tie_keeps_first_seen() {
        let input = fasta(&[
            ("A [gene=X]", 120),
            ("B [gene=X]", 120),
            ("C [gene=X]", 90),
        ]);
        let extractor = GeneKeyExtractor::default();
        let selection = select_longest(input.as_bytes(), &extractor, &mut std::io::sink()).unwrap();
        assert_eq!(selection.get("X").unwrap().id, "A");
        assert_eq!(selection.get("X").unwrap().candidates, 3);
    }
    #[test]
    fn gene_and_locus_tag_are_separate_keys() {
        // A record with both annotations is grouped by its gene only.
        let input = fasta(&[
            ("A [gene=X] [locus_tag=L1]", 10),
            ("B [locus_tag=L1]", 20),
            ("C [gene=L1]", 5),
        ]);
        let extractor = GeneKeyExtractor::default();
        let selection = select_longest(input.as_bytes(), &extractor, &mut std::io::sink()).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get("X").unwrap().id, "A");
        assert_eq!(selection.get("L1").unwrap().id, "B");
    }
    #[test]
    fn every_unannotated_record_is_reported_once() {
        let input = fasta(&[("A", 10), ("B [gene=X]", 10), ("C desc", 10)]);
        let mut diag: Vec<u8> = vec![];
        let extractor = GeneKeyExtractor::default();
        select_longest(input.as_bytes(), &extractor, &mut diag).unwrap();
        let diag = String::from_utf8(diag).unwrap();
        let lines: Vec<_> = diag.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("A : No "));
        assert!(lines[1].starts_with("C : No "));
    }
    #[test]
    fn wrapped_sequence_length() {
        let input = ">A [gene=X]\nACGTACGTAC\nACGTA\n>B [gene=X]\nACGTACGTACACG\n";
        let extractor = GeneKeyExtractor::default();
        let selection = select_longest(input.as_bytes(), &extractor, &mut std::io::sink()).unwrap();
        assert_eq!(selection.get("X").unwrap().id, "A");
        assert_eq!(selection.get("X").unwrap().length, 15);
    }
    #[test]
    fn length_counts_residues_only() {
        // CRLF line ends, soft-masked bases and gaps.
        let input = ">A [gene=X]\r\nacgtN\r\nAC-T\r\n>B [gene=Y]\r\n\r\nnnn\r\n";
        let extractor = GeneKeyExtractor::default();
        let selection = select_longest(input.as_bytes(), &extractor, &mut std::io::sink()).unwrap();
        assert_eq!(selection.get("X").unwrap().length, 9);
        assert_eq!(selection.get("Y").unwrap().length, 3);
    }
    #[test]
    fn missing_file() {
        let extractor = GeneKeyExtractor::default();
        let result = select_longest_from_path("/no/such/file.fasta", &extractor, &mut std::io::sink());
        assert!(result.is_err());
    }
}
