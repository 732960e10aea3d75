//! Selector -- pick the longest transcript of every gene in an annotated FASTA file.
//!
//! Selection takes two passes over the input. [select](select) scans the whole file and builds
//! a [Selection](definitions::Selection); only then [emit](emit) scans it again and writes
//! the records chosen for each gene, in input order.
pub mod emit;
pub mod fasta;
pub mod gene_key;
pub mod select;
#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

pub use gene_key::{extract_gene_key, GeneKeyExtractor};
