//! Definitions -- the data shared by the selector library and the CLI.
//! The outcome of the first pass over an input file is a [Selection](Selection),
//! which maps every gene key to the longest transcript seen for it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The representative transcript of a gene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneChoice {
    pub gene: String,
    /// Id of the longest record so far.
    pub id: String,
    /// Sequence length. Residues are single bytes, so this is the byte length.
    pub length: usize,
    /// Number of annotated records carrying this gene key.
    pub candidates: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SelectionStats {
    pub records: usize,
    pub annotated: usize,
    pub skipped: usize,
    pub genes: usize,
}

/// Gene key -> longest transcript table.
/// Genes are kept in the order they are first seen.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Selection {
    choices: Vec<GeneChoice>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    skipped: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }
    /// Register a record of `length` residues annotated with `gene`.
    /// Returns true if the record becomes the representative of the gene.
    /// A record replaces the current representative only when it is strictly longer.
    pub fn offer(&mut self, gene: &str, id: &str, length: usize) -> bool {
        match self.index.get(gene) {
            Some(&idx) => {
                let choice = &mut self.choices[idx];
                choice.candidates += 1;
                if choice.length < length {
                    choice.id = id.to_string();
                    choice.length = length;
                    true
                } else {
                    false
                }
            }
            None => {
                self.index.insert(gene.to_string(), self.choices.len());
                self.choices.push(GeneChoice {
                    gene: gene.to_string(),
                    id: id.to_string(),
                    length,
                    candidates: 1,
                });
                true
            }
        }
    }
    /// Register a record without any gene key.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }
    pub fn get(&self, gene: &str) -> Option<&GeneChoice> {
        self.index.get(gene).map(|&idx| &self.choices[idx])
    }
    pub fn choices(&self) -> &[GeneChoice] {
        &self.choices
    }
    /// Number of distinct genes.
    pub fn len(&self) -> usize {
        self.choices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
    pub fn selected_ids(&self) -> HashSet<String> {
        self.choices.iter().map(|c| c.id.clone()).collect()
    }
    pub fn stats(&self) -> SelectionStats {
        let annotated = self.choices.iter().map(|c| c.candidates).sum::<usize>();
        SelectionStats {
            records: annotated + self.skipped,
            annotated,
            skipped: self.skipped,
            genes: self.choices.len(),
        }
    }
}
