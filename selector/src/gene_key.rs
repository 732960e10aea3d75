//! Gene key extraction from the bracketed `[key=value]` annotations of a FASTA header.
use regex::Regex;

/// Annotation keys tried in this order.
pub const DEFAULT_KEYS: [&str; 2] = ["gene", "locus_tag"];

lazy_static! {
    static ref DEFAULT_EXTRACTOR: GeneKeyExtractor = GeneKeyExtractor::default();
}

/// Extract the gene key from a header with the default rules:
/// `[gene=VALUE]`, then `[locus_tag=VALUE]`.
pub fn extract_gene_key(header: &str) -> Option<String> {
    DEFAULT_EXTRACTOR.extract(header)
}

/// An ordered list of annotation rules. The first rule matching the header wins.
#[derive(Debug, Clone)]
pub struct GeneKeyExtractor {
    rules: Vec<(String, Regex)>,
}

impl GeneKeyExtractor {
    pub fn new<S: AsRef<str>>(keys: &[S]) -> std::io::Result<Self> {
        use std::io::{Error, ErrorKind};
        if keys.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "no annotation keys"));
        }
        let rules = keys
            .iter()
            .map(|key| {
                let key = key.as_ref();
                // Non-greedy: the value ends at the first `]`.
                let pattern = format!(r"\[{}=(.+?)\]", regex::escape(key));
                Regex::new(&pattern)
                    .map(|re| (key.to_string(), re))
                    .map_err(|why| Error::new(ErrorKind::InvalidInput, why))
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(key, _)| key.as_str())
    }
    pub fn extract(&self, header: &str) -> Option<String> {
        self.rules
            .iter()
            .find_map(|(_, re)| re.captures(header))
            .map(|caps| caps[1].to_string())
    }
    /// The line reported for a record without any of the annotations.
    pub fn missing_message(&self, id: &str) -> String {
        let wanted: Vec<_> = self.keys().map(|key| format!("'[{key}=XXX]'")).collect();
        format!("{} : No {}, will not be output!", id, wanted.join(" or "))
    }
}

impl Default for GeneKeyExtractor {
    fn default() -> Self {
        Self::new(&DEFAULT_KEYS).expect("default annotation keys")
    }
}
