//! Pipeline -- select the longest transcript of each gene and write them out.
//!
//! The input is read twice: once to build the selection, once to copy the selected records.
//! The output is written to a temporary file next to the destination and renamed into place,
//! so a failed run never leaves a truncated FASTA behind. Symlinks are followed, and outputs that
//! are not regular files (devices, pipes) are written directly.
use crate::commands::Args;
use bio::io::fasta;
use definitions::{GeneChoice, SelectionStats};
use selector::emit::emit_selected_from_path;
use selector::fasta::DEFAULT_LINE_WIDTH;
use selector::gene_key::{GeneKeyExtractor, DEFAULT_KEYS};
use selector::select::select_longest_from_path;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Parameters a user can set in a TOML file.
/// ```toml
/// annotation_keys = ["gene", "locus_tag"]
/// line_width = 60
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Annotation keys tried in this order to find the gene of a record.
    pub annotation_keys: Vec<String>,
    /// Residues per output line. 0 means no wrapping.
    pub line_width: usize,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            annotation_keys: DEFAULT_KEYS.iter().map(|x| x.to_string()).collect(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl Profile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        debug!("Profile\t{}", path.display());
        let file = std::fs::read_to_string(path)?;
        Self::from_toml(&file)
    }
    pub fn from_toml(file: &str) -> std::io::Result<Self> {
        use std::io::{Error, ErrorKind};
        let profile: Self =
            toml::from_str(file).map_err(|why| Error::new(ErrorKind::InvalidData, why))?;
        if profile.annotation_keys.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "annotation_keys should not be empty",
            ));
        }
        Ok(profile)
    }
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub profile: Profile,
}

impl RunConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            report: None,
            profile: Profile::default(),
        }
    }
    /// The command line `--line-width` overrides the profile.
    pub fn from_args(args: &Args) -> std::io::Result<Self> {
        let mut profile = match args.config.as_ref() {
            Some(path) => Profile::from_path(path)?,
            None => Profile::default(),
        };
        if let Some(width) = args.line_width {
            profile.line_width = width;
        }
        Ok(Self {
            input: args.input.clone(),
            output: args.output.clone(),
            report: args.report.clone(),
            profile,
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub stats: SelectionStats,
    /// Records written to the output.
    pub emitted: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a Path,
    summary: Summary,
    genes: &'a [GeneChoice],
}

/// Run the whole pipeline, reporting unannotated records to the standard error.
pub fn run(config: &RunConfig) -> std::io::Result<Summary> {
    let stderr = std::io::stderr();
    let mut diagnostics = stderr.lock();
    run_with(config, &mut diagnostics)
}

pub fn run_with<W: Write>(config: &RunConfig, diagnostics: &mut W) -> std::io::Result<Summary> {
    let RunConfig {
        input,
        output,
        report,
        profile,
    } = config;
    let extractor = GeneKeyExtractor::new(&profile.annotation_keys)?;
    debug!("START\tSelect\t{}", input.display());
    let selection = select_longest_from_path(input, &extractor, diagnostics)?;
    let ids = selection.selected_ids();
    debug!("START\tEmit\t{}", output.display());
    let emitted = create_atomically(output, |file| {
        let mut wtr = fasta::Writer::new(file);
        emit_selected_from_path(input, &ids, &mut wtr, profile.line_width)
    })?;
    let summary = Summary {
        stats: selection.stats(),
        emitted,
    };
    if let Some(path) = report {
        debug!("START\tReport\t{}", path.display());
        let genes = selection.choices();
        let report = Report {
            input: input.as_path(),
            summary,
            genes,
        };
        let mut wtr = std::fs::File::create(path).map(BufWriter::new)?;
        serde_json::ser::to_writer_pretty(&mut wtr, &report)?;
        writeln!(wtr)?;
        wtr.flush()?;
    }
    let SelectionStats {
        records,
        skipped,
        genes,
        ..
    } = summary.stats;
    info!("Records\t{records}");
    info!("Skipped\t{skipped}");
    info!("Genes\t{genes}");
    info!("Output\t{emitted}");
    Ok(summary)
}

// Write the output as `File::create` + write would, but only replace `path` once `write` succeeded.
fn create_atomically<F>(path: &Path, write: F) -> std::io::Result<usize>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<usize>,
{
    let is_link = std::fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    let target = if is_link {
        std::fs::canonicalize(path).ok()
    } else {
        Some(path.to_path_buf())
    };
    let existing = target.as_ref().and_then(|t| std::fs::metadata(t).ok());
    match (target, existing) {
        // Dangling links and pipes.
        (None, _) => write_in_place(path, write),
        (Some(target), Some(meta)) if !meta.is_file() => write_in_place(&target, write),
        (Some(target), existing) => {
            let permissions = existing.map(|meta| meta.permissions());
            replace_file(&target, permissions, write)
        }
    }
}

fn write_in_place<F>(path: &Path, write: F) -> std::io::Result<usize>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<usize>,
{
    debug!("Output\t{}\tin place", path.display());
    let mut file = std::fs::File::create(path)?;
    let written = write(&mut file)?;
    file.flush()?;
    Ok(written)
}

// `permissions` are those of the file being replaced, if any.
fn replace_file<F>(
    path: &Path,
    permissions: Option<std::fs::Permissions>,
    write: F,
) -> std::io::Result<usize>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<usize>,
{
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".find_longest_transcripts.");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The mode `File::create` asks for. The umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    let written = write(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(path).map_err(|why| why.error)?;
    Ok(written)
}
