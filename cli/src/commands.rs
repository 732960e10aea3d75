use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "find_longest_transcripts")]
#[command(author = "Bansho Masutani<ban-m@g.ecc.u-tokyo.ac.jp>")]
#[command(version, about = "Pick the longest transcript of each gene from an annotated FASTA file.", long_about = None)]
pub struct Args {
    /// Input FASTA file. Decompressed on the fly if the name ends with `.gz`.
    pub input: PathBuf,
    /// Output FASTA file. Overwritten if it exists.
    pub output: PathBuf,
    /// TOML profile with the annotation keys and the output line width.
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,
    /// Write the selected transcript of each gene as JSON.
    #[arg(short, long, value_name = "JSON")]
    pub report: Option<PathBuf>,
    /// Residues per output line. 0 puts each sequence on one line.
    #[arg(short = 'w', long, value_name = "N")]
    pub line_width: Option<usize>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn two_positionals() {
        let args = Args::try_parse_from(["prog", "in.fa.gz", "out.fa"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.fa.gz"));
        assert_eq!(args.output, PathBuf::from("out.fa"));
        assert_eq!(args.log_level(), "warn");
        assert!(args.config.is_none() && args.report.is_none() && args.line_width.is_none());
    }
    #[test]
    fn wrong_argument_count() {
        assert!(Args::try_parse_from(["prog"]).is_err());
        assert!(Args::try_parse_from(["prog", "in.fa"]).is_err());
        assert!(Args::try_parse_from(["prog", "in.fa", "out.fa", "extra"]).is_err());
    }
    #[test]
    fn options() {
        let args = ["prog", "-vv", "-w", "0", "-r", "r.json", "in.fa", "out.fa"];
        let args = Args::try_parse_from(args).unwrap();
        assert_eq!(args.log_level(), "debug");
        assert_eq!(args.line_width, Some(0));
        assert_eq!(args.report, Some(PathBuf::from("r.json")));
    }
}
