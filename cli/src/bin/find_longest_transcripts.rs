use clap::Parser;
use find_longest_transcripts_cli::commands::Args;
use find_longest_transcripts_cli::pipeline::{self, RunConfig};

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();
    let config = RunConfig::from_args(&args)?;
    pipeline::run(&config)?;
    Ok(())
}
