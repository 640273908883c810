use clap::{ArgAction, Parser};
use clap_stdin::FileOrStdin;
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "alanc",
    version,
    about = "Compiles block-language programs into 256-byte 6502-style memory images"
)]
pub struct Cli {
    /// Source file, or `-` for standard input
    #[arg(default_value = "-")]
    pub input: FileOrStdin,

    /// Raise the log level (-v info, -vv debug, -vvv trace); RUST_LOG overrides it
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print diagnostics and images, no trees or symbol tables
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
