mod annotate;
mod build;
mod options;
mod restore;
mod stats;

use std::io;

use clap::{ArgAction, Parser};
use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::LevelFilter, fmt};

use crate::{annotate::AnnotateError, build::BuildError, restore::RestoreError, stats::StatsError};

#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Logs more of the library's progress (-v debug, -vv trace). Warnings are
    /// always shown.
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
enum Command {
    /// Builds a corpus archive from diacritized text files.
    Build(build::Args),

    /// Annotates text from stdin and prints the letters and their labels.
    Annotate(annotate::Args),

    /// Prints the label distribution of a corpus archive.
    Stats(stats::Args),

    /// Prints the sentences of a corpus archive re-diacritized from their labels.
    Restore(restore::Args),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    BuildError(#[from] BuildError),
    #[error(transparent)]
    AnnotateError(#[from] AnnotateError),
    #[error(transparent)]
    StatsError(#[from] StatsError),
    #[error(transparent)]
    RestoreError(#[from] RestoreError),
}

/// Installs the subscriber that also receives the library's `log` records.
fn init_tracing<W>(level: LevelFilter, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();

    if subscriber.try_init().is_err() {
        eprintln!("Logger already set; skipping re-initialization.");
    }
}

fn main() -> Result<(), CompileError> {
    let cli = Cli::parse();
    init_tracing(cli.log_level(), io::stderr);
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Annotate(args) => Ok(annotate::run(args)?),
        Command::Stats(args) => Ok(stats::run(args)?),
        Command::Restore(args) => Ok(restore::run(args)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use nikud::{CorpusParser, ExcessMarks};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["compile", "stats", "-i", "a.zst"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::WARN);
        let cli = Cli::try_parse_from(["compile", "stats", "-vv", "-i", "a.zst"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::TRACE);
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_excess_warnings_are_logged() {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        init_tracing(LevelFilter::WARN, move || sink.clone());

        // bet takes a dagesh and a vowel, the meteg is left over
        let text = "\u{5D1}\u{5BC}\u{5B8}\u{5BD}";

        let doc = CorpusParser::new().parse(text).unwrap();
        assert_eq!(doc.dropped_marks(), 1);
        assert!(!buf.contents().contains("dropped"));

        let warn = CorpusParser::new().excess_marks(ExcessMarks::Warn);
        let doc = warn.parse(text).unwrap();
        assert_eq!(doc.dropped_marks(), 1);
        let logged = buf.contents();
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("[nikud] dropped 1 mark(s)"), "{logged}");
    }
}
