use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use srcfacts::logging::init_tracing;
use srcfacts::{summarize, EventSink, ParseError, Tokenizer, TokenizerConfig, DEFAULT_BUFFER_CAPACITY};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Report counts of srcML elements and source text
#[derive(Parser, Debug)]
#[command(name = "srcfacts", version, about)]
struct Args {
    /// srcML file to read; standard input when omitted
    input: Option<PathBuf>,

    /// Size of the input window in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_CAPACITY)]
    buffer_size: usize,

    /// Print one line per tokenizer event instead of the report
    #[arg(long)]
    events: bool,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn open_input(path: Option<&PathBuf>) -> io::Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    })
}

fn print_events<R: Read>(reader: R, config: &TokenizerConfig) -> Result<(), ParseError> {
    let mut out = BufWriter::new(io::stdout().lock());
    let mut write_error = None;
    let mut sink = EventSink::new(|event| {
        if write_error.is_none() {
            if let Err(e) = writeln!(out, "{event}") {
                write_error = Some(e);
            }
        }
    });
    Tokenizer::with_config(reader, config).parse(&mut sink)?;
    if let Some(e) = write_error {
        return Err(e.into());
    }
    out.flush()?;
    Ok(())
}

fn run(args: &Args) -> Result<(), ParseError> {
    let config = TokenizerConfig::default().with_buffer_capacity(args.buffer_size);
    let reader = open_input(args.input.as_ref())?;
    info!(buffer = config.buffer_capacity(), "tokenizing");

    if args.events {
        return print_events(reader, &config);
    }

    let facts = summarize(reader, &config)?;
    let mut out = io::stdout().lock();
    write!(out, "{facts}")?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("parser error: {e}");
            ExitCode::FAILURE
        }
    }
}
