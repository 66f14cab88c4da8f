use clap::{Parser, builder::RangedU64ValueParser};
use quill::{
    lang::tokenizing::TokenStream,
    runtime::{
        data_structures::{
            dictionary::Dictionary,
            stack::{DEFAULT_CAPACITY, Stack},
        },
        error,
        interpreter::{
            CodeManagement, Interpreter, InterpreterStack, WordManagement,
            quill_interpreter::QuillInterpreter,
        },
    },
};
use std::{
    fs::File,
    io::{self, BufReader, Read, Write, stdin, stdout},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

/// Run a quill script.
#[derive(Parser)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Path of the script to run.  Standard input is read when left out or given as `-`.
    script: Option<PathBuf>,

    /// The most cells the data stack can hold.
    #[arg(
        long,
        env = "QUILL_STACK_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    stack_capacity: usize,

    /// Only tokenize the script, printing one token per line.
    #[arg(long)]
    tokens: bool,

    /// Print the dictionary after the script has run.
    #[arg(long)]
    words: bool,
}

/// Open the script, or standard input if no script was given.  Along with the reader comes the
/// tag used for locations in that source.
fn open_source(script: &Option<PathBuf>) -> io::Result<(String, Box<dyn Read>)> {
    match script {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|error| {
                io::Error::new(
                    error.kind(),
                    format!("Could not open {}: {}", path.display(), error),
                )
            })?;

            Ok((path.display().to_string(), Box::new(BufReader::new(file))))
        }

        _ => Ok(("<stdin>".to_string(), Box::new(BufReader::new(stdin())))),
    }
}

fn main() -> error::Result<()> {
    // Logs go to stderr so that they never mix with what the script prints.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let (path, mut source) = open_source(&cli.script)?;

    if cli.tokens {
        for token in TokenStream::new(&path, source) {
            println!("{:?}", token?);
        }

        return Ok(());
    }

    let mut interpreter = QuillInterpreter::new(
        Stack::new(cli.stack_capacity),
        Dictionary::with_builtin_words(),
        stdout(),
    );

    tracing::debug!(%path, capacity = cli.stack_capacity, "running script");

    interpreter.process_source(&path, source.as_mut())?;

    tracing::debug!(
        depth = interpreter.stack().len(),
        max_depth = interpreter.stack().max_depth(),
        words = interpreter.dictionary().len(),
        "script finished"
    );

    if cli.words {
        print!("{}", interpreter.dictionary());
    }

    interpreter.output().flush()?;
    Ok(())
}
