//! CLI for splitting polyphonic MIDI files into monophonic voice tracks.
//!
//! Usage: midisplit <input.mid> -v <max-voices> -s <strategy> [options]

use midisplit::prelude::*;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

const USAGE: &str = "Usage: midisplit <input.mid> -v <max-voices> -s <strategy> [options]

Split a polyphonic MIDI file into monophonic voice tracks.

Arguments:
  input.mid                   Input MIDI file path

Options:
  -v, --max-voices <N>        Maximum number of voice tracks (required)
  -s, --strategy <name>       Voice assignment strategy (required):
                                first_fit    assign to the first free voice
                                balanced     spread notes evenly across voices
                                drop_excess  drop notes that exceed the limit
  -o, --output <path>         Output path (default: <input>_flattened.mid)
      --no-auto-tune          Use the requested voice count as-is instead of
                              capping it at the input's peak polyphony
  -h, --help                  Show this help

Examples:
  midisplit song.mid -v 4 -s balanced
  midisplit song.mid -v 8 -s drop_excess -o voices.mid --no-auto-tune
";

struct Args {
    input: PathBuf,
    output: PathBuf,
    max_voices: usize,
    strategy: Strategy,
    auto_tune: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut max_voices: Option<usize> = None;
    let mut strategy: Option<Strategy> = None;
    let mut auto_tune = true;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "-v" | "--max-voices" => {
                let value = args.next().ok_or("missing value for --max-voices")?;
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid voice count '{value}'"))?;
                max_voices = Some(parsed);
            }
            "-s" | "--strategy" => {
                let value = args.next().ok_or("missing value for --strategy")?;
                strategy = Some(value.parse()?);
            }
            "-o" | "--output" => {
                let value = args.next().ok_or("missing value for --output")?;
                output = Some(PathBuf::from(value));
            }
            "--no-auto-tune" => auto_tune = false,
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{other}'"));
            }
            path => {
                if input.is_some() {
                    return Err("more than one input file given".into());
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let input = input.ok_or("missing input file")?;
    let max_voices = max_voices.ok_or("missing required option --max-voices")?;
    let strategy = strategy.ok_or("missing required option --strategy")?;
    let output = output.unwrap_or_else(|| default_output(&input));

    Ok(Args {
        input,
        output,
        max_voices,
        strategy,
        auto_tune,
    })
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    input.with_file_name(format!("{stem}_flattened.mid"))
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}\n\n{USAGE}");
            process::exit(1);
        }
    };

    let splitter = match Splitter::builder()
        .max_voices(args.max_voices)
        .strategy(args.strategy)
        .auto_tune(args.auto_tune)
        .build()
    {
        Ok(splitter) => splitter,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match splitter.split_file(&args.input, &args.output) {
        Ok(report) => {
            println!("{report}");
            println!("Saved split MIDI to {}", args.output.display());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
