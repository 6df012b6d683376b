// src/main.rs

use alakon_highlight::{
    alakon,
    config::{Config, OutputFormat},
    grammar::host,
    render, GrammarDescriptor, GrammarOptions, Highlighter, HostShape, Preset,
};

use anyhow::{bail, Context};
use log::{debug, info};
use std::io::{self, Read, Write};
use std::path::PathBuf;

const USAGE: &str = "\
usage: alakon-highlight [--config FILE] [--format ansi|html|tokens]
                        [--preset classic|extended] [--dump-grammar [legacy|modern]] [FILE]

Highlights Alakon source from FILE (or stdin) and writes it to stdout.
--dump-grammar prints the grammar as a host JSON object instead, in the given
shape, else the config's output.host_shape, else the preset's own shape.";

/// Command-line settings. Anything left `None` falls back to the config file.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
    preset: Option<Preset>,
    dump_grammar: bool,
    dump_shape: Option<HostShape>,
    /// `None` reads stdin.
    input: Option<PathBuf>,
}

impl Args {
    /// Command-line values take precedence over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(preset) = self.preset {
            config.grammar.preset = preset;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(shape) = self.dump_shape {
            config.output.host_shape = Some(shape);
        }
    }
}

fn flag_value(flag: &str, value: Option<String>) -> anyhow::Result<String> {
    value.with_context(|| format!("{} needs a value\n\n{}", flag, USAGE))
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = args.peekable();
    let mut parsed = Args::default();
    let mut input_given = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(flag_value(&arg, args.next())?.into()),
            "--format" => parsed.format = Some(flag_value(&arg, args.next())?.parse()?),
            "--preset" => parsed.preset = Some(flag_value(&arg, args.next())?.parse()?),
            "--dump-grammar" => {
                parsed.dump_grammar = true;
                // The shape is optional; a following option starts with '-'.
                if let Some(shape) = args.next_if(|next| !next.starts_with('-')) {
                    parsed.dump_shape = Some(shape.parse()?);
                }
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with('-') && flag != "-" => {
                bail!("unknown option {:?}\n\n{}", flag, USAGE)
            }
            path => {
                if input_given {
                    bail!("only one input file may be given\n\n{}", USAGE);
                }
                input_given = true;
                if path != "-" {
                    parsed.input = Some(path.into());
                }
            }
        }
    }
    Ok(parsed)
}

/// Shape for `--dump-grammar` once flags have been applied to `config`.
fn dump_shape(config: &Config, grammar: &GrammarDescriptor) -> HostShape {
    config.output.host_shape.unwrap_or(grammar.shape())
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            Ok(text)
        }
    }
}

/// Main entry point for `alakon-highlight`.
fn main() -> anyhow::Result<()> {
    // Default filter is "warn" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args(std::env::args().skip(1))?;
    debug!("Arguments: {:?}", args);

    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);

    let grammar = alakon(&GrammarOptions::from(config.grammar.preset));
    info!("Using the {:?} grammar preset", config.grammar.preset);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.dump_grammar {
        let json = host::to_host_string(&grammar, dump_shape(&config, &grammar))?;
        writeln!(out, "{}", json).context("Failed to write grammar")?;
        return Ok(());
    }

    let highlighter = Highlighter::new(&grammar).context("Failed to compile grammar")?;
    let source = read_input(args.input.as_ref())?;
    let spans = highlighter.highlight(&source);
    let rendered = render::render(config.output.format, &source, &spans, &config.theme);
    out.write_all(rendered.as_bytes())
        .context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
