//! `multiples` command line front end
//!
//! Marks literals in a sketch file by offset (or from a saved version
//! record), then prints the swept variants or writes one of them back.

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use multiples_core::{SweepConfig, SweepSession, VersionRecord};
use multiples_text::NumberLiterals;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let file = Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Sketch source file");
    let at = Arg::new("at")
        .long("at")
        .num_args(1..)
        .value_parser(value_parser!(usize))
        .required_unless_present("record")
        .help("Byte offsets of the literals to sweep, in sweep order");
    let record = Arg::new("record")
        .long("record")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("at")
        .help("Version record (JSON) whose parameters are swept instead");
    let count = Arg::new("count")
        .long("count")
        .value_parser(value_parser!(usize))
        .help("Samples per axis when no range overrides it");
    let config = Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file");

    Command::new("multiples")
        .version(multiples_core::VERSION)
        .about("Sweep numeric literals of a sketch into a grid of variants")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("scan")
                .about("List the numeric literals of a file")
                .arg(file.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("sweep")
                .about("Print every variant of the sweep")
                .arg(file.clone())
                .arg(at.clone())
                .arg(record.clone())
                .arg(count.clone())
                .arg(config.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("select")
                .about("Print the file with one variant written back")
                .arg(file)
                .arg(at)
                .arg(record)
                .arg(count)
                .arg(config)
                .arg(
                    Arg::new("variant")
                        .long("variant")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Index of the variant, in grid order"),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(args: &ArgMatches) -> Result<SweepConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };
    if let Some(&count) = args.get_one::<usize>("count") {
        config = config.with_default_count(count);
    }
    Ok(config)
}

fn load_session(args: &ArgMatches) -> Result<SweepSession> {
    let path = args
        .get_one::<PathBuf>("file")
        .ok_or_else(|| anyhow!("missing file argument"))?;
    let code = read_file(path)?;
    let config = load_config(args)?;

    if let Some(record_path) = args.get_one::<PathBuf>("record") {
        let mut record = VersionRecord::from_json(&read_file(record_path)?)
            .with_context(|| format!("invalid version record {}", record_path.display()))?;
        record.code = code;
        return Ok(SweepSession::from_record(&record, config)?);
    }

    let mut session = SweepSession::with_config(code, config)?;
    for &offset in args.get_many::<usize>("at").into_iter().flatten() {
        session
            .toggle_at(offset)
            .with_context(|| format!("cannot sweep offset {offset}"))?;
    }
    Ok(session)
}

fn scan(args: &ArgMatches) -> Result<String> {
    let path = args
        .get_one::<PathBuf>("file")
        .ok_or_else(|| anyhow!("missing file argument"))?;
    let code = read_file(path)?;
    let literals: Vec<_> = NumberLiterals::new(&code).collect();

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&literals)?);
    }
    let mut out = String::new();
    for literal in &literals {
        writeln!(out, "{}\t{}", literal.span, literal.value)?;
    }
    Ok(out)
}

fn sweep(args: &ArgMatches) -> Result<String> {
    let session = load_session(args)?;
    let state = session.params();
    if state.is_empty() {
        bail!("no parameters to sweep");
    }
    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(session.variants()?.as_slice())?);
    }

    let mut out = String::new();
    let mut index = 0;
    for (row, cells) in session.grid()?.iter().enumerate() {
        for (col, variant) in cells.iter().enumerate() {
            writeln!(
                out,
                "// variant {index} (row {row}, col {col}): {}",
                variant.values.join(", ")
            )?;
            writeln!(out, "{}", variant.code)?;
            index += 1;
        }
    }
    Ok(out)
}

fn select(args: &ArgMatches) -> Result<String> {
    let mut session = load_session(args)?;
    let index = *args
        .get_one::<usize>("variant")
        .ok_or_else(|| anyhow!("missing variant index"))?;
    let variants = session.variants()?;
    let variant = variants
        .get(index)
        .ok_or_else(|| anyhow!("variant {index} out of range, sweep has {}", variants.len()))?;
    session.select_variant(variant)?;
    Ok(session.code().to_string())
}

fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("scan", args)) => scan(args),
        Some(("sweep", args)) => sweep(args),
        Some(("select", args)) => select(args),
        _ => bail!("unknown command"),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let out = run(&matches)?;
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}
