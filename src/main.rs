use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use env_logger::Env;
use lit2md::{walk, ConfigTable, Converter};
use log::info;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let matches = Command::new("lit2md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("lit2md: mirrors a tree of literate source files as Markdown with fenced code blocks.")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("PATH")
                .help("Input file or directory")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output root; mirrors the input layout with .md files")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .get_matches();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing --input")?;
    let output = matches
        .get_one::<PathBuf>("output")
        .context("missing --output")?;

    // Loaded once, read-only for the rest of the run
    let table = ConfigTable::load_default_file().context("failed to load configuration")?;
    let converter = Converter::new(&table);

    let report = walk(input, output, &converter);

    for file in &report.converted {
        println!("{} -> {}", file.input.display(), file.output.display());
    }
    info!(
        "{} converted, {} skipped, {} failed",
        report.converted.len(),
        report.skipped.len(),
        report.errors.len()
    );

    if !report.is_success() {
        for err in &report.errors {
            eprintln!("error: {}", err);
        }
        eprintln!("{} file(s) failed to convert", report.errors.len());
        std::process::exit(1);
    }

    Ok(())
}
