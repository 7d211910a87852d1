use anyhow::Context;
use clap::Parser;
use meteorite_filter::cli::args::Args;
use meteorite_filter::cli::commands;
use std::process;

fn main() {
    let args = Args::parse();

    match try_main(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print the full chain to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn try_main(args: Args) -> anyhow::Result<()> {
    let input = args.input_file.clone();

    // A quit at a prompt is a normal exit
    commands::run(args).with_context(|| match &input {
        Some(path) => format!("Filtering {} failed", path.display()),
        None => "Filtering failed".to_string(),
    })?;

    Ok(())
}
