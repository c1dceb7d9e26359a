use clap::Parser;
use log::{info, warn};
use snafu::ErrorCompat;

use crate::args::Command;
use survey_sections::WordCloudOptions;

mod args;
mod survey;

fn main() {
    let args = args::Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();
    info!("args: {:?}", args);

    let res = match args.command {
        Command::Transform {
            input,
            out,
            reference,
        } => survey::run_transform(&input, out.as_deref(), reference.as_deref()),
        Command::Verify {
            catalog,
            year,
            strict,
        } => survey::run_verify(&catalog, &year, strict),
        Command::Plan {
            catalog,
            year,
            category,
            demographics: _,
            out,
            reference,
        } => survey::run_plan(
            &catalog,
            &year,
            category.as_deref(),
            out.as_deref(),
            reference.as_deref(),
        ),
        Command::Words {
            input,
            key,
            min_word_length,
            max_words,
            out,
        } => survey::run_words(
            &input,
            &key,
            &WordCloudOptions {
                min_word_length,
                max_words,
            },
            out.as_deref(),
        ),
        Command::Recompute { files } => survey::run_recompute(&files),
    };

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
