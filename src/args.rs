use clap::{Parser, Subcommand};

/// This is a survey results preparation program.
///
/// It turns raw survey exports into chart-ready sections, matches the questions
/// of a catalog to them, and repairs persisted datasets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, global = true, takes_value = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Converts a raw export into the section model.
    Transform {
        /// (file path) The raw export, a JSON object with one entry per question.
        #[clap(short, long, value_parser)]
        input: String,
        /// (file path, 'stdout' or empty) Where to write the dataset in JSON format.
        #[clap(short, long, value_parser)]
        out: Option<String>,
        /// (file path) A reference dataset in JSON format. If provided, the output is
        /// checked against it.
        #[clap(short, long, value_parser)]
        reference: Option<String>,
    },
    /// Checks that every question of a catalog finds its section.
    Verify {
        /// (file path) The catalog of categories and questions, in JSON format.
        #[clap(short, long, value_parser)]
        catalog: String,
        /// The survey year, as labeled in the catalog (for example 2025-2026).
        #[clap(short, long, value_parser)]
        year: String,
        /// Fails if any question is left unmatched.
        #[clap(long, takes_value = false)]
        strict: bool,
    },
    /// Lists the charts of a category page, in display order.
    Plan {
        /// (file path) The catalog of categories and questions, in JSON format.
        #[clap(short, long, value_parser)]
        catalog: String,
        /// The survey year, as labeled in the catalog.
        #[clap(short, long, value_parser)]
        year: String,
        /// The id of the category to plan.
        #[clap(long, value_parser, required_unless_present = "demographics")]
        category: Option<String>,
        /// Plans the demographics page instead of a category.
        #[clap(long, takes_value = false, conflicts_with = "category")]
        demographics: bool,
        /// (file path, 'stdout' or empty) Where to write the plan in JSON format.
        #[clap(short, long, value_parser)]
        out: Option<String>,
        /// (file path) A reference plan in JSON format. If provided, the output is
        /// checked against it.
        #[clap(short, long, value_parser)]
        reference: Option<String>,
    },
    /// Computes the word frequencies of a free-text question.
    Words {
        /// (file path) The raw export.
        #[clap(short, long, value_parser)]
        input: String,
        /// The question key, as it would appear in a catalog.
        #[clap(short, long, value_parser)]
        key: String,
        /// Words shorter than this are dropped.
        #[clap(long, value_parser, default_value_t = 3)]
        min_word_length: usize,
        /// The number of words to keep.
        #[clap(long, value_parser, default_value_t = 50)]
        max_words: usize,
        /// (file path, 'stdout' or empty) Where to write the words in JSON format.
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
    /// Recomputes the percentages of dataset files from their counts.
    ///
    /// The files are rewritten in place.
    Recompute {
        /// (file paths) The dataset files to repair.
        #[clap(value_parser, required = true)]
        files: Vec<String>,
    },
}
