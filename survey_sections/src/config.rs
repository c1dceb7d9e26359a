// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// One answer option of a question, as found in a raw export.
///
/// Older survey vintages only carry percentages, newer ones carry raw counts.
/// Both are optional and default to zero when the section model is built.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawOption {
    pub option: String,
    pub count: Option<u64>,
    pub percentage: Option<f64>,
    pub text: Option<String>,
}

/// One question of a raw export: its natural-language title and its options.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawQuestion {
    pub title: String,
    /// None when the export does not know how many people answered.
    pub total_responses: Option<u64>,
    pub options: Vec<RawOption>,
}

/// A raw survey export, one record per question.
///
/// The order of the questions is the order of the export and is preserved
/// all the way to the rendered page.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawExportDocument {
    pub questions: Vec<RawQuestion>,
}

// ******** Output data structures *********

/// One answer option of a section, with its count and percentage.
#[derive(PartialEq, Debug, Clone)]
pub struct DataPoint {
    pub value: String,
    pub count: u64,
    pub percentage: f64,
    pub text: Option<String>,
}

/// The results of one survey question.
#[derive(PartialEq, Debug, Clone)]
pub struct Section {
    pub title: String,
    pub responses: u64,
    // Invariant: max(0, responses - sum(count)) if responses > 0, 0 otherwise.
    pub missing: u64,
    pub distribution: Vec<DataPoint>,
}

impl Section {
    /// The sum of the counts over the whole distribution.
    pub fn total_count(&self) -> u64 {
        self.distribution.iter().map(|dp| dp.count).sum()
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct SurveyDataset {
    /// The largest number of responses of any section. Sections may differ
    /// because of branching questions.
    pub total_responses: u64,
    pub sections: Vec<Section>,
}

/// The presentation styles a section can be rendered with.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ChartCategory {
    Bar,
    HorizontalBar,
    Pie,
    WordCloud,
    Citations,
    Tags,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 6] = [
        ChartCategory::Bar,
        ChartCategory::HorizontalBar,
        ChartCategory::Pie,
        ChartCategory::WordCloud,
        ChartCategory::Citations,
        ChartCategory::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartCategory::Bar => "bar",
            ChartCategory::HorizontalBar => "horizontal-bar",
            ChartCategory::Pie => "pie",
            ChartCategory::WordCloud => "wordcloud",
            ChartCategory::Citations => "citations",
            ChartCategory::Tags => "tags",
        }
    }
}

impl Display for ChartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartCategory {
    type Err = UnknownChartCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartCategory::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownChartCategory(s.to_string()))
    }
}

/// Returned when a chart category name is not one of the supported ones.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnknownChartCategory(pub String);

impl Error for UnknownChartCategory {}

impl Display for UnknownChartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown chart category {:?}", self.0)
    }
}

/// Which stage of the resolver accepted a section.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum MatchTier {
    /// Equality or containment after normalization.
    Exact,
    /// Keyword overlap above the acceptance threshold.
    Keywords,
}

/// The outcome of resolving a question key against a list of sections.
///
/// A miss is an expected outcome: a question may simply have no data for a
/// given survey year. It is distinct from a match on a section with an empty
/// distribution.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum MatchResult<'a> {
    Found {
        section: &'a Section,
        index: usize,
        tier: MatchTier,
    },
    NoMatch,
}

impl<'a> MatchResult<'a> {
    pub fn section(&self) -> Option<&'a Section> {
        match self {
            MatchResult::Found { section, .. } => Some(section),
            MatchResult::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }
}

// ********* Configuration **********

/// Options for the word frequency extraction.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct WordCloudOptions {
    /// Tokens strictly shorter than this are discarded.
    pub min_word_length: usize,
    /// The number of words kept after sorting.
    pub max_words: usize,
}

impl WordCloudOptions {
    pub const DEFAULT_OPTIONS: WordCloudOptions = WordCloudOptions {
        min_word_length: 3,
        max_words: 50,
    };
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        WordCloudOptions::DEFAULT_OPTIONS
    }
}
