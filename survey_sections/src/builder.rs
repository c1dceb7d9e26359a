use log::warn;

pub use crate::config::*;

/// A builder for raw survey exports.
///
/// Questions are added in order, and each option goes to the last question
/// added so far.
///
/// ```
/// use survey_sections::builder::RawExportBuilder;
/// use survey_sections::transform;
///
/// let raw = RawExportBuilder::new()
///     .question("Do you use Docker?", Some(120))
///     .option("Yes", Some(90), None)
///     .option("No", Some(20), None)
///     .build();
///
/// let dataset = transform(&raw);
/// assert_eq!(dataset.sections[0].missing, 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawExportBuilder {
    pub(crate) _questions: Vec<RawQuestion>,
}

impl RawExportBuilder {
    pub fn new() -> RawExportBuilder {
        RawExportBuilder {
            _questions: Vec::new(),
        }
    }

    /// Starts a new question.
    pub fn question(mut self, title: &str, total_responses: Option<u64>) -> RawExportBuilder {
        self._questions.push(RawQuestion {
            title: title.to_string(),
            total_responses,
            options: Vec::new(),
        });
        self
    }

    /// Adds an answer option to the current question.
    ///
    /// Options added before any question are dropped.
    pub fn option(
        self,
        value: &str,
        count: Option<u64>,
        percentage: Option<f64>,
    ) -> RawExportBuilder {
        self.add_option(RawOption {
            option: value.to_string(),
            count,
            percentage,
            text: None,
        })
    }

    /// Adds an answer option that carries a free-text excerpt.
    pub fn option_with_text(
        self,
        value: &str,
        count: Option<u64>,
        percentage: Option<f64>,
        text: &str,
    ) -> RawExportBuilder {
        self.add_option(RawOption {
            option: value.to_string(),
            count,
            percentage,
            text: Some(text.to_string()),
        })
    }

    pub fn add_option(mut self, option: RawOption) -> RawExportBuilder {
        match self._questions.last_mut() {
            Some(q) => q.options.push(option),
            None => warn!(
                "RawExportBuilder: dropping option {:?} added before any question",
                option.option
            ),
        }
        self
    }

    pub fn build(self) -> RawExportDocument {
        RawExportDocument {
            questions: self._questions,
        }
    }
}
