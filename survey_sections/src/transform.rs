use log::debug;

use crate::config::*;

/// Builds the uniform section model out of a raw export.
///
/// One section per question, in the order of the export. The titles are kept
/// verbatim for display: normalization only happens when matching.
/// Missing counts, percentages and totals default to zero.
pub fn transform(raw: &RawExportDocument) -> SurveyDataset {
    let sections: Vec<Section> = raw.questions.iter().map(transform_question).collect();
    let total_responses = sections.iter().map(|s| s.responses).max().unwrap_or(0);
    debug!(
        "transform: {} sections, total responses: {}",
        sections.len(),
        total_responses
    );
    SurveyDataset {
        total_responses,
        sections,
    }
}

fn transform_question(question: &RawQuestion) -> Section {
    let responses = question.total_responses.unwrap_or(0);
    let distribution: Vec<DataPoint> = question
        .options
        .iter()
        .map(|o| DataPoint {
            value: o.option.clone(),
            count: o.count.unwrap_or(0),
            percentage: o.percentage.unwrap_or(0.0),
            text: o.text.clone(),
        })
        .collect();
    let total_count: u64 = distribution.iter().map(|dp| dp.count).sum();
    // Without a known total, nothing can be said about the missing answers.
    let missing = if responses > 0 {
        responses.saturating_sub(total_count)
    } else {
        0
    };
    Section {
        title: question.title.clone(),
        responses,
        missing,
        distribution,
    }
}
