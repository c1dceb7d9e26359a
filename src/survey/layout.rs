// Planning of the charts displayed on a category page.

use std::collections::HashSet;

use log::{debug, info};
use serde::Serialize;

use survey_sections::cache::ResolutionCache;
use survey_sections::{select_chart_type, title_to_key, DataPoint, Section, SurveyDataset};

use crate::survey::config_reader::QuestionConfig;
use crate::survey::*;

/// A chart displays at most this many data points.
pub const MAX_CHART_POINTS: usize = 10;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    /// Claimed by a configured question.
    Question,
    /// A section no configured question claimed.
    Section,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct ChartPointJs {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct PlannedChart {
    pub key: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "chartType")]
    pub chart_type: String,
    #[serde(rename = "totalResponses")]
    pub total_responses: u64,
    #[serde(rename = "showCounts", skip_serializing_if = "Option::is_none")]
    pub show_counts: Option<bool>,
    pub source: ChartSource,
    pub data: Vec<ChartPointJs>,
}

fn chart_data(section: &Section) -> Vec<ChartPointJs> {
    section
        .distribution
        .iter()
        .take(MAX_CHART_POINTS)
        .map(|dp: &DataPoint| ChartPointJs {
            name: dp.value.clone(),
            value: dp.percentage,
            percentage: dp.percentage,
            count: dp.count,
            text: dp.text.clone(),
        })
        .collect()
}

fn fallback_description(section: &Section) -> String {
    if section.missing > 0 {
        format!(
            "{} responses ({} missing)",
            section.responses, section.missing
        )
    } else {
        format!("{} responses", section.responses)
    }
}

/// The charts of a page: first the configured questions that resolve to a
/// section with data, in configuration order, then every other section with
/// data, in dataset order.
pub fn plan_category(
    questions: &[QuestionConfig],
    dataset: &SurveyDataset,
) -> SurveyResult<Vec<PlannedChart>> {
    let mut cache = ResolutionCache::new();
    let mut displayed: HashSet<&str> = HashSet::new();
    let mut charts: Vec<PlannedChart> = Vec::new();

    for q in questions.iter() {
        let section = match cache.resolve(&dataset.sections, &q.key).section() {
            Some(s) => s,
            None => {
                debug!("plan_category: no section for {:?}", q.key);
                continue;
            }
        };
        let data = chart_data(section);
        if data.is_empty() {
            debug!("plan_category: {:?}: section has no data", q.key);
            continue;
        }
        displayed.insert(section.title.as_str());
        charts.push(PlannedChart {
            key: q.key.clone(),
            title: q.title.clone(),
            description: q.description.clone(),
            chart_type: select_chart_type(q.chart_type()?, section).to_string(),
            total_responses: section.responses,
            show_counts: q.show_counts,
            source: ChartSource::Question,
            data,
        });
    }
    let configured = charts.len();

    for section in dataset.sections.iter() {
        if displayed.contains(section.title.as_str()) {
            continue;
        }
        let data = chart_data(section);
        if data.is_empty() {
            continue;
        }
        charts.push(PlannedChart {
            key: format!("section-{}", title_to_key(&section.title)),
            title: section.title.clone(),
            description: fallback_description(section),
            chart_type: select_chart_type(None, section).to_string(),
            total_responses: section.responses,
            show_counts: None,
            source: ChartSource::Section,
            data,
        });
    }
    info!(
        "plan_category: {} configured charts, {} remaining sections",
        configured,
        charts.len() - configured
    );
    Ok(charts)
}
