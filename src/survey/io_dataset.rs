// Reader and writer for persisted datasets (the section model in JSON).

use std::fs;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use survey_sections::{DataPoint, Section, SurveyDataset};

use crate::survey::io_common::read_json_file;
use crate::survey::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataPointJs {
    pub value: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SectionJs {
    pub title: String,
    #[serde(default)]
    pub responses: u64,
    #[serde(default)]
    pub missing: u64,
    pub distribution: Vec<DataPointJs>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDataJs {
    #[serde(default)]
    pub total_responses: u64,
    pub sections: Vec<SectionJs>,
}

impl From<&DataPoint> for DataPointJs {
    fn from(dp: &DataPoint) -> Self {
        DataPointJs {
            value: dp.value.clone(),
            count: dp.count,
            percentage: dp.percentage,
            text: dp.text.clone(),
        }
    }
}

impl From<&DataPointJs> for DataPoint {
    fn from(dp: &DataPointJs) -> Self {
        DataPoint {
            value: dp.value.clone(),
            count: dp.count,
            percentage: dp.percentage,
            text: dp.text.clone(),
        }
    }
}

impl From<&SurveyDataset> for SurveyDataJs {
    fn from(ds: &SurveyDataset) -> Self {
        SurveyDataJs {
            total_responses: ds.total_responses,
            sections: ds
                .sections
                .iter()
                .map(|s| SectionJs {
                    title: s.title.clone(),
                    responses: s.responses,
                    missing: s.missing,
                    distribution: s.distribution.iter().map(DataPointJs::from).collect(),
                })
                .collect(),
        }
    }
}

impl From<&SurveyDataJs> for SurveyDataset {
    fn from(ds: &SurveyDataJs) -> Self {
        SurveyDataset {
            total_responses: ds.total_responses,
            sections: ds
                .sections
                .iter()
                .map(|s| Section {
                    title: s.title.clone(),
                    responses: s.responses,
                    missing: s.missing,
                    distribution: s.distribution.iter().map(DataPoint::from).collect(),
                })
                .collect(),
        }
    }
}

pub fn dataset_to_json(dataset: &SurveyDataset) -> SurveyResult<JSValue> {
    serde_json::to_value(SurveyDataJs::from(dataset)).context(SerializingJsonSnafu {})
}

pub fn read_dataset(path: &str) -> BSurveyResult<SurveyDataset> {
    let js = read_json_file(path)?;
    let data: SurveyDataJs = serde_json::from_value(js).context(ParsingJsonSnafu { path })?;
    debug!("read_dataset: {}: {} sections", path, data.sections.len());
    Ok(SurveyDataset::from(&data))
}

/// Rewrites a dataset file, pretty-printed.
pub fn write_dataset(path: &str, dataset: &SurveyDataset) -> BSurveyResult<()> {
    let content = serde_json::to_string_pretty(&SurveyDataJs::from(dataset))
        .context(SerializingJsonSnafu {})?;
    info!("write_dataset: {}", path);
    fs::write(path, content).context(WritingJsonSnafu { path })?;
    Ok(())
}
