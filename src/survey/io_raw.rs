// Reader for the raw survey exports.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use survey_sections::{RawExportDocument, RawOption, RawQuestion};

use crate::survey::io_common::{read_js_count, read_js_percentage, read_json_file};
use crate::survey::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestionJs {
    #[serde(rename = "total_responses")]
    _total_responses: Option<JSValue>,
    #[serde(default)]
    pub options: Vec<RawOptionJs>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RawOptionJs {
    pub option: String,
    #[serde(rename = "count")]
    _count: Option<JSValue>,
    #[serde(rename = "percentage")]
    _percentage: Option<JSValue>,
    pub text: Option<String>,
}

impl RawQuestionJs {
    pub fn total_responses(&self, title: &str) -> SurveyResult<Option<u64>> {
        read_js_count(
            self._total_responses.as_ref(),
            &format!("{}/total_responses", title),
        )
    }
}

impl RawOptionJs {
    pub fn to_option(&self, title: &str) -> SurveyResult<RawOption> {
        let field = format!("{}/{}", title, self.option);
        Ok(RawOption {
            option: self.option.clone(),
            count: read_js_count(self._count.as_ref(), &format!("{}/count", field))?,
            percentage: read_js_percentage(
                self._percentage.as_ref(),
                &format!("{}/percentage", field),
            )?,
            text: self.text.clone(),
        })
    }
}

pub fn read_raw_export(path: &str) -> BSurveyResult<RawExportDocument> {
    let js = read_json_file(path)?;
    Ok(parse_raw_export(&js, path)?)
}

/// Converts the content of a raw export. The questions keep the order of the
/// JSON object.
pub fn parse_raw_export(js: &JSValue, path: &str) -> SurveyResult<RawExportDocument> {
    let obj = js.as_object().context(RawNotAnObjectSnafu { path })?;
    let mut questions: Vec<RawQuestion> = Vec::new();
    for (title, value) in obj.iter() {
        let q: RawQuestionJs =
            serde_json::from_value(value.clone()).context(ParsingQuestionSnafu { path, title })?;
        let mut options: Vec<RawOption> = Vec::new();
        for o in q.options.iter() {
            options.push(o.to_option(title)?);
        }
        debug!(
            "parse_raw_export: {:?}: {} options",
            title,
            options.len()
        );
        questions.push(RawQuestion {
            title: title.clone(),
            total_responses: q.total_responses(title)?,
            options,
        });
    }
    Ok(RawExportDocument { questions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn questions_keep_file_order() {
        let content = r#"{
            "Zeta": { "total_responses": 3, "options": [] },
            "Alpha": { "options": [] },
            "Mu": { "total_responses": null, "options": [] }
        }"#;
        let js: JSValue = serde_json::from_str(content).unwrap();
        let raw = parse_raw_export(&js, "inline").unwrap();
        let titles: Vec<&str> = raw.questions.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
        assert_eq!(raw.questions[0].total_responses, Some(3));
        assert_eq!(raw.questions[1].total_responses, None);
        assert_eq!(raw.questions[2].total_responses, None);
    }

    #[test]
    fn options_tolerate_missing_fields() {
        let js = json!({
            "Region": {
                "options": [
                    { "option": "Europe", "percentage": 30.5 },
                    { "option": "Asia", "count": 12 },
                    { "option": "Africa", "count": "4", "text": "excerpt" }
                ]
            }
        });
        let raw = parse_raw_export(&js, "inline").unwrap();
        let options = &raw.questions[0].options;
        assert_eq!(options[0].count, None);
        assert_eq!(options[0].percentage, Some(30.5));
        assert_eq!(options[1].count, Some(12));
        assert_eq!(options[1].percentage, None);
        assert_eq!(options[2].count, Some(4));
        assert_eq!(options[2].text.as_deref(), Some("excerpt"));
    }

    #[test]
    fn questions_without_options_are_empty() {
        let js = json!({ "Quotes": { "total_responses": 10 } });
        let raw = parse_raw_export(&js, "inline").unwrap();
        assert!(raw.questions[0].options.is_empty());
    }

    #[test]
    fn malformed_exports_are_errors() {
        assert!(matches!(
            parse_raw_export(&json!([1, 2]), "inline"),
            Err(SurveyError::RawNotAnObject { .. })
        ));
        assert!(matches!(
            parse_raw_export(&json!({ "q": { "options": [ { "count": 1 } ] } }), "inline"),
            Err(SurveyError::ParsingQuestion { .. })
        ));
        assert!(matches!(
            parse_raw_export(
                &json!({ "q": { "options": [ { "option": "a", "count": -2 } ] } }),
                "inline"
            ),
            Err(SurveyError::ParsingJsonNumber { .. })
        ));
    }
}
