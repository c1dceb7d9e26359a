use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use serde_json::json;
use serde_json::Value as JSValue;

use survey_sections::*;

use crate::survey::config_reader::*;
use crate::survey::io_common::*;
use crate::survey::io_dataset::*;
use crate::survey::io_raw::*;
use crate::survey::layout::*;
use crate::survey::verify::*;

pub mod config_reader;
pub mod io_common;
pub mod io_dataset;
pub mod io_raw;
pub mod layout;
pub mod verify;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing JSON"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Expected a number for {field}, found {content}"))]
    ParsingJsonNumber { field: String, content: String },
    #[snafu(display("Expected a JSON object with one entry per question in {path}"))]
    RawNotAnObject { path: String },
    #[snafu(display("Could not read question {title:?} in {path}"))]
    ParsingQuestion {
        source: serde_json::Error,
        path: String,
        title: String,
    },
    #[snafu(display("Unknown survey year {year} (known years: {known:?})"))]
    UnknownYear { year: String, known: Vec<String> },
    #[snafu(display("Unknown category {id} for year {year}"))]
    UnknownCategory { id: String, year: String },
    #[snafu(display("No demographics questions configured for year {year}"))]
    MissingDemographics { year: String },
    #[snafu(display("Invalid chart type for question {key}"))]
    InvalidChartType {
        source: UnknownChartCategory,
        key: String,
    },
    #[snafu(display("The path {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },
    #[snafu(display("{unmatched} of {total} questions could not be matched"))]
    Unmatched { unmatched: usize, total: usize },
    #[snafu(display("{failed} of {total} files could not be recomputed"))]
    RecomputeFailed { failed: usize, total: usize },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;
pub type BSurveyResult<T> = Result<T, Box<SurveyError>>;

/// Reads a raw export and writes its section model.
pub fn run_transform(
    input_path: &str,
    out_path: Option<&str>,
    reference_path: Option<&str>,
) -> BSurveyResult<()> {
    let raw = read_raw_export(input_path)?;
    let dataset = transform(&raw);
    info!(
        "run_transform: {}: {} sections, {} total responses",
        simplify_file_name(input_path),
        dataset.sections.len(),
        dataset.total_responses
    );
    let js = dataset_to_json(&dataset)?;
    emit_json(&js, out_path, reference_path)
}

/// Matches every question of one year of the catalog and prints a report.
pub fn run_verify(catalog_path: &str, year: &str, strict: bool) -> BSurveyResult<()> {
    let catalog = read_catalog(catalog_path)?;
    let year_config = catalog.year(year)?;
    let report = verify_year(&catalog, catalog_path, year_config)?;
    print_report(&report);
    let unmatched = report.unmatched().len();
    if unmatched > 0 {
        warn!(
            "run_verify: {} questions left unmatched for {}",
            unmatched, year
        );
        if strict {
            return Err(Box::new(SurveyError::Unmatched {
                unmatched,
                total: report.checks.len(),
            }));
        }
    }
    Ok(())
}

/// Writes the charts of a category page (or of the demographics page when no
/// category is given).
pub fn run_plan(
    catalog_path: &str,
    year: &str,
    category_id: Option<&str>,
    out_path: Option<&str>,
    reference_path: Option<&str>,
) -> BSurveyResult<()> {
    let catalog = read_catalog(catalog_path)?;
    let year_config = catalog.year(year)?;
    let block = match category_id {
        Some(id) => year_config.category(id)?.as_block(),
        None => year_config.demographics_block()?,
    };
    let data_path = catalog.data_path(catalog_path, block.data_file)?;
    let dataset = transform(&read_raw_export(&data_path)?);
    let charts = plan_category(block.questions, &dataset)?;
    info!(
        "run_plan: {}: {} charts from {} sections",
        block.title,
        charts.len(),
        dataset.sections.len()
    );
    let js = json!({
        "year": year,
        "title": block.title,
        "totalResponses": dataset.total_responses,
        "charts": charts,
    });
    emit_json(&js, out_path, reference_path)
}

/// Writes the word frequencies of the section matching a question key.
pub fn run_words(
    input_path: &str,
    question_key: &str,
    options: &WordCloudOptions,
    out_path: Option<&str>,
) -> BSurveyResult<()> {
    let dataset = transform(&read_raw_export(input_path)?);
    let section = match resolve(&dataset.sections, question_key).section() {
        Some(s) => s,
        None => {
            warn!(
                "run_words: no section for {:?} in {}",
                question_key, input_path
            );
            return emit_json(&json!({ "key": question_key, "words": [] }), out_path, None);
        }
    };
    let words: Vec<DataPointJs> = word_frequencies(section, options)
        .iter()
        .map(DataPointJs::from)
        .collect();
    debug!("run_words: {} words", words.len());
    let js = json!({
        "key": question_key,
        "section": section.title,
        "responses": section.responses,
        "words": words,
    });
    emit_json(&js, out_path, None)
}

/// Rewrites the percentages of each dataset file from its counts.
///
/// Every file is attempted even if some fail.
pub fn run_recompute(paths: &[String]) -> BSurveyResult<()> {
    let mut processed = 0;
    let mut failed = 0;
    for path in paths.iter() {
        match recompute_file(path) {
            Ok(summary) => {
                processed += 1;
                println!("Processed: {}", simplify_file_name(path));
                println!("   Sections: {}", summary.num_sections);
                if let Some((title, total_count, total_percentage)) = summary.first_section {
                    let short: String = title.chars().take(50).collect();
                    println!("   Sample section: {:?}...", short);
                    println!(
                        "   Total count: {}, Total percentage: {:.1}%",
                        total_count, total_percentage
                    );
                }
            }
            Err(e) => {
                failed += 1;
                warn!("run_recompute: {}: {:?}", path, e);
                eprintln!("Error processing {}: {}", path, e);
            }
        }
    }
    println!("Summary:");
    println!("   Processed: {} files", processed);
    if failed > 0 {
        println!("   Errors: {} files", failed);
        return Err(Box::new(SurveyError::RecomputeFailed {
            failed,
            total: paths.len(),
        }));
    }
    Ok(())
}

fn recompute_file(path: &str) -> BSurveyResult<RecomputeSummary> {
    let mut dataset = read_dataset(path)?;
    let summary = recompute_percentages(&mut dataset);
    write_dataset(path, &dataset)?;
    Ok(summary)
}

fn emit_json(
    js: &JSValue,
    out_path: Option<&str>,
    reference_path: Option<&str>,
) -> BSurveyResult<()> {
    let pretty = serde_json::to_string_pretty(js).context(SerializingJsonSnafu {})?;
    write_output(&pretty, out_path)?;
    if let Some(reference) = reference_path {
        check_reference(&pretty, reference)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(test_name: &str) -> String {
        format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), test_name)
    }

    fn temp_path(name: &str) -> String {
        format!(
            "{}/surveycharts_{}_{}",
            std::env::temp_dir().display(),
            std::process::id(),
            name
        )
    }

    fn run_fixture_test(test_name: &str, check: fn(&str) -> BSurveyResult<()>) {
        info!("Running test {}", test_name);
        let res = check(&test_dir(test_name));
        if let Err(e) = res {
            warn!("Error occured {:?}", e);
            if let Some(bt) = snafu::ErrorCompat::backtrace(e.as_ref()) {
                eprintln!("trace: {}", bt);
            }
            panic!("test {} failed: {}", test_name, e);
        }
    }

    fn transform_fixture(dir: &str) -> BSurveyResult<()> {
        let out = temp_path("actual_dataset.json");
        run_transform(
            &format!("{}/raw.json", dir),
            Some(out.as_str()),
            Some(format!("{}/expected_dataset.json", dir).as_str()),
        )
    }

    fn plan_fixture(dir: &str) -> BSurveyResult<()> {
        let out = temp_path("actual_plan.json");
        run_plan(
            &format!("{}/catalog.json", dir),
            "2025-2026",
            Some("data-engineering"),
            Some(out.as_str()),
            Some(format!("{}/expected_plan.json", dir).as_str()),
        )
    }

    fn demographics_fixture(dir: &str) -> BSurveyResult<()> {
        let out = temp_path("actual_demographics.json");
        run_plan(
            &format!("{}/catalog.json", dir),
            "2025-2026",
            None,
            Some(out.as_str()),
            Some(format!("{}/expected_demographics.json", dir).as_str()),
        )
    }

    fn verify_fixture(dir: &str) -> BSurveyResult<()> {
        run_verify(&format!("{}/catalog.json", dir), "2025-2026", true)
    }

    #[test]
    fn transform_mixed_vintages() {
        run_fixture_test("transform", transform_fixture);
    }

    #[test]
    fn plan_data_engineering() {
        run_fixture_test("catalog", plan_fixture);
    }

    #[test]
    fn plan_demographics() {
        run_fixture_test("catalog", demographics_fixture);
    }

    #[test]
    fn verify_current_year() {
        run_fixture_test("catalog", verify_fixture);
    }

    #[test]
    fn verify_previous_year_is_not_strict_by_default() {
        let catalog = format!("{}/catalog.json", test_dir("catalog"));
        assert!(run_verify(&catalog, "2024-2025", false).is_ok());
        let err = run_verify(&catalog, "2024-2025", true).unwrap_err();
        assert!(matches!(
            *err,
            SurveyError::Unmatched {
                unmatched: 1,
                total: 3
            }
        ));
    }

    #[test]
    fn unknown_year_and_category() {
        let catalog = format!("{}/catalog.json", test_dir("catalog"));
        let err = run_verify(&catalog, "1999-2000", false).unwrap_err();
        assert!(matches!(*err, SurveyError::UnknownYear { .. }));
        let err = run_plan(&catalog, "2025-2026", Some("nope"), None, None).unwrap_err();
        assert!(matches!(*err, SurveyError::UnknownCategory { .. }));
        let err = run_plan(&catalog, "2024-2025", None, None, None).unwrap_err();
        assert!(matches!(*err, SurveyError::MissingDemographics { .. }));
    }

    #[test]
    fn reference_mismatch_is_reported() {
        let dir = test_dir("transform");
        let out = temp_path("mismatch_dataset.json");
        let err = run_transform(
            &format!("{}/raw.json", dir),
            Some(out.as_str()),
            Some(format!("{}/raw.json", dir).as_str()),
        )
        .unwrap_err();
        assert!(matches!(*err, SurveyError::ReferenceMismatch { .. }));
    }

    #[test]
    fn words_for_a_free_text_question() {
        let dir = test_dir("catalog");
        let out = temp_path("words.json");
        run_words(
            &format!("{}/data/2026_data_engineering.json", dir),
            "what_would_you_improve_in_your_data_stack",
            &WordCloudOptions::DEFAULT_OPTIONS,
            Some(out.as_str()),
        )
        .unwrap();
        let js: JSValue =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(js["words"][0]["value"], "data");
        assert_eq!(js["words"][0]["count"], 9);
        std::fs::remove_file(&out).unwrap();
    }

    #[test]
    fn recompute_rewrites_percentages() {
        let src = format!("{}/dataset.json", test_dir("recompute"));
        let dst = temp_path("recompute.json");
        std::fs::copy(&src, &dst).unwrap();
        run_recompute(&[dst.clone()]).unwrap();
        let ds = read_dataset(&dst).unwrap();
        let d = &ds.sections[0].distribution;
        assert_eq!(d[0].percentage, 33.3);
        assert_eq!(d[1].percentage, 66.7);
        assert_eq!(ds.sections[1].distribution[0].percentage, 0.0);
        // Everything else is kept.
        assert_eq!(ds.sections[0].missing, 1);
        assert_eq!(ds.sections[0].distribution[0].text.as_deref(), Some("excerpt"));
        std::fs::remove_file(&dst).unwrap();
    }

    #[test]
    fn recompute_reports_failures() {
        let missing = format!("{}/does_not_exist.json", test_dir("recompute"));
        let err = run_recompute(&[missing]).unwrap_err();
        assert!(matches!(
            *err,
            SurveyError::RecomputeFailed {
                failed: 1,
                total: 1
            }
        ));
    }
}
