// Primitives shared by the readers and writers.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value as JSValue;
use snafu::prelude::*;
use text_diff::print_diff;

use crate::survey::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

pub fn read_json_file(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_json_file: {}: {} bytes", path, contents.len());
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

/// Writes to the given file, or to the standard output when no file (or
/// 'stdout') is given.
pub fn write_output(content: &str, out_path: Option<&str>) -> SurveyResult<()> {
    match out_path {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing output to {}", path);
            fs::write(path, content).context(WritingJsonSnafu { path })
        }
    }
}

/// Compares a pretty-printed output with a reference file.
///
/// The reference is pretty-printed the same way first, so that only the
/// content matters and not its formatting.
pub fn check_reference(pretty: &str, reference_path: &str) -> SurveyResult<()> {
    let reference = read_json_file(reference_path)?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {})?;
    if pretty_reference != pretty {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(pretty_reference.as_str(), pretty, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    Ok(())
}

/// Reads an optional count. Absent and null values are None.
///
/// Counts written by spreadsheets may be floats ("12.0") or strings.
pub fn read_js_count(x: Option<&JSValue>, field: &str) -> SurveyResult<Option<u64>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(c), _) => Ok(Some(c)),
            (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u64)),
            _ => ParsingJsonNumberSnafu {
                field,
                content: n.to_string(),
            }
            .fail(),
        },
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<u64>()
            .ok()
            .map(Some)
            .context(ParsingJsonNumberSnafu {
                field,
                content: s.clone(),
            }),
        Some(other) => ParsingJsonNumberSnafu {
            field,
            content: other.to_string(),
        }
        .fail(),
    }
}

/// Reads an optional percentage. Absent and null values are None.
pub fn read_js_percentage(x: Option<&JSValue>, field: &str) -> SurveyResult<Option<f64>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => n.as_f64().map(Some).context(ParsingJsonNumberSnafu {
            field,
            content: n.to_string(),
        }),
        Some(JSValue::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .map(Some)
            .context(ParsingJsonNumberSnafu {
                field,
                content: s.clone(),
            }),
        Some(other) => ParsingJsonNumberSnafu {
            field,
            content: other.to_string(),
        }
        .fail(),
    }
}
