/*!
Resolution of configured survey questions to the sections of pre-aggregated
survey exports.

The raw exports (one record per question, with answer options) are turned
into a uniform list of [Section]s with [transform]. A question from a
configuration catalog is then looked up with [resolve], which tolerates keys
that were renamed, shortened or written in snake_case. The chart to draw is
the configured one, or the one returned by [infer_chart_type].

```
use survey_sections::builder::RawExportBuilder;
use survey_sections::*;

let raw = RawExportBuilder::new()
    .question("Which IDEs or plugins do you use for development?", Some(40))
    .option("VS Code", Some(30), None)
    .option("PyCharm", Some(8), None)
    .question("Do you work with data engineering tools or practices", Some(50))
    .option("Yes", Some(35), None)
    .option("No", Some(15), None)
    .build();
let dataset = transform(&raw);

let section = resolve(&dataset.sections, "which_ide_plugins_used")
    .section()
    .unwrap();
assert_eq!(section.missing, 2);

let section = resolve(&dataset.sections, "do_you_work_with_data_engineering_tools_or_practices")
    .section()
    .unwrap();
assert_eq!(infer_chart_type(section), ChartCategory::Pie);
```

All the functions are pure: they can be called from several threads on the
same data.
*/
mod chart;
mod config;
mod maintenance;
mod normalize;
mod resolve;
mod transform;
mod words;

pub mod builder;
pub mod cache;
pub mod manual;

pub use crate::chart::{infer_chart_type, select_chart_type};
pub use crate::config::*;
pub use crate::maintenance::{recompute_percentages, RecomputeSummary};
pub use crate::normalize::{extract_keywords, normalize, title_to_key};
pub use crate::resolve::{keyword_overlap_score, resolve, KEYWORD_MATCH_THRESHOLD};
pub use crate::transform::transform;
pub use crate::words::{word_frequencies, word_frequencies_for_question};
