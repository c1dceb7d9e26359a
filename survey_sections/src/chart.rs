use crate::config::*;
use crate::normalize::normalize;

// Values that make a two-option question a binary one.
const BINARY_VALUES: [&str; 6] = ["yes", "no", "true", "false", "y", "n"];

// Above this number of options, labels do not fit below vertical bars.
const MAX_VERTICAL_BARS: usize = 5;

/// The default chart for a section that has no configured chart type.
///
/// Only the number of options and their labels are considered: word clouds,
/// citations and tags are never inferred, they have to be configured.
pub fn infer_chart_type(section: &Section) -> ChartCategory {
    let distribution = &section.distribution;
    if distribution.is_empty() {
        return ChartCategory::Bar;
    }
    if distribution.len() == 2
        && distribution
            .iter()
            .any(|dp| BINARY_VALUES.contains(&normalize(&dp.value).as_str()))
    {
        return ChartCategory::Pie;
    }
    if distribution.len() <= MAX_VERTICAL_BARS {
        ChartCategory::Bar
    } else {
        ChartCategory::HorizontalBar
    }
}

/// The configured chart type if there is one, the inferred one otherwise.
pub fn select_chart_type(explicit: Option<ChartCategory>, section: &Section) -> ChartCategory {
    explicit.unwrap_or_else(|| infer_chart_type(section))
}
