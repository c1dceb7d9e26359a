// Offline repair of persisted datasets. Nothing in the matching path calls
// into this module.

use log::debug;

use crate::config::*;

/// What a percentage recomputation did to one dataset.
#[derive(PartialEq, Debug, Clone)]
pub struct RecomputeSummary {
    pub num_sections: usize,
    /// Title, total count and total percentage of the first section, as a
    /// sanity check for the operator.
    pub first_section: Option<(String, u64, f64)>,
}

/// Rewrites every percentage from the counts of its section.
///
/// The percentages are relative to the sum of the counts of the section (not
/// to its number of responses) and rounded to one decimal. Sections without
/// any count get 0 everywhere.
pub fn recompute_percentages(dataset: &mut SurveyDataset) -> RecomputeSummary {
    for section in dataset.sections.iter_mut() {
        let total = section.total_count();
        for dp in section.distribution.iter_mut() {
            dp.percentage = rounded_percentage(dp.count, total);
        }
        debug!(
            "recompute_percentages: {:?}: total count {}",
            section.title, total
        );
    }
    let first_section = dataset.sections.first().map(|s| {
        let total_percentage: f64 = s.distribution.iter().map(|dp| dp.percentage).sum();
        (s.title.clone(), s.total_count(), total_percentage)
    });
    RecomputeSummary {
        num_sections: dataset.sections.len(),
        first_section,
    }
}

fn rounded_percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}
