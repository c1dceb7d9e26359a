use log::{debug, info};

use crate::config::*;
use crate::normalize::{extract_keywords, normalize};

/// The minimum keyword overlap for a section to be accepted.
///
/// The question catalogs were written against this value: changing it
/// changes which questions get displayed.
pub const KEYWORD_MATCH_THRESHOLD: f64 = 0.3;

/// Finds the section that a configured question key refers to.
///
/// The matching runs in two tiers, and the first one that succeeds wins:
///
/// 1. exact: the normalized key and the normalized title are equal, or one
///    contains the other. The first such section in dataset order wins, so an
///    earlier short title ("Data") takes keys that also equal a later one.
/// 2. keywords: the section sharing the largest fraction of keywords with the
///    key, if that fraction is at least [KEYWORD_MATCH_THRESHOLD]. Keywords
///    match when one contains the other ("ide" and "ides"). Ties keep the
///    earliest section.
///
/// The result only depends on the sections and their order.
pub fn resolve<'a>(sections: &'a [Section], question_key: &str) -> MatchResult<'a> {
    let normalized_key = normalize(question_key);
    let normalized_titles: Vec<String> = sections.iter().map(|s| normalize(&s.title)).collect();

    if let Some(index) = find_exact(&normalized_titles, &normalized_key) {
        debug!(
            "resolve: {:?} -> {:?} (exact)",
            question_key, sections[index].title
        );
        return MatchResult::Found {
            section: &sections[index],
            index,
            tier: MatchTier::Exact,
        };
    }

    let key_words = extract_keywords(question_key);
    if let Some((index, score)) = find_by_keywords(sections, &key_words) {
        debug!(
            "resolve: {:?} -> {:?} (keywords, score {:.3})",
            question_key, sections[index].title, score
        );
        return MatchResult::Found {
            section: &sections[index],
            index,
            tier: MatchTier::Keywords,
        };
    }

    info!(
        "resolve: no section found for {:?} among {} sections",
        question_key,
        sections.len()
    );
    MatchResult::NoMatch
}

fn find_exact(normalized_titles: &[String], normalized_key: &str) -> Option<usize> {
    normalized_titles.iter().position(|t| {
        // Everything contains the empty string.
        t == normalized_key
            || (!t.is_empty()
                && !normalized_key.is_empty()
                && (t.contains(normalized_key) || normalized_key.contains(t.as_str())))
    })
}

// Returns the index of the best section and its score.
fn find_by_keywords(sections: &[Section], key_words: &[String]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, section) in sections.iter().enumerate() {
        let title_words = extract_keywords(&section.title);
        let score = match keyword_overlap_score(key_words, &title_words) {
            Some(score) => score,
            None => continue,
        };
        let is_better = match best {
            Some((_, best_score)) => score > best_score,
            None => score > 0.0,
        };
        if is_better {
            best = Some((index, score));
        }
    }
    best.filter(|(_, score)| *score >= KEYWORD_MATCH_THRESHOLD)
}

/// The fraction of the key's keywords found in the title's keywords.
///
/// The denominator is the size of the larger of the two sets, so a short key
/// scores low against a long title and the other way around.
/// None when both sets are empty.
pub fn keyword_overlap_score(key_words: &[String], title_words: &[String]) -> Option<f64> {
    let denominator = key_words.len().max(title_words.len());
    if denominator == 0 {
        return None;
    }
    let matching = key_words
        .iter()
        .filter(|kw| {
            title_words
                .iter()
                .any(|tw| tw.contains(kw.as_str()) || kw.contains(tw.as_str()))
        })
        .count();
    Some(matching as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, values: &[&str]) -> Section {
        Section {
            title: title.to_string(),
            responses: 10,
            missing: 0,
            distribution: values
                .iter()
                .map(|v| DataPoint {
                    value: v.to_string(),
                    count: 1,
                    percentage: 10.0,
                    text: None,
                })
                .collect(),
        }
    }

    fn titles(titles: &[&str]) -> Vec<Section> {
        let _ = env_logger::builder().is_test(true).try_init();
        titles.iter().map(|t| section(t, &["a"])).collect()
    }

    fn found_index(res: MatchResult) -> Option<usize> {
        match res {
            MatchResult::Found { index, .. } => Some(index),
            MatchResult::NoMatch => None,
        }
    }

    #[test]
    fn snake_case_key_matches_prose_title() {
        let sections = titles(&[
            "What is your job role?",
            "Do you work with data engineering tools or practices",
        ]);
        let res = resolve(
            &sections,
            "do_you_work_with_data_engineering_tools_or_practices",
        );
        assert_eq!(found_index(res), Some(1));
        assert!(matches!(
            res,
            MatchResult::Found {
                tier: MatchTier::Exact,
                ..
            }
        ));
    }

    #[test]
    fn truncated_and_expanded_keys_match_by_containment() {
        let sections = titles(&[
            "How large is your organization?",
            "Which industry or sector best describes your organization?",
        ]);
        // The key is a shortened title.
        assert_eq!(
            found_index(resolve(&sections, "which_industry_or_sector")),
            Some(1)
        );
        // The key is a longer phrasing of the title.
        assert_eq!(
            found_index(resolve(
                &sections,
                "how_large_is_your_organization_number_of_employees"
            )),
            Some(0)
        );
    }

    #[test]
    fn containment_takes_the_first_section() {
        let sections = titles(&["Tools used daily", "Tools used weekly", "Tools"]);
        assert_eq!(found_index(resolve(&sections, "tools_used")), Some(0));
    }

    #[test]
    fn earlier_containment_wins_over_later_equal_title() {
        let sections = titles(&["Data", "Data engineering tools"]);
        let res = resolve(&sections, "data_engineering_tools");
        assert_eq!(res.section().map(|s| s.title.as_str()), Some("Data"));
        assert!(matches!(
            res,
            MatchResult::Found {
                tier: MatchTier::Exact,
                ..
            }
        ));
        // Listed the other way around, the equal title comes first.
        let sections = titles(&["Data engineering tools", "Data"]);
        assert_eq!(
            found_index(resolve(&sections, "data_engineering_tools")),
            Some(0)
        );
    }

    #[test]
    fn keyword_overlap_handles_renamed_keys() {
        let sections = titles(&[
            "What is your job role?",
            "Which IDEs or plugins do you use for development?",
        ]);
        let res = resolve(&sections, "which_ide_plugins_used");
        assert_eq!(found_index(res), Some(1));
        assert!(matches!(
            res,
            MatchResult::Found {
                tier: MatchTier::Keywords,
                ..
            }
        ));
    }

    #[test]
    fn unrelated_key_does_not_match() {
        let sections = titles(&[
            "What is your job role?",
            "Which IDEs or plugins do you use for development?",
        ]);
        assert_eq!(resolve(&sections, "favourite_pizza_topping"), MatchResult::NoMatch);
    }

    #[test]
    fn score_threshold_is_inclusive() {
        let key = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        // 3 of 10 keywords.
        let sections = titles(&["alpha bravo charlie kilo"]);
        assert_eq!(found_index(resolve(&sections, key)), Some(0));
        // 2 of 10 keywords.
        let sections = titles(&["alpha bravo lima"]);
        assert_eq!(resolve(&sections, key), MatchResult::NoMatch);
    }

    #[test]
    fn keyword_ties_keep_the_earliest_section() {
        let sections = titles(&["Docker usage at work", "Docker usage in class"]);
        assert_eq!(
            found_index(resolve(&sections, "docker_usage_frequency")),
            Some(0)
        );
        let sections = titles(&["Docker usage in class", "Docker usage at work"]);
        assert_eq!(
            resolve(&sections, "docker_usage_frequency")
                .section()
                .map(|s| s.title.as_str()),
            Some("Docker usage in class")
        );
    }

    #[test]
    fn strictly_better_score_wins() {
        let sections = titles(&["Docker usage at work", "Frequency of docker usage"]);
        assert_eq!(
            found_index(resolve(&sections, "docker_usage_frequency")),
            Some(1)
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let sections = titles(&[
            "Docker usage at work",
            "Docker usage in class",
            "Which IDEs or plugins do you use for development?",
        ]);
        for key in ["docker_usage_frequency", "which_ide_plugins_used", "nothing"] {
            let first = resolve(&sections, key);
            for _ in 0..5 {
                assert_eq!(resolve(&sections, key), first);
            }
        }
    }

    #[test]
    fn every_title_resolves_to_itself() {
        // No normalized title contains another one.
        let sections = titles(&[
            "Data engineering tools",
            "Which IDEs or plugins do you use for development?",
            "How large is your organization?",
            "Do you use Docker? (Yes/No)",
        ]);
        for (idx, s) in sections.iter().enumerate() {
            assert_eq!(found_index(resolve(&sections, &normalize(&s.title))), Some(idx));
            assert_eq!(found_index(resolve(&sections, &s.title)), Some(idx));
        }
    }

    #[test]
    fn degenerate_keys_do_not_match_everything() {
        let sections = titles(&["What is your job role?", "How large is your organization?"]);
        assert_eq!(resolve(&sections, ""), MatchResult::NoMatch);
        assert_eq!(resolve(&sections, "???"), MatchResult::NoMatch);
        assert_eq!(resolve(&sections, "the_and_of"), MatchResult::NoMatch);
        assert_eq!(resolve(&[], "what_is_your_job_role"), MatchResult::NoMatch);
    }

    #[test]
    fn empty_distribution_is_still_a_match() {
        let sections = vec![section("Which cloud do you use?", &[])];
        let res = resolve(&sections, "which_cloud_do_you_use");
        let matched = res.section().unwrap();
        assert!(matched.distribution.is_empty());
    }

    #[test]
    fn overlap_score_uses_the_larger_set() {
        let key: Vec<String> = vec!["docker".to_string()];
        let title: Vec<String> = ["docker", "usage", "work", "home"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keyword_overlap_score(&key, &title), Some(0.25));
        assert_eq!(keyword_overlap_score(&title, &key), Some(0.25));
        assert_eq!(keyword_overlap_score(&[], &[]), None);
        assert_eq!(keyword_overlap_score(&[], &title), Some(0.0));
    }
}
