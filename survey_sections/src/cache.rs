use std::collections::HashMap;

use log::debug;

use crate::config::*;
use crate::resolve::resolve;

/// An explicit memoization layer over [resolve].
///
/// Entries are keyed by a SHA-256 digest of the section titles (in order)
/// and by the question key, so the cache can be shared between datasets:
/// two datasets with the same titles resolve the same way.
///
/// ```
/// use survey_sections::builder::RawExportBuilder;
/// use survey_sections::cache::ResolutionCache;
/// use survey_sections::transform;
///
/// let dataset = transform(
///     &RawExportBuilder::new()
///         .question("How large is your organization?", Some(10))
///         .build(),
/// );
/// let mut cache = ResolutionCache::new();
/// let res = cache.resolve(&dataset.sections, "how_large_is_your_organization");
/// assert!(res.is_match());
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    // (dataset digest, question key) -> resolved section index and tier.
    entries: HashMap<(String, String), Option<(usize, MatchTier)>>,
    hits: u64,
}

impl ResolutionCache {
    pub fn new() -> ResolutionCache {
        ResolutionCache::default()
    }

    /// Same result as [resolve], computed at most once per dataset content
    /// and question key.
    pub fn resolve<'a>(&mut self, sections: &'a [Section], question_key: &str) -> MatchResult<'a> {
        let entry_key = (sections_digest(sections), question_key.to_string());
        if let Some(cached) = self.entries.get(&entry_key).copied() {
            self.hits += 1;
            return match cached {
                Some((index, tier)) => MatchResult::Found {
                    section: &sections[index],
                    index,
                    tier,
                },
                None => MatchResult::NoMatch,
            };
        }
        let res = resolve(sections, question_key);
        let stored = match res {
            MatchResult::Found { index, tier, .. } => Some((index, tier)),
            MatchResult::NoMatch => None,
        };
        debug!("ResolutionCache: storing {:?} -> {:?}", question_key, stored);
        self.entries.insert(entry_key, stored);
        res
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of lookups answered without resolving.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}

/// A digest of the titles of the sections, in order.
///
/// Only the titles take part in matching, so two datasets with the same
/// titles share their cache entries.
pub fn sections_digest(sections: &[Section]) -> String {
    let mut content = String::new();
    for s in sections.iter() {
        content.push_str(&s.title);
        // Unit separator between titles.
        content.push('\u{1f}');
    }
    sha256::digest(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(titles: &[&str]) -> Vec<Section> {
        titles
            .iter()
            .map(|t| Section {
                title: t.to_string(),
                responses: 1,
                missing: 0,
                distribution: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn cached_results_equal_direct_results() {
        let ss = sections(&[
            "What is your job role?",
            "Which IDEs or plugins do you use for development?",
        ]);
        let mut cache = ResolutionCache::new();
        for key in ["what_is_your_job_role", "which_ide_plugins_used", "pizza"] {
            let direct = resolve(&ss, key);
            assert_eq!(cache.resolve(&ss, key), direct);
            assert_eq!(cache.resolve(&ss, key), direct);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.hits(), 3);
    }

    #[test]
    fn different_titles_do_not_share_entries() {
        let a = sections(&["Docker usage"]);
        let b = sections(&["Kubernetes in production"]);
        let mut cache = ResolutionCache::new();
        assert!(cache.resolve(&a, "docker_usage").is_match());
        assert!(!cache.resolve(&b, "docker_usage").is_match());
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn digest_depends_on_order() {
        let a = sections(&["x", "y"]);
        let b = sections(&["y", "x"]);
        assert_ne!(sections_digest(&a), sections_digest(&b));
        assert_eq!(sections_digest(&a), sections_digest(&sections(&["x", "y"])));
        // The separator keeps the boundaries between titles.
        assert_ne!(
            sections_digest(&sections(&["ab", "c"])),
            sections_digest(&sections(&["a", "bc"]))
        );
    }
}
