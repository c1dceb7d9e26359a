// Checks that every configured question of a year resolves to a section.

use log::{debug, info};

use survey_sections::{resolve, transform, MatchResult, MatchTier};

use crate::survey::config_reader::{PageBlock, SurveyCatalog, YearConfig};
use crate::survey::io_raw::read_raw_export;
use crate::survey::*;

/// The sections available in the data file of one page.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BlockSummary {
    pub title: String,
    pub data_file: String,
    pub section_titles: Vec<String>,
    pub num_questions: usize,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionCheck {
    /// The title of the page the question belongs to.
    pub block: String,
    pub key: String,
    pub title: String,
    /// The title of the matched section and how it was found.
    pub matched: Option<(String, MatchTier)>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VerificationReport {
    pub year: String,
    pub blocks: Vec<BlockSummary>,
    pub checks: Vec<QuestionCheck>,
}

impl VerificationReport {
    pub fn matched(&self) -> Vec<&QuestionCheck> {
        self.checks.iter().filter(|c| c.matched.is_some()).collect()
    }

    pub fn unmatched(&self) -> Vec<&QuestionCheck> {
        self.checks.iter().filter(|c| c.matched.is_none()).collect()
    }
}

fn verify_block(
    catalog: &SurveyCatalog,
    catalog_path: &str,
    block: &PageBlock,
) -> BSurveyResult<(BlockSummary, Vec<QuestionCheck>)> {
    let data_path = catalog.data_path(catalog_path, block.data_file)?;
    let dataset = transform(&read_raw_export(&data_path)?);
    debug!(
        "verify_block: {}: {} sections in {}",
        block.title,
        dataset.sections.len(),
        data_path
    );
    let checks: Vec<QuestionCheck> = block
        .questions
        .iter()
        .map(|q| QuestionCheck {
            block: block.title.to_string(),
            key: q.key.clone(),
            title: q.title.clone(),
            matched: match resolve(&dataset.sections, &q.key) {
                MatchResult::Found { section, tier, .. } => Some((section.title.clone(), tier)),
                MatchResult::NoMatch => None,
            },
        })
        .collect();
    let summary = BlockSummary {
        title: block.title.to_string(),
        data_file: block.data_file.to_string(),
        section_titles: dataset.sections.iter().map(|s| s.title.clone()).collect(),
        num_questions: block.questions.len(),
    };
    Ok((summary, checks))
}

/// Resolves the questions of every category of the year, then the
/// demographics questions if the year has some.
pub fn verify_year(
    catalog: &SurveyCatalog,
    catalog_path: &str,
    year_config: &YearConfig,
) -> BSurveyResult<VerificationReport> {
    let mut blocks: Vec<BlockSummary> = Vec::new();
    let mut checks: Vec<QuestionCheck> = Vec::new();
    for block in year_config.blocks().iter() {
        let (summary, block_checks) = verify_block(catalog, catalog_path, block)?;
        blocks.push(summary);
        checks.extend(block_checks);
    }
    info!(
        "verify_year: {}: {} questions in {} pages",
        year_config.year,
        checks.len(),
        blocks.len()
    );
    Ok(VerificationReport {
        year: year_config.year.clone(),
        blocks,
        checks,
    })
}

fn rounded_percent(part: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u64
}

pub fn print_report(report: &VerificationReport) {
    println!("Verifying question key matching for {}", report.year);
    for block in report.blocks.iter() {
        println!();
        println!("Page: {}", block.title);
        println!("   Data file: {}", block.data_file);
        println!("   Total sections: {}", block.section_titles.len());
        println!("   Questions in config: {}", block.num_questions);
        for check in report.checks.iter().filter(|c| c.block == block.title) {
            match &check.matched {
                Some((section, MatchTier::Exact)) => {
                    println!("   Matched: {} -> {:?}", check.title, section)
                }
                Some((section, MatchTier::Keywords)) => {
                    println!("   Matched (keywords): {} -> {:?}", check.title, section)
                }
                None => {
                    println!("   Unmatched: {}", check.title);
                    println!("      Key: {}", check.key);
                    println!("      Available sections:");
                    for t in block.section_titles.iter() {
                        println!("        - {}", t);
                    }
                }
            }
        }
    }

    let total = report.checks.len();
    let matched = report.matched().len();
    let unmatched = report.unmatched();
    println!();
    println!("Summary:");
    println!("   Total questions: {}", total);
    println!(
        "   Matched: {} ({}%)",
        matched,
        rounded_percent(matched, total)
    );
    println!(
        "   Unmatched: {} ({}%)",
        unmatched.len(),
        rounded_percent(unmatched.len(), total)
    );
    if !unmatched.is_empty() {
        println!();
        println!("Unmatched questions:");
        for c in unmatched.iter() {
            println!("   - [{}] {}", c.block, c.title);
            println!("     Key: {}", c.key);
        }
    }
}
