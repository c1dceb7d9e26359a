// The catalog of survey years, categories and questions.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use survey_sections::ChartCategory;

use crate::survey::io_common::read_json_file;
use crate::survey::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "chartType")]
    _chart_type: Option<String>,
    #[serde(rename = "showCounts")]
    pub show_counts: Option<bool>,
}

impl QuestionConfig {
    /// The configured chart type, None if the catalog leaves it to inference.
    pub fn chart_type(&self) -> SurveyResult<Option<ChartCategory>> {
        match self._chart_type.as_deref() {
            None => Ok(None),
            Some(s) => s
                .parse::<ChartCategory>()
                .map(Some)
                .context(InvalidChartTypeSnafu {
                    key: self.key.clone(),
                }),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub id: String,
    pub title: String,
    #[serde(rename = "shortTitle")]
    pub short_title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub icon: Option<String>,
    #[serde(rename = "dataFile")]
    pub data_file: String,
    pub questions: Vec<QuestionConfig>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsConfig {
    #[serde(rename = "dataFile")]
    pub data_file: String,
    pub questions: Vec<QuestionConfig>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct YearConfig {
    pub year: String,
    pub demographics: Option<DemographicsConfig>,
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyCatalog {
    #[serde(rename = "dataDir")]
    pub data_dir: Option<String>,
    pub years: Vec<YearConfig>,
}

/// A group of questions displayed together on one page, backed by one data
/// file.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PageBlock<'a> {
    pub title: &'a str,
    pub data_file: &'a str,
    pub questions: &'a [QuestionConfig],
}

pub const DEMOGRAPHICS_TITLE: &str = "Demographics";

impl CategoryConfig {
    pub fn as_block(&self) -> PageBlock {
        PageBlock {
            title: &self.title,
            data_file: &self.data_file,
            questions: &self.questions,
        }
    }
}

impl YearConfig {
    pub fn category(&self, id: &str) -> SurveyResult<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .context(UnknownCategorySnafu {
                id,
                year: self.year.clone(),
            })
    }

    pub fn demographics_block(&self) -> SurveyResult<PageBlock> {
        let d = self
            .demographics
            .as_ref()
            .context(MissingDemographicsSnafu {
                year: self.year.clone(),
            })?;
        Ok(PageBlock {
            title: DEMOGRAPHICS_TITLE,
            data_file: &d.data_file,
            questions: &d.questions,
        })
    }

    /// The categories, then the demographics if configured.
    pub fn blocks(&self) -> Vec<PageBlock> {
        let mut blocks: Vec<PageBlock> = self.categories.iter().map(|c| c.as_block()).collect();
        if let Ok(b) = self.demographics_block() {
            blocks.push(b);
        }
        blocks
    }
}

impl SurveyCatalog {
    pub fn is_valid_year(&self, year: &str) -> bool {
        self.years.iter().any(|y| y.year == year)
    }

    pub fn year(&self, year: &str) -> SurveyResult<&YearConfig> {
        self.years
            .iter()
            .find(|y| y.year == year)
            .context(UnknownYearSnafu {
                year,
                known: self.years.iter().map(|y| y.year.clone()).collect::<Vec<String>>(),
            })
    }

    pub fn categories_for_year(&self, year: &str) -> SurveyResult<&[CategoryConfig]> {
        Ok(&self.year(year)?.categories)
    }

    /// The location of a data file. Relative paths are relative to the
    /// directory of the catalog, then to its data directory.
    pub fn data_path(&self, catalog_path: &str, data_file: &str) -> SurveyResult<String> {
        if Path::new(data_file).is_absolute() {
            return Ok(data_file.to_string());
        }
        let root = Path::new(catalog_path)
            .parent()
            .context(MissingParentDirSnafu { path: catalog_path })?;
        let mut p: PathBuf = root.to_path_buf();
        if let Some(dir) = self.data_dir.as_ref() {
            p.push(dir);
        }
        p.push(data_file);
        Ok(p.display().to_string())
    }

    /// Checks what deserialization cannot: chart type names and the
    /// uniqueness of category ids within a year.
    pub fn validate(&self) -> SurveyResult<()> {
        for y in self.years.iter() {
            let mut ids: HashSet<&str> = HashSet::new();
            for c in y.categories.iter() {
                if !ids.insert(c.id.as_str()) {
                    whatever!("duplicate category id {:?} for year {}", c.id, y.year);
                }
            }
            for b in y.blocks().iter() {
                for q in b.questions.iter() {
                    q.chart_type()?;
                }
            }
        }
        Ok(())
    }
}

pub fn read_catalog(path: &str) -> BSurveyResult<SurveyCatalog> {
    let js = read_json_file(path)?;
    let catalog: SurveyCatalog = serde_json::from_value(js).context(ParsingJsonSnafu { path })?;
    catalog.validate()?;
    info!(
        "read_catalog: {}: years {:?}",
        path,
        catalog.years.iter().map(|y| &y.year).collect::<Vec<&String>>()
    );
    debug!("read_catalog: {:?}", catalog);
    Ok(catalog)
}
