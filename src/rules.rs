//! Rule file loading: the fixed account label, the description filter and
//! the category mappings, compiled once per run.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{FaturaError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Deserialize)]
struct RuleFile {
    fixed_account: String,
    remove_descriptions: Vec<String>,
    category_mappings: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(rename = "Description", alias = "Descrição", default)]
    pub description: Option<String>,
    #[serde(rename = "Category", alias = "Categoria", default)]
    pub category: Option<String>,
}

/// Case-insensitive literal substring match.
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    re: Regex,
}

impl Keyword {
    pub fn new(text: &str) -> std::result::Result<Self, regex::Error> {
        let re = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            text: text.to_string(),
            re,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Empty descriptions never match.
    pub fn is_match(&self, description: &str) -> bool {
        !description.is_empty() && self.re.is_match(description)
    }
}

/// One condition of a category mapping with at least one criterion set.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub target: String,
    pub description: Option<Keyword>,
    pub category: Option<String>,
}

impl CategoryRule {
    pub fn matches(&self, description: &str, category: &str) -> bool {
        let desc_ok = self
            .description
            .as_ref()
            .map_or(true, |k| k.is_match(description));
        let cat_ok = self.category.as_deref().map_or(true, |c| c == category);
        desc_ok && cat_ok
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    pub fixed_account: String,
    pub remove_descriptions: Vec<Keyword>,
    /// Flattened in declaration order: targets first, then conditions.
    pub category_rules: Vec<CategoryRule>,
}

impl RuleSet {
    pub fn from_json(json: &str) -> std::result::Result<Self, String> {
        let file: RuleFile = serde_json::from_str(json).map_err(|e| e.to_string())?;

        let remove_descriptions = file
            .remove_descriptions
            .iter()
            .map(|s| Keyword::new(s).map_err(|e| e.to_string()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut category_rules = Vec::new();
        for (target, conditions) in file.category_mappings {
            let conditions: Vec<Condition> = serde_json::from_value(conditions)
                .map_err(|e| format!("category_mappings.{target}: {e}"))?;
            for cond in conditions {
                if cond.description.is_none() && cond.category.is_none() {
                    continue;
                }
                let description = cond
                    .description
                    .as_deref()
                    .map(Keyword::new)
                    .transpose()
                    .map_err(|e| e.to_string())?;
                category_rules.push(CategoryRule {
                    target: target.clone(),
                    description,
                    category: cond.category,
                });
            }
        }

        Ok(Self {
            fixed_account: file.fixed_account,
            remove_descriptions,
            category_rules,
        })
    }
}

pub fn load_config(path: &Path) -> Result<RuleSet> {
    let content =
        std::fs::read_to_string(path).map_err(|e| FaturaError::config(path, e))?;
    RuleSet::from_json(&content).map_err(|e| FaturaError::config(path, e))
}
