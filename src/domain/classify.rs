//! Keyword classification of indicator records into display categories.
//!
//! Rules are evaluated top to bottom and the first rule with a keyword
//! contained in the indicator name wins. Matching is case-sensitive.
//! `Momentum` comes before `Trend` so that `MACD` is not claimed by the
//! `MA` keyword.

use crate::domain::payload::IndicatorRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Trend,
    Momentum,
    Volatility,
    Volume,
    Other,
}

impl Category {
    /// Display order of category groups.
    pub const ALL: [Category; 5] = [
        Category::Trend,
        Category::Momentum,
        Category::Volatility,
        Category::Volume,
        Category::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Trend => "Trend",
            Category::Momentum => "Momentum",
            Category::Volatility => "Volatility",
            Category::Volume => "Volume",
            Category::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// Where indicators matching no rule go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    #[default]
    Other,
    Trend,
}

impl UnmatchedPolicy {
    pub fn category(self) -> Category {
        match self {
            UnmatchedPolicy::Other => Category::Other,
            UnmatchedPolicy::Trend => Category::Trend,
        }
    }
}

impl FromStr for UnmatchedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "other" => Ok(UnmatchedPolicy::Other),
            "trend" => Ok(UnmatchedPolicy::Trend),
            other => Err(format!("expected 'other' or 'trend', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub keywords: Vec<String>,
    pub category: Category,
}

impl Rule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<Rule>,
    unmatched: UnmatchedPolicy,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules(), UnmatchedPolicy::default())
    }
}

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            Category::Momentum,
            &[
                "RSI",
                "MACD",
                "Stochastic",
                "ROC",
                "CCI",
                "Williams",
                "Oscillator",
                "Momentum",
            ],
        ),
        Rule::new(
            Category::Volatility,
            &["ATR", "Bollinger", "Volatility", "Std"],
        ),
        Rule::new(Category::Volume, &["Volume", "OBV", "VWAP", "MFI"]),
        Rule::new(
            Category::Trend,
            &["MA", "Moving Average", "ADX", "Trend", "Supertrend", "Ichimoku"],
        ),
    ]
}

impl Classifier {
    pub fn new(rules: Vec<Rule>, unmatched: UnmatchedPolicy) -> Self {
        Self { rules, unmatched }
    }

    pub fn with_unmatched(unmatched: UnmatchedPolicy) -> Self {
        Self::new(default_rules(), unmatched)
    }

    pub fn classify(&self, name: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matches(name))
            .map(|rule| rule.category)
            .unwrap_or_else(|| self.unmatched.category())
    }

    /// Group records by category, keeping upstream order within each group.
    /// Every category appears, possibly empty, in [`Category::ALL`] order.
    pub fn group(&self, records: &[IndicatorRecord]) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Category::ALL
            .iter()
            .map(|&category| CategoryGroup {
                category,
                indicators: Vec::new(),
            })
            .collect();

        for record in records {
            let category = self.classify(&record.name);
            if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
                group.indicators.push(record.clone());
            }
        }

        groups
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub indicators: Vec<IndicatorRecord>,
}
