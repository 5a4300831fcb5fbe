//! Variant classifier.
//!
//! The whole decision cascade lives in [`RULES`]: an ordered table of
//! predicate -> category entries evaluated top-down, first match wins. A
//! variant matching none of them is in stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::facts::VariantFacts;
use crate::status::StatusCategory;

/// Identifies which cascade step decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    HardDiscontinued,
    FutureLaunch,
    ExtendedBackorder,
    SpecialOrder,
    Backorder,
    FirstTimePreorder,
    Default,
}

/// Outcome of classifying one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: StatusCategory,
    pub purchase_disabled: bool,
    pub rule: Rule,
    pub reason: String,
    /// Recovered fact problems: an unparsable launch date or a zero minimum
    /// order quantity.
    pub warnings: Vec<String>,
}

/// Facts resolved once per classification, shared by every predicate.
struct Evaluation<'a> {
    facts: &'a VariantFacts,
    launch: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    notify_me_weeks: u32,
}

struct RuleEntry {
    rule: Rule,
    category: StatusCategory,
    applies: fn(&Evaluation<'_>) -> bool,
}

static RULES: [RuleEntry; 6] = [
    RuleEntry {
        rule: Rule::HardDiscontinued,
        category: StatusCategory::PreorderDiscontinued,
        applies: hard_discontinued,
    },
    RuleEntry {
        rule: Rule::FutureLaunch,
        category: StatusCategory::PreorderLaunch,
        applies: future_launch,
    },
    RuleEntry {
        rule: Rule::ExtendedBackorder,
        category: StatusCategory::PreorderNotifyMe,
        applies: extended_backorder,
    },
    RuleEntry {
        rule: Rule::SpecialOrder,
        category: StatusCategory::PreorderSpecialOrder,
        applies: special_order,
    },
    RuleEntry {
        rule: Rule::Backorder,
        category: StatusCategory::PreorderBackorder,
        applies: backorder,
    },
    RuleEntry {
        rule: Rule::FirstTimePreorder,
        category: StatusCategory::Preorder,
        applies: first_time_preorder,
    },
];

fn hard_discontinued(e: &Evaluation<'_>) -> bool {
    e.facts.discontinued.is_hard()
}

fn future_launch(e: &Evaluation<'_>) -> bool {
    e.launch.is_some_and(|launch| launch > e.now)
}

fn extended_backorder(e: &Evaluation<'_>) -> bool {
    e.facts.out_of_stock() && e.facts.backorder_weeks >= e.notify_me_weeks
}

// Special order and backorder both describe restocking something that has been
// stocked before; a never-stocked variant falls through to first-time preorder.
fn special_order(e: &Evaluation<'_>) -> bool {
    e.facts.out_of_stock()
        && e.facts.had_stock_before
        && e.facts.effective_minimum_order_quantity() == 1
}

fn backorder(e: &Evaluation<'_>) -> bool {
    e.facts.out_of_stock() && e.facts.had_stock_before
}

fn first_time_preorder(e: &Evaluation<'_>) -> bool {
    e.facts.out_of_stock() && !e.facts.had_stock_before
}

impl Rule {
    fn reason(self, e: &Evaluation<'_>) -> String {
        let f = e.facts;
        match self {
            Rule::HardDiscontinued => format!("discontinued ({})", f.discontinued),
            Rule::FutureLaunch => match e.launch {
                Some(launch) => format!("launches {}", launch.format("%Y-%m-%d")),
                None => "launch pending".to_string(),
            },
            Rule::ExtendedBackorder => format!(
                "out of stock (inventory {}) for {} week(s); notify me",
                f.inventory, f.backorder_weeks
            ),
            Rule::SpecialOrder => format!("out of stock (inventory {}); special order", f.inventory),
            Rule::Backorder => format!(
                "out of stock (inventory {}, minimum order {}); backorder",
                f.inventory,
                f.effective_minimum_order_quantity()
            ),
            Rule::FirstTimePreorder => {
                format!("never stocked (inventory {}); preorder", f.inventory)
            }
            Rule::Default => format!("in stock (inventory {})", f.inventory),
        }
    }
}

/// Classify at the current wall-clock time with default configuration.
pub fn classify(facts: &VariantFacts) -> Classification {
    classify_at(facts, Utc::now(), &EngineConfig::default())
}

/// Classify against a fixed evaluation instant. Total: never fails.
pub fn classify_at(
    facts: &VariantFacts,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Classification {
    let mut warnings = Vec::new();
    let launch = match facts.launch_instant() {
        Ok(launch) => launch,
        Err(err) => {
            warnings.push(format!("launch date ignored: {err}"));
            None
        }
    };
    if facts.minimum_order_quantity == 0 {
        warnings.push("minimum order quantity 0 defaulted to 1".to_string());
    }

    let evaluation = Evaluation {
        facts,
        launch,
        now,
        notify_me_weeks: config.notify_me_weeks,
    };

    let (rule, category) = RULES
        .iter()
        .find(|entry| (entry.applies)(&evaluation))
        .map(|entry| (entry.rule, entry.category))
        .unwrap_or((Rule::Default, StatusCategory::InStock));

    Classification {
        category,
        purchase_disabled: category.purchase_disabled(),
        rule,
        reason: rule.reason(&evaluation),
        warnings,
    }
}
