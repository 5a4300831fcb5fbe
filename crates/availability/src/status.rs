use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use availability_core::ValueObject;

/// Availability category of a variant.
///
/// Exactly one per variant. Declaration order is the tag order used by the
/// aggregator; it is not the classifier's rule priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusCategory {
    InStock,
    Preorder,
    PreorderLaunch,
    PreorderSpecialOrder,
    PreorderBackorder,
    PreorderNotifyMe,
    PreorderDiscontinued,
}

impl StatusCategory {
    /// All categories, in declaration order.
    pub const ALL: [StatusCategory; 7] = [
        StatusCategory::InStock,
        StatusCategory::Preorder,
        StatusCategory::PreorderLaunch,
        StatusCategory::PreorderSpecialOrder,
        StatusCategory::PreorderBackorder,
        StatusCategory::PreorderNotifyMe,
        StatusCategory::PreorderDiscontinued,
    ];

    /// Product tag for this category. `InStock` produces none.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            StatusCategory::InStock => None,
            StatusCategory::Preorder => Some("preorder"),
            StatusCategory::PreorderLaunch => Some("preorder_launch"),
            StatusCategory::PreorderSpecialOrder => Some("preorder_specialorder"),
            StatusCategory::PreorderBackorder => Some("preorder_backorder"),
            StatusCategory::PreorderNotifyMe => Some("preorder_notifyme"),
            StatusCategory::PreorderDiscontinued => Some("preorder_discontinued"),
        }
    }

    /// Only discontinued variants block purchasing outright.
    pub fn purchase_disabled(self) -> bool {
        self == StatusCategory::PreorderDiscontinued
    }
}

impl core::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag().unwrap_or("in_stock"))
    }
}

/// Who decided a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    /// Derived from facts by the classifier.
    Rules,
    /// Set by hand through a validated metafield edit.
    Manual,
}

/// One entry of a variant's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// `None` for the first status a variant ever received.
    pub from: Option<StatusCategory>,
    pub to: StatusCategory,
    pub at: DateTime<Utc>,
    pub source: StatusSource,
}

/// Derived status of one variant plus its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantStatus {
    pub category: StatusCategory,
    pub purchase_disabled: bool,
    pub source: StatusSource,
    /// Human-readable reason for the category.
    pub message: String,
    pub updated_at: DateTime<Utc>,
    /// Fact problems that were recovered from (e.g. an unparsable launch date).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Most recent category changes, oldest first.
    #[serde(default)]
    pub history: Vec<StatusChange>,
}

impl ValueObject for VariantStatus {}

impl VariantStatus {
    /// Build the next status from a previous one, carrying history forward.
    ///
    /// A history entry is appended only when the category changes, and the
    /// history is trimmed to the `history_limit` most recent entries.
    pub fn succeed(
        previous: Option<&VariantStatus>,
        category: StatusCategory,
        source: StatusSource,
        message: impl Into<String>,
        warnings: Vec<String>,
        at: DateTime<Utc>,
        history_limit: usize,
    ) -> Self {
        let mut history = previous.map(|p| p.history.clone()).unwrap_or_default();
        let from = previous.map(|p| p.category);

        if from != Some(category) {
            history.push(StatusChange {
                from,
                to: category,
                at,
                source,
            });
        }

        let overflow = history.len().saturating_sub(history_limit);
        if overflow > 0 {
            history.drain(..overflow);
        }

        Self {
            category,
            purchase_disabled: category.purchase_disabled(),
            source,
            message: message.into(),
            updated_at: at,
            warnings,
            history,
        }
    }
}

/// Marker left on a variant whose facts could not be processed in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantError {
    pub message: String,
    pub at: DateTime<Utc>,
}
