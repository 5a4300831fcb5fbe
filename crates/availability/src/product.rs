use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use availability_core::{Entity, ProductId, RunId, VariantId};

use crate::facts::VariantFacts;
use crate::status::{VariantError, VariantStatus};

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub facts: VariantFacts,
    /// `None` until the variant has been processed once.
    #[serde(default)]
    pub status: Option<VariantStatus>,
    /// Set when the most recent run could not process this variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VariantError>,
}

impl Variant {
    pub fn new(facts: VariantFacts) -> Self {
        Self {
            facts,
            status: None,
            error: None,
        }
    }
}

impl From<VariantFacts> for Variant {
    fn from(facts: VariantFacts) -> Self {
        Self::new(facts)
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.facts.id
    }
}

/// A product as held by the caller: identity plus ordered variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, facts: VariantFacts) -> Self {
        self.variants.push(Variant::new(facts));
        self
    }

    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id() == id)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Per-run success/failure counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// At least one variant failed and kept its previous status.
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

/// Result of one batch run. The caller replaces its stored product with
/// `snapshot.product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub run_id: RunId,
    pub product: Product,
    /// Product tags in category declaration order, without duplicates.
    pub tags: Vec<String>,
    pub quick_buy_disabled: bool,
    pub processed_at: DateTime<Utc>,
    /// Human-readable per-variant decisions for audit/debugging.
    pub log: Vec<String>,
    pub summary: BatchSummary,
}

impl ProductSnapshot {
    pub fn into_product(self) -> Product {
        self.product
    }
}
