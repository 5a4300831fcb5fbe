//! Manual status overrides.
//!
//! The merchandising UI edits preorder-family metafields as independent yes/no
//! flags. Those flags are converted to a single [`StatusCategory`] here and
//! rejected when more than one is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use availability_core::{DomainError, DomainResult, Entity, VariantId};

use crate::config::EngineConfig;
use crate::product::Product;
use crate::status::{StatusCategory, StatusSource, VariantStatus};

/// Preorder-family metafields of one variant, as edited by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetafieldFlags {
    pub preorder: bool,
    pub preorder_launch: bool,
    pub preorder_specialorder: bool,
    pub preorder_backorder: bool,
    pub preorder_notifyme: bool,
    pub preorder_discontinued: bool,
}

impl MetafieldFlags {
    fn entries(&self) -> [(StatusCategory, bool); 6] {
        [
            (StatusCategory::Preorder, self.preorder),
            (StatusCategory::PreorderLaunch, self.preorder_launch),
            (StatusCategory::PreorderSpecialOrder, self.preorder_specialorder),
            (StatusCategory::PreorderBackorder, self.preorder_backorder),
            (StatusCategory::PreorderNotifyMe, self.preorder_notifyme),
            (StatusCategory::PreorderDiscontinued, self.preorder_discontinued),
        ]
    }

    /// The single category these flags describe. No flag set means in stock.
    pub fn to_category(&self) -> DomainResult<StatusCategory> {
        let set: Vec<StatusCategory> = self
            .entries()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(category, _)| category)
            .collect();

        match set.as_slice() {
            [] => Ok(StatusCategory::InStock),
            [category] => Ok(*category),
            many => {
                let names: Vec<&str> = many.iter().filter_map(|c| c.tag()).collect();
                Err(DomainError::validation(format!(
                    "only one preorder metafield may be set, got {}",
                    names.join(", ")
                )))
            }
        }
    }

    /// Flags describing `category`, for rendering an existing status.
    pub fn from_category(category: StatusCategory) -> Self {
        let mut flags = Self::default();
        match category {
            StatusCategory::InStock => {}
            StatusCategory::Preorder => flags.preorder = true,
            StatusCategory::PreorderLaunch => flags.preorder_launch = true,
            StatusCategory::PreorderSpecialOrder => flags.preorder_specialorder = true,
            StatusCategory::PreorderBackorder => flags.preorder_backorder = true,
            StatusCategory::PreorderNotifyMe => flags.preorder_notifyme = true,
            StatusCategory::PreorderDiscontinued => flags.preorder_discontinued = true,
        }
        flags
    }
}

/// Apply a manual metafield edit to one variant.
///
/// Validation happens before anything is touched: an unknown variant or a
/// conflicting flag set leaves the caller's product as it was. The override
/// only lasts until the next batch run recomputes the status from facts.
pub fn apply_override(
    product: &Product,
    variant_id: &VariantId,
    flags: &MetafieldFlags,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> DomainResult<Product> {
    let category = flags.to_category()?;

    let index = product
        .variants
        .iter()
        .position(|v| v.id() == variant_id)
        .ok_or_else(|| DomainError::not_found(format!("variant {variant_id} in product {}", product.id)))?;

    let mut next = product.clone();
    let variant = &mut next.variants[index];
    variant.status = Some(VariantStatus::succeed(
        variant.status.as_ref(),
        category,
        StatusSource::Manual,
        format!("set manually to {category}"),
        Vec::new(),
        now,
        config.history_limit,
    ));

    tracing::info!(
        product_id = %product.id,
        variant_id = %variant_id,
        category = %category,
        "manual status override applied"
    );

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::VariantFacts;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 8, 0, 0).unwrap()
    }

    fn product() -> Product {
        Product::new("p1", "Diffuser Oil")
            .with_variant(VariantFacts::new("small", 4))
            .with_variant(VariantFacts::new("large", 0))
    }

    #[test]
    fn no_flags_means_in_stock() {
        assert_eq!(MetafieldFlags::default().to_category().unwrap(), StatusCategory::InStock);
    }

    #[test]
    fn conflicting_flags_are_rejected_with_names() {
        let flags = MetafieldFlags {
            preorder_backorder: true,
            preorder_notifyme: true,
            ..MetafieldFlags::default()
        };
        match flags.to_category() {
            Err(DomainError::Validation(msg)) => {
                assert!(msg.contains("preorder_backorder"));
                assert!(msg.contains("preorder_notifyme"));
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn flags_round_trip_through_category() {
        for category in StatusCategory::ALL {
            assert_eq!(MetafieldFlags::from_category(category).to_category().unwrap(), category);
        }
    }

    #[test]
    fn override_sets_manual_status_without_touching_input() {
        let original = product();
        let flags = MetafieldFlags {
            preorder_discontinued: true,
            ..MetafieldFlags::default()
        };

        let edited = apply_override(&original, &"large".into(), &flags, now(), &EngineConfig::default())
            .unwrap();

        assert_eq!(original, product());
        let status = edited.variants[1].status.as_ref().unwrap();
        assert_eq!(status.category, StatusCategory::PreorderDiscontinued);
        assert_eq!(status.source, StatusSource::Manual);
        assert!(status.purchase_disabled);
        assert_eq!(status.history.len(), 1);
        assert!(edited.variants[0].status.is_none());
    }

    #[test]
    fn override_rejects_unknown_variant() {
        let err = apply_override(
            &product(),
            &"medium".into(),
            &MetafieldFlags::default(),
            now(),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn invalid_flags_rejected_before_lookup() {
        let flags = MetafieldFlags {
            preorder: true,
            preorder_launch: true,
            ..MetafieldFlags::default()
        };
        let err = apply_override(&product(), &"medium".into(), &flags, now(), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
