//! Batch processor: classify every variant of a product and derive the
//! product-level tags and quick-buy flag.
//!
//! The input product is only borrowed; every run returns a new
//! [`ProductSnapshot`] and the caller replaces its stored product with it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use availability_core::{DomainError, DomainResult, Entity, RunId, VariantId};

use crate::classifier::{Classification, classify_at};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::product::{BatchSummary, Product, ProductSnapshot, Variant};
use crate::quick_buy::compute_quick_buy_disabled;
use crate::status::{StatusSource, VariantError, VariantStatus};
use crate::tags::aggregate_tags;

/// Batch processor bound to an evaluation clock and configuration.
#[derive(Debug, Clone)]
pub struct Processor<C = SystemClock> {
    clock: C,
    config: EngineConfig,
}

impl Processor<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Processor<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Processor<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process every variant of `product`.
    ///
    /// A variant with a blank or duplicate id keeps its previous status, gets
    /// an error marker and is counted as failed; the rest of the batch
    /// proceeds. Recoverable fact problems only add warnings.
    pub fn process(&self, product: &Product) -> ProductSnapshot {
        let run_id = RunId::new();
        // One instant per run so every variant is judged against the same time.
        let now = self.clock.now();

        let span = tracing::info_span!("availability_run", product_id = %product.id, run_id = %run_id);
        let _enter = span.enter();

        let mut seen: HashSet<VariantId> = HashSet::with_capacity(product.variants.len());
        let mut variants = Vec::with_capacity(product.variants.len());
        let mut log = Vec::with_capacity(product.variants.len() + 1);
        let mut summary = BatchSummary {
            total: product.variants.len(),
            ..BatchSummary::default()
        };

        for variant in &product.variants {
            match self.process_variant(variant, &mut seen, now) {
                Ok((next, classification)) => {
                    summary.succeeded += 1;
                    log.push(decision_line(variant, &classification));
                    variants.push(next);
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(variant_id = %variant.id(), error = %err, "variant kept previous status");
                    log.push(failure_line(variant, &err));
                    variants.push(Variant {
                        facts: variant.facts.clone(),
                        status: variant.status.clone(),
                        error: Some(VariantError {
                            message: err.to_string(),
                            at: now,
                        }),
                    });
                }
            }
        }

        let tags = aggregate_tags(
            variants
                .iter()
                .filter_map(|v| v.status.as_ref().map(|s| s.category)),
        );

        let next = Product {
            id: product.id.clone(),
            title: product.title.clone(),
            variants,
        };
        let quick_buy_disabled = compute_quick_buy_disabled(&next, &tags);

        log.push(format!(
            "processed {} variant(s): {} succeeded, {} failed; tags [{}]; quick buy {}",
            summary.total,
            summary.succeeded,
            summary.failed,
            tags.join(", "),
            if quick_buy_disabled { "disabled" } else { "enabled" }
        ));

        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            tags = ?tags,
            quick_buy_disabled,
            "availability run complete"
        );

        ProductSnapshot {
            run_id,
            product: next,
            tags,
            quick_buy_disabled,
            processed_at: now,
            log,
            summary,
        }
    }

    fn process_variant(
        &self,
        variant: &Variant,
        seen: &mut HashSet<VariantId>,
        now: DateTime<Utc>,
    ) -> DomainResult<(Variant, Classification)> {
        let facts = &variant.facts;
        facts.validate()?;
        if !seen.insert(facts.id.clone()) {
            return Err(DomainError::invariant(format!(
                "duplicate variant id {} within product",
                facts.id
            )));
        }

        let classification = classify_at(facts, now, &self.config);
        for warning in &classification.warnings {
            warn!(variant_id = %facts.id, "{warning}");
        }
        debug!(
            variant_id = %facts.id,
            category = %classification.category,
            rule = ?classification.rule,
            "variant classified"
        );

        let status = VariantStatus::succeed(
            variant.status.as_ref(),
            classification.category,
            StatusSource::Rules,
            classification.reason.clone(),
            classification.warnings.clone(),
            now,
            self.config.history_limit,
        );

        Ok((
            Variant {
                facts: facts.clone(),
                status: Some(status),
                error: None,
            },
            classification,
        ))
    }
}

/// Process with the system clock and default configuration.
pub fn process(product: &Product) -> ProductSnapshot {
    Processor::new().process(product)
}

fn decision_line(variant: &Variant, c: &Classification) -> String {
    let previous = variant.status.as_ref().map(|s| s.category);
    let transition = match previous {
        Some(prev) if prev != c.category => format!("{prev} -> {}", c.category),
        _ => c.category.to_string(),
    };
    let mut line = format!("variant {}: {transition} ({})", variant.id(), c.reason);
    for warning in &c.warnings {
        line.push_str("; ");
        line.push_str(warning);
    }
    line
}

fn failure_line(variant: &Variant, err: &DomainError) -> String {
    let kept = variant
        .status
        .as_ref()
        .map(|s| s.category.to_string())
        .unwrap_or_else(|| "no status".to_string());
    format!("variant {}: failed ({err}); kept {kept}", variant.id())
}
