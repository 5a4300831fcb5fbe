//! Variant availability engine.
//!
//! Derives the availability status of each variant of a product (in stock,
//! preorder, launch, special order, backorder, notify me, discontinued) from
//! caller-supplied facts, and aggregates them into product tags and a quick-buy
//! gate. Purely deterministic domain logic: no IO, no HTTP, no storage.
//!
//! Entry points:
//! - [`classify`] / [`classify_at`] for a single variant,
//! - [`process`] / [`Processor::process`] for a whole product,
//! - [`apply_override`] for validated manual edits.

pub mod classifier;
pub mod clock;
pub mod config;
pub mod facts;
pub mod guard;
pub mod overrides;
pub mod processor;
pub mod product;
pub mod quick_buy;
pub mod status;
pub mod tags;

pub use classifier::{Classification, Rule, classify, classify_at};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use facts::{DiscontinuedClassification, VariantFacts, parse_launch_date};
pub use guard::{RunGuard, RunTicket};
pub use overrides::{MetafieldFlags, apply_override};
pub use processor::{Processor, process};
pub use product::{BatchSummary, Product, ProductSnapshot, Variant};
pub use quick_buy::compute_quick_buy_disabled;
pub use status::{StatusCategory, StatusChange, StatusSource, VariantError, VariantStatus};
pub use tags::aggregate_tags;

pub use availability_core::{DomainError, DomainResult, ProductId, RunId, VariantId};
