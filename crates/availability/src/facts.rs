use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use availability_core::{DomainError, DomainResult, ValueObject, VariantId};

/// Discontinuation classification as maintained by merchandising.
///
/// Only the "hard" classifications block restocking; the rest still allow
/// special ordering and fall through to the inventory rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscontinuedClassification {
    #[default]
    None,
    ByManufacturer,
    ByUs,
    SpecialOrder,
    Delisted,
}

impl DiscontinuedClassification {
    pub fn label(self) -> &'static str {
        match self {
            DiscontinuedClassification::None => "none",
            DiscontinuedClassification::ByManufacturer => "byManufacturer",
            DiscontinuedClassification::ByUs => "byUs",
            DiscontinuedClassification::SpecialOrder => "specialOrder",
            DiscontinuedClassification::Delisted => "delisted",
        }
    }

    /// Manufacturer discontinuation and delisting can never be restocked.
    pub fn is_hard(self) -> bool {
        matches!(
            self,
            DiscontinuedClassification::ByManufacturer | DiscontinuedClassification::Delisted
        )
    }

    /// Lenient label parsing: case and separators are ignored, unknown labels
    /// map to `None`.
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "bymanufacturer" | "discontinuedbymanufacturer" => {
                DiscontinuedClassification::ByManufacturer
            }
            "byus" | "discontinuedbyus" => DiscontinuedClassification::ByUs,
            "specialorder" => DiscontinuedClassification::SpecialOrder,
            "delisted" => DiscontinuedClassification::Delisted,
            _ => DiscontinuedClassification::None,
        }
    }
}

impl From<String> for DiscontinuedClassification {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<DiscontinuedClassification> for String {
    fn from(value: DiscontinuedClassification) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for DiscontinuedClassification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

fn default_minimum_order_quantity() -> u32 {
    1
}

/// Observable state of one variant, as supplied by the caller.
///
/// `backorder_weeks` and `had_stock_before` are maintained by the caller between
/// runs; the engine only reads them. Field names are accepted in snake_case or
/// camelCase; any other key is rejected rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantFacts {
    pub id: VariantId,
    #[serde(default)]
    pub inventory: i64,
    #[serde(default, alias = "hadStockBefore")]
    pub had_stock_before: bool,
    /// Raw launch date (`YYYY-MM-DD` or RFC 3339). Kept unparsed so a bad value
    /// can be reported instead of rejected.
    #[serde(default, alias = "launchDate", skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(
        default,
        alias = "discontinuedClassification",
        alias = "discontinued_classification"
    )]
    pub discontinued: DiscontinuedClassification,
    #[serde(default = "default_minimum_order_quantity", alias = "minimumOrderQuantity")]
    pub minimum_order_quantity: u32,
    #[serde(default, alias = "backorderWeeks")]
    pub backorder_weeks: u32,
}

impl ValueObject for VariantFacts {}

impl VariantFacts {
    /// Facts for an in-stock variant with every optional field defaulted.
    pub fn new(id: impl Into<VariantId>, inventory: i64) -> Self {
        Self {
            id: id.into(),
            inventory,
            had_stock_before: inventory > 0,
            launch_date: None,
            discontinued: DiscontinuedClassification::None,
            minimum_order_quantity: 1,
            backorder_weeks: 0,
        }
    }

    pub fn with_had_stock_before(mut self, had_stock_before: bool) -> Self {
        self.had_stock_before = had_stock_before;
        self
    }

    pub fn with_launch_date(mut self, launch_date: impl Into<String>) -> Self {
        self.launch_date = Some(launch_date.into());
        self
    }

    pub fn with_discontinued(mut self, discontinued: DiscontinuedClassification) -> Self {
        self.discontinued = discontinued;
        self
    }

    pub fn with_minimum_order_quantity(mut self, quantity: u32) -> Self {
        self.minimum_order_quantity = quantity;
        self
    }

    pub fn with_backorder_weeks(mut self, weeks: u32) -> Self {
        self.backorder_weeks = weeks;
        self
    }

    /// Zero and negative inventory are equivalent: nothing can ship from stock.
    pub fn out_of_stock(&self) -> bool {
        self.inventory <= 0
    }

    /// Minimum order quantity with the `0 -> 1` default applied.
    pub fn effective_minimum_order_quantity(&self) -> u32 {
        self.minimum_order_quantity.max(1)
    }

    /// Strict checks applied by the batch processor before classification.
    ///
    /// A zero minimum order quantity is not a failure here; it is defaulted
    /// and reported as a classification warning.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.is_blank() {
            return Err(DomainError::validation("variant id cannot be empty"));
        }
        Ok(())
    }

    /// Resolve the launch date. `Ok(None)` when unset or blank.
    pub fn launch_instant(&self) -> DomainResult<Option<DateTime<Utc>>> {
        match self.launch_date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_launch_date(raw).map(Some),
        }
    }
}

/// Parse a launch date. Calendar dates start at midnight UTC.
pub fn parse_launch_date(raw: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DomainError::validation(format!("unparsable launch date {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hard_discontinued_is_manufacturer_or_delisted() {
        assert!(DiscontinuedClassification::ByManufacturer.is_hard());
        assert!(DiscontinuedClassification::Delisted.is_hard());
        assert!(!DiscontinuedClassification::ByUs.is_hard());
        assert!(!DiscontinuedClassification::SpecialOrder.is_hard());
        assert!(!DiscontinuedClassification::None.is_hard());
    }

    #[test]
    fn classification_labels_are_lenient() {
        assert_eq!(
            DiscontinuedClassification::from_label("by_manufacturer"),
            DiscontinuedClassification::ByManufacturer
        );
        assert_eq!(
            DiscontinuedClassification::from_label("Discontinued By Manufacturer"),
            DiscontinuedClassification::ByManufacturer
        );
        assert_eq!(
            DiscontinuedClassification::from_label("special-order"),
            DiscontinuedClassification::SpecialOrder
        );
        assert_eq!(
            DiscontinuedClassification::from_label("something new"),
            DiscontinuedClassification::None
        );
    }

    #[test]
    fn facts_deserialize_with_defaults() {
        let facts: VariantFacts =
            serde_json::from_str(r#"{"id":"v1","inventory":-3,"discontinued":"delisted"}"#).unwrap();

        assert_eq!(facts.id.as_str(), "v1");
        assert_eq!(facts.inventory, -3);
        assert!(!facts.had_stock_before);
        assert_eq!(facts.launch_date, None);
        assert_eq!(facts.discontinued, DiscontinuedClassification::Delisted);
        assert_eq!(facts.minimum_order_quantity, 1);
        assert_eq!(facts.backorder_weeks, 0);
        assert!(facts.out_of_stock());
    }

    #[test]
    fn unknown_classification_deserializes_as_none() {
        let facts: VariantFacts =
            serde_json::from_str(r#"{"id":"v1","discontinued":"seasonal"}"#).unwrap();
        assert_eq!(facts.discontinued, DiscontinuedClassification::None);
    }

    #[test]
    fn launch_dates_parse_as_midnight_utc_or_rfc3339() {
        assert_eq!(
            parse_launch_date("2026-11-01").unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_launch_date("2026-11-01T09:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 1, 7, 30, 0).unwrap()
        );
        assert!(matches!(
            parse_launch_date("next tuesday"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn blank_launch_date_is_absent() {
        let facts = VariantFacts::new("v1", 0).with_launch_date("   ");
        assert_eq!(facts.launch_instant().unwrap(), None);
    }

    #[test]
    fn facts_accept_camel_case_field_names() {
        let facts: VariantFacts = serde_json::from_str(
            r#"{
                "id": "v1",
                "inventory": 5,
                "discontinuedClassification": "byManufacturer",
                "hadStockBefore": true,
                "minimumOrderQuantity": 3,
                "backorderWeeks": 2,
                "launchDate": "2027-01-01"
            }"#,
        )
        .unwrap();

        assert_eq!(facts.discontinued, DiscontinuedClassification::ByManufacturer);
        assert!(facts.had_stock_before);
        assert_eq!(facts.minimum_order_quantity, 3);
        assert_eq!(facts.backorder_weeks, 2);
        assert_eq!(facts.launch_date.as_deref(), Some("2027-01-01"));
    }

    #[test]
    fn unknown_fact_fields_are_rejected() {
        let result = serde_json::from_str::<VariantFacts>(
            r#"{"id":"v1","inventory":5,"discontinuedStatus":"byManufacturer"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_blank_id_only() {
        let zero_moq = VariantFacts::new("v1", 0).with_minimum_order_quantity(0);
        assert!(zero_moq.validate().is_ok());
        assert_eq!(zero_moq.effective_minimum_order_quantity(), 1);

        let blank = VariantFacts::new("", 4);
        assert!(matches!(blank.validate(), Err(DomainError::Validation(_))));

        assert!(VariantFacts::new("v1", 4).validate().is_ok());
    }
}
