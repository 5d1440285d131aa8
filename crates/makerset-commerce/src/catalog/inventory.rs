//! Part inventory payloads for the admin endpoints.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How an adjustment changes the stock level of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentType {
    /// Add to the current level.
    Add,
    /// Subtract from the current level.
    Remove,
    /// Overwrite the current level.
    Set,
}

impl AdjustmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentType::Add => "add",
            AdjustmentType::Remove => "remove",
            AdjustmentType::Set => "set",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "add" => Some(AdjustmentType::Add),
            "remove" => Some(AdjustmentType::Remove),
            "set" => Some(AdjustmentType::Set),
            _ => None,
        }
    }
}

/// Body of `POST /api/inventory/parts/{partId}/adjust`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryAdjustment {
    pub adjustment_type: AdjustmentType,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryAdjustment {
    pub fn new(adjustment_type: AdjustmentType, quantity: i64) -> Self {
        Self {
            adjustment_type,
            quantity,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// `add` and `remove` need a positive quantity; `set` accepts zero.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let ok = match self.adjustment_type {
            AdjustmentType::Set => self.quantity >= 0,
            AdjustmentType::Add | AdjustmentType::Remove => self.quantity > 0,
        };
        if ok {
            Ok(())
        } else {
            Err(CommerceError::InvalidQuantity(self.quantity))
        }
    }
}

/// Body of `POST /api/inventory/parts/{partId}/income`: a received delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryIncome {
    pub quantity: i64,
    pub supplier: String,
    pub cost_per_unit: f64,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryIncome {
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }
        if self.supplier.trim().is_empty() {
            return Err(CommerceError::Validation(vec!["supplier".to_string()]));
        }
        if !self.cost_per_unit.is_finite() || self.cost_per_unit < 0.0 {
            return Err(CommerceError::InvalidInput(format!(
                "cost per unit must be a non-negative amount, got {}",
                self.cost_per_unit
            )));
        }
        Ok(())
    }

    /// Cost of the whole delivery.
    pub fn total_cost(&self, currency: Currency) -> Money {
        Money::coerce(Some(self.cost_per_unit), currency).saturating_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_wire_format() {
        let adj = InventoryAdjustment::new(AdjustmentType::Remove, 4).with_notes("damaged");
        let value = serde_json::to_value(&adj).unwrap();
        assert_eq!(value["adjustment_type"], "remove");
        assert_eq!(value["quantity"], 4);
        assert_eq!(value["notes"], "damaged");
        assert_eq!(AdjustmentType::parse(" SET "), Some(AdjustmentType::Set));
        assert_eq!(AdjustmentType::parse("bump"), None);
    }

    #[test]
    fn test_adjustment_validation() {
        assert!(InventoryAdjustment::new(AdjustmentType::Set, 0).validate().is_ok());
        assert!(matches!(
            InventoryAdjustment::new(AdjustmentType::Add, 0).validate(),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_income() {
        let income: InventoryIncome = serde_json::from_str(
            r#"{"quantity": 100, "supplier": "Parts Co", "cost_per_unit": 0.12,
                "purchase_date": "2026-03-01"}"#,
        )
        .unwrap();
        assert!(income.validate().is_ok());
        assert_eq!(income.purchase_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(income.total_cost(Currency::EUR).amount_cents, 1200);

        let bad = InventoryIncome {
            supplier: " ".to_string(),
            ..income
        };
        assert!(matches!(bad.validate(), Err(CommerceError::Validation(_))));
    }
}
