//! Stock validation request and report types.

use crate::cart::CartStore;
use crate::ids::SetId;
use serde::{Deserialize, Serialize};

/// One line of a stock check request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockCheckItem {
    pub set_id: SetId,
    pub quantity: i64,
}

/// Body sent to the stock validation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockCheckRequest {
    pub items: Vec<StockCheckItem>,
}

impl StockCheckRequest {
    /// Build a request covering every line in the cart.
    pub fn from_cart(cart: &CartStore) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| StockCheckItem {
                    set_id: line.set_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// A part that does not have enough stock for the requested kits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsufficientPart {
    pub part_name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    pub required: i64,
    pub available: i64,
}

impl InsufficientPart {
    /// How many units are missing.
    pub fn shortfall(&self) -> i64 {
        (self.required - self.available).max(0)
    }
}

/// Backend verdict for one cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockValidationResult {
    pub set_id: SetId,
    #[serde(default)]
    pub set_name: Option<String>,
    pub valid: bool,
    #[serde(default = "default_true")]
    pub parts_configured: bool,
    #[serde(default)]
    pub insufficient_parts: Vec<InsufficientPart>,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Response of the stock validation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockValidationReport {
    pub valid: bool,
    #[serde(default)]
    pub results: Vec<StockValidationResult>,
}

impl StockValidationReport {
    /// Whether every line can be fulfilled.
    ///
    /// A report is only trusted if both the overall flag and each line agree.
    pub fn all_valid(&self) -> bool {
        self.valid && self.results.iter().all(|r| r.valid)
    }

    /// Lines that block checkout.
    pub fn failures(&self) -> impl Iterator<Item = &StockValidationResult> {
        self.results.iter().filter(|r| !r.valid)
    }

    /// Multi-line message naming each offending kit and its short parts.
    ///
    /// Kit names come from the backend result, then from the cart, then fall
    /// back to the set ID. Returns `None` when nothing blocks checkout.
    pub fn blocking_message(&self, cart: &CartStore) -> Option<String> {
        if self.all_valid() {
            return None;
        }

        let mut lines = vec!["Some kits cannot be fulfilled from current stock:".to_string()];
        for result in self.failures() {
            let name = result
                .set_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .or_else(|| cart.get(result.set_id).map(|l| l.label()))
                .unwrap_or_else(|| format!("Set #{}", result.set_id));

            if let Some(error) = &result.error {
                lines.push(format!("{name}: {error}"));
            } else if !result.parts_configured {
                lines.push(format!("{name}: parts not configured"));
            } else if result.insufficient_parts.is_empty() {
                lines.push(format!("{name}: not available"));
            } else {
                lines.push(format!("{name}:"));
                for part in &result.insufficient_parts {
                    let label = match &part.part_number {
                        Some(number) if !number.is_empty() => {
                            format!("{} ({})", part.part_name, number)
                        }
                        _ => part.part_name.clone(),
                    };
                    lines.push(format!(
                        "  - {label}: need {}, have {}",
                        part.required, part.available
                    ));
                }
            }
        }

        if self.failures().next().is_none() {
            // The overall flag was false without naming a line.
            lines.push("Stock check reported a problem with this order.".to_string());
        }

        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::KitMetadata;

    fn cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(30.0), KitMetadata::named("Line Follower"));
        cart.add_or_increment(SetId::new(2), Some(12.0), KitMetadata::named("Solar Car"));
        cart.set_quantity(SetId::new(2), 4);
        cart
    }

    #[test]
    fn test_request_from_cart() {
        let request = StockCheckRequest::from_cart(&cart());
        assert_eq!(
            request.items,
            vec![
                StockCheckItem {
                    set_id: SetId::new(1),
                    quantity: 1
                },
                StockCheckItem {
                    set_id: SetId::new(2),
                    quantity: 4
                },
            ]
        );
    }

    #[test]
    fn test_parse_backend_report() {
        let json = r#"{
            "valid": false,
            "results": [
                {"set_id": 1, "valid": true, "parts_configured": true, "insufficient_parts": []},
                {"set_id": 2, "valid": false, "parts_configured": true,
                 "insufficient_parts": [
                    {"part_name": "Resistor", "part_number": "R1", "required": 10, "available": 3}
                 ]}
            ]
        }"#;
        let report: StockValidationReport = serde_json::from_str(json).unwrap();
        assert!(!report.all_valid());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.results[1].insufficient_parts[0].shortfall(), 7);
    }

    #[test]
    fn test_blocking_message_names_kit_and_parts() {
        let report = StockValidationReport {
            valid: false,
            results: vec![StockValidationResult {
                set_id: SetId::new(2),
                set_name: None,
                valid: false,
                parts_configured: true,
                insufficient_parts: vec![InsufficientPart {
                    part_name: "Resistor".to_string(),
                    part_number: Some("R1".to_string()),
                    required: 10,
                    available: 3,
                }],
                error: None,
            }],
        };

        let message = report.blocking_message(&cart()).unwrap();
        assert!(message.contains("Solar Car"));
        assert!(message.contains("Resistor (R1): need 10, have 3"));
    }

    #[test]
    fn test_blocking_message_other_reasons() {
        let report = StockValidationReport {
            valid: false,
            results: vec![
                StockValidationResult {
                    set_id: SetId::new(1),
                    set_name: Some("Backend Name".to_string()),
                    valid: false,
                    parts_configured: false,
                    insufficient_parts: vec![],
                    error: None,
                },
                StockValidationResult {
                    set_id: SetId::new(99),
                    set_name: None,
                    valid: false,
                    parts_configured: true,
                    insufficient_parts: vec![],
                    error: Some("Set not found".to_string()),
                },
            ],
        };

        let message = report.blocking_message(&cart()).unwrap();
        assert!(message.contains("Backend Name: parts not configured"));
        assert!(message.contains("Set #99: Set not found"));
    }

    #[test]
    fn test_valid_report_has_no_message() {
        let report = StockValidationReport {
            valid: true,
            results: vec![],
        };
        assert!(report.blocking_message(&cart()).is_none());
    }

    #[test]
    fn test_overall_flag_without_failing_line() {
        let report = StockValidationReport {
            valid: false,
            results: vec![],
        };
        let message = report.blocking_message(&cart()).unwrap();
        assert!(message.contains("reported a problem"));
    }
}
