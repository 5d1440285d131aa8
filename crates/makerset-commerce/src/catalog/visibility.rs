//! Catalog visibility toggle for a kit.

use crate::ids::SetId;
use serde::{Deserialize, Serialize};

/// Body of `PUT /api/sets/{setId}/visibility`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisibilityUpdate {
    #[serde(rename = "setId")]
    pub set_id: SetId,
    pub visible: bool,
}

impl VisibilityUpdate {
    pub fn new(set_id: SetId, visible: bool) -> Self {
        Self { set_id, visible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(VisibilityUpdate::new(SetId::new(9), false)).unwrap();
        assert_eq!(value, serde_json::json!({"setId": 9, "visible": false}));
    }
}
