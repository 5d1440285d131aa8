//! Checkout form data and its saved copy.

use makerset_store::{KvStore, KvStoreExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::CommerceError;

/// Storage key of the saved checkout form.
pub const CUSTOMER_INFO_KEY: &str = "makerset_customer_info";

/// Customer details entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerInfo {
    pub company_name: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub notes: String,
}

impl CustomerInfo {
    /// Names of required fields that are blank or malformed.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        let required = [
            ("customer_first_name", &self.customer_first_name),
            ("customer_last_name", &self.customer_last_name),
            ("customer_email", &self.customer_email),
            ("shipping_address", &self.shipping_address),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(name.to_string());
            }
        }

        let email = self.customer_email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            missing.push("customer_email (invalid format)".to_string());
        }
        missing
    }

    /// Check required fields before anything is sent to the backend.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(missing))
        }
    }

    /// Full name for display.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.customer_first_name.trim(),
            self.customer_last_name.trim()
        )
        .trim()
        .to_string()
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Persist the form for the next checkout.
pub fn save_customer_info(
    store: &dyn KvStore,
    info: &CustomerInfo,
) -> Result<(), CommerceError> {
    store.set_json(CUSTOMER_INFO_KEY, info)?;
    debug!("saved customer info");
    Ok(())
}

/// Load the saved form, if any.
///
/// Unreadable data is treated as absent.
pub fn load_customer_info(store: &dyn KvStore) -> Result<Option<CustomerInfo>, CommerceError> {
    match store.get_json::<CustomerInfo>(CUSTOMER_INFO_KEY) {
        Ok(info) => Ok(info),
        Err(makerset_store::StoreError::SerializeError(e)) => {
            warn!(error = %e, "discarding unreadable saved customer info");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Forget the saved form.
pub fn clear_customer_info(store: &dyn KvStore) -> Result<(), CommerceError> {
    store.delete(CUSTOMER_INFO_KEY)?;
    debug!("cleared saved customer info");
    Ok(())
}
