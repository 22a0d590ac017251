use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ID,
    pub name: String,
}

impl Entity<ID> for Product {
    fn id(&self) -> ID {
        self.id
    }
}

/// Tri-state switch for reminders on a single `Product`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderToggle {
    Yes,
    No,
    /// Nothing configured, the product follows the global setting
    Unset,
}

impl Default for ReminderToggle {
    fn default() -> Self {
        Self::Unset
    }
}

impl ReminderToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unset => "unset",
        }
    }

    pub fn from_db(value: Option<&str>) -> Self {
        match value {
            Some("yes") => Self::Yes,
            Some("no") => Self::No,
            _ => Self::Unset,
        }
    }
}

/// Reminder configuration attached to a `Product`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductReminderConfig {
    pub product_id: ID,
    pub enabled: ReminderToggle,
    /// Overrides the global delay for this product when set
    pub delay_days: Option<i64>,
}

impl ProductReminderConfig {
    pub fn new(product_id: ID) -> Self {
        Self {
            product_id,
            enabled: ReminderToggle::Unset,
            delay_days: None,
        }
    }

    /// Only an explicit "no" turns reminders off for a product
    pub fn is_reminder_enabled(&self) -> bool {
        self.enabled != ReminderToggle::No
    }

    /// Sets the delay override. Empty or zero clears it.
    pub fn set_delay_days(&mut self, delay_days: Option<i64>) {
        self.delay_days = delay_days.filter(|days| *days > 0);
    }
}

impl Entity<ID> for ProductReminderConfig {
    fn id(&self) -> ID {
        self.product_id
    }
}

/// Absence of configuration means the product is enabled
pub fn is_product_reminder_enabled(config: Option<&ProductReminderConfig>) -> bool {
    config.map(|c| c.is_reminder_enabled()).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_no_disables_reminders() {
        let mut config = ProductReminderConfig::new(ID::new(7));
        assert!(is_product_reminder_enabled(Some(&config)));
        config.enabled = ReminderToggle::Yes;
        assert!(is_product_reminder_enabled(Some(&config)));
        config.enabled = ReminderToggle::No;
        assert!(!is_product_reminder_enabled(Some(&config)));
        assert!(is_product_reminder_enabled(None));
    }

    #[test]
    fn zero_delay_clears_the_override() {
        let mut config = ProductReminderConfig::new(ID::new(7));
        config.set_delay_days(Some(45));
        assert_eq!(config.delay_days, Some(45));
        config.set_delay_days(Some(0));
        assert_eq!(config.delay_days, None);
        config.set_delay_days(Some(45));
        config.set_delay_days(None);
        assert_eq!(config.delay_days, None);
    }

    #[test]
    fn toggle_from_db() {
        assert_eq!(ReminderToggle::from_db(Some("yes")), ReminderToggle::Yes);
        assert_eq!(ReminderToggle::from_db(Some("no")), ReminderToggle::No);
        assert_eq!(ReminderToggle::from_db(Some("")), ReminderToggle::Unset);
        assert_eq!(ReminderToggle::from_db(None), ReminderToggle::Unset);
    }
}
