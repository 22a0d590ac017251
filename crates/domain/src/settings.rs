use crate::delay::validate_delay_days;
use crate::shared::error::DomainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELAY_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    pub reminder_enabled: bool,
    pub default_delay_days: i64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            reminder_enabled: true,
            default_delay_days: DEFAULT_DELAY_DAYS,
        }
    }
}

impl GlobalSettings {
    pub fn set_default_delay_days(&mut self, days: i64) -> Result<(), DomainError> {
        self.default_delay_days = validate_delay_days(days)?;
        Ok(())
    }
}
