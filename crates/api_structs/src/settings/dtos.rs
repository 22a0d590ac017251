use reorder_reminder_domain::GlobalSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsDTO {
    pub reminder_enabled: bool,
    pub default_delay_days: i64,
}

impl GlobalSettingsDTO {
    pub fn new(settings: &GlobalSettings) -> Self {
        Self {
            reminder_enabled: settings.reminder_enabled,
            default_delay_days: settings.default_delay_days,
        }
    }
}
