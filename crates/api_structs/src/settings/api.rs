use crate::dtos::GlobalSettingsDTO;
use reorder_reminder_domain::GlobalSettings;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsResponse {
    pub settings: GlobalSettingsDTO,
}

impl GlobalSettingsResponse {
    pub fn new(settings: GlobalSettings) -> Self {
        Self {
            settings: GlobalSettingsDTO::new(&settings),
        }
    }
}

pub mod get_settings {
    use super::*;

    pub type APIResponse = GlobalSettingsResponse;
}

pub mod update_settings {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub reminder_enabled: Option<bool>,
        #[serde(default)]
        pub default_delay_days: Option<i64>,
    }

    pub type APIResponse = GlobalSettingsResponse;
}
