use super::{ISettingsRepo, GLOBAL_SETTINGS_KEY};
use reorder_reminder_domain::GlobalSettings;
use serde_json::Value;
use std::{collections::HashMap, sync::Mutex};

pub struct InMemorySettingsRepo {
    values: Mutex<HashMap<String, Value>>,
}

impl InMemorySettingsRepo {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for InMemorySettingsRepo {
    async fn get(&self) -> anyhow::Result<GlobalSettings> {
        let value = self
            .values
            .lock()
            .unwrap()
            .get(GLOBAL_SETTINGS_KEY)
            .cloned();
        match value {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(GlobalSettings::default()),
        }
    }

    async fn save(&self, settings: &GlobalSettings) -> anyhow::Result<()> {
        let value = serde_json::to_value(settings)?;
        self.values
            .lock()
            .unwrap()
            .insert(GLOBAL_SETTINGS_KEY.to_string(), value);
        Ok(())
    }
}
