use super::IOptOutRepo;
use std::{collections::HashMap, sync::Mutex};

pub struct InMemoryOptOutRepo {
    /// Email to the time it was opted out
    emails: Mutex<HashMap<String, i64>>,
}

impl InMemoryOptOutRepo {
    pub fn new() -> Self {
        Self {
            emails: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IOptOutRepo for InMemoryOptOutRepo {
    async fn is_opted_out(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.emails.lock().unwrap().contains_key(email))
    }

    async fn opt_out(&self, email: &str, at: i64) -> anyhow::Result<bool> {
        let mut emails = self.emails.lock().unwrap();
        if emails.contains_key(email) {
            return Ok(false);
        }
        emails.insert(email.to_string(), at);
        Ok(true)
    }
}
