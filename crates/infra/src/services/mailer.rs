use reorder_reminder_domain::{ReminderDetails, ID};
use reqwest::Client;
use serde::Serialize;
use std::{sync::Mutex, time::Duration};
use tracing::{error, info};
use url::Url;

/// Delivers a rendered reminder to its recipient
#[async_trait::async_trait]
pub trait IReminderMailer: Send + Sync {
    async fn send(&self, details: &ReminderDetails) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderEmailPayload<'a> {
    to: &'a str,
    subject: String,
    heading: String,
    text: String,
    order_id: Option<ID>,
    product_id: ID,
    reorder_link: &'a str,
    unsubscribe_link: &'a str,
}

impl<'a> From<&'a ReminderDetails> for ReminderEmailPayload<'a> {
    fn from(details: &'a ReminderDetails) -> Self {
        Self {
            to: &details.recipient,
            subject: details.subject(),
            heading: details.heading(),
            text: details.body_text(),
            order_id: details.order_id,
            product_id: details.product_id,
            reorder_link: &details.reorder_link,
            unsubscribe_link: &details.unsubscribe_link,
        }
    }
}

/// Hands reminders over to an email delivery webhook
pub struct WebhookMailer {
    client: Client,
    url: Url,
    key: Option<String>,
}

impl WebhookMailer {
    /// Requests taking longer than `timeout` are aborted and count as failed deliveries
    pub fn new(url: Url, key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url, key })
    }
}

#[async_trait::async_trait]
impl IReminderMailer for WebhookMailer {
    async fn send(&self, details: &ReminderDetails) -> anyhow::Result<()> {
        let mut request = self
            .client
            .post(self.url.clone())
            .json(&ReminderEmailPayload::from(details));
        if let Some(key) = &self.key {
            request = request.bearer_auth(key);
        }
        request
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| {
                error!(
                    "Reminder webhook rejected reminder for product: {} to: {}. Error: {:?}",
                    details.product_id, details.recipient, e
                );
                e
            })?;
        Ok(())
    }
}

/// Only writes reminders to the log, used when no delivery webhook is configured
pub struct LogMailer {}

#[async_trait::async_trait]
impl IReminderMailer for LogMailer {
    async fn send(&self, details: &ReminderDetails) -> anyhow::Result<()> {
        info!(
            recipient = %details.recipient,
            product_id = %details.product_id,
            subject = %details.subject(),
            "Reminder email:\n{}",
            details.body_text()
        );
        Ok(())
    }
}

/// Keeps delivered reminders in memory and can be told to fail
/// deliveries of specific products
pub struct InMemoryMailer {
    sent: Mutex<Vec<ReminderDetails>>,
    failing_products: Mutex<Vec<ID>>,
    latency: Mutex<Option<Duration>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_products: Mutex::new(Vec::new()),
            latency: Mutex::new(None),
        }
    }

    pub fn sent(&self) -> Vec<ReminderDetails> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_for_product(&self, product_id: ID) {
        self.failing_products.lock().unwrap().push(product_id);
    }

    /// Every following delivery takes at least `latency` before it completes
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock().unwrap() = latency;
    }

    pub fn recover_product(&self, product_id: &ID) {
        self.failing_products
            .lock()
            .unwrap()
            .retain(|id| id != product_id);
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderMailer for InMemoryMailer {
    async fn send(&self, details: &ReminderDetails) -> anyhow::Result<()> {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self
            .failing_products
            .lock()
            .unwrap()
            .contains(&details.product_id)
        {
            anyhow::bail!("Delivery of product: {} is set to fail", details.product_id);
        }
        self.sent.lock().unwrap().push(details.clone());
        Ok(())
    }
}
