mod audit_log;
mod base;
mod opt_out;
mod order;
mod product;
mod reminder;
mod settings;
mod shared;
mod status;

use audit_log::AuditLogClient;
pub use audit_log::GetLogsInput;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use opt_out::OptOutClient;
pub use opt_out::UnsubscribeInput;
use order::OrderClient;
pub use order::UpsertOrderInput;
use product::ProductClient;
pub use product::{SetProductReminderInput, UpsertProductInput};
use reminder::ReminderClient;
pub use reminder::{GetReminderSelectorInput, SaveReminderDaysInput, SendTestReminderInput};
pub use reorder_reminder_api_structs::dtos::*;
pub use reorder_reminder_domain::{OrderStatus, ReminderStatus, ReminderToggle, SortOrder, ID};
use settings::SettingsClient;
pub use settings::UpdateSettingsInput;
use status::StatusClient;
use std::sync::Arc;

/// Reorder Reminder Server SDK
///
/// The SDK contains methods for interacting with the reorder reminder
/// server API.
#[derive(Clone)]
pub struct ReorderSDK {
    pub audit_log: AuditLogClient,
    pub opt_out: OptOutClient,
    pub order: OrderClient,
    pub product: ProductClient,
    pub reminder: ReminderClient,
    pub settings: SettingsClient,
    pub status: StatusClient,
}

impl ReorderSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::create(base)
    }

    /// Client without admin credentials, as used from the storefront
    pub fn new_public(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let audit_log = AuditLogClient::new(base.clone());
        let opt_out = OptOutClient::new(base.clone());
        let order = OrderClient::new(base.clone());
        let product = ProductClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let settings = SettingsClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            audit_log,
            opt_out,
            order,
            product,
            reminder,
            settings,
            status,
        }
    }
}
