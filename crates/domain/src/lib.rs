mod audit_log;
mod delay;
mod nonce;
mod order;
mod product;
mod reminder;
mod settings;
mod shared;

pub use audit_log::{AuditLogEntry, InvalidReminderStatusError, ReminderStatus, SortOrder};
pub use delay::{due_at, is_due, resolve_delay, validate_delay_days, DAY_MILLIS};
pub use nonce::{NonceAction, NonceIssuer};
pub use order::{InvalidOrderStatusError, LineItem, Order, OrderStatus};
pub use product::{is_product_reminder_enabled, Product, ProductReminderConfig, ReminderToggle};
pub use reminder::{reorder_link, unsubscribe_link, ReminderDetails, ReminderRecord};
pub use settings::{GlobalSettings, DEFAULT_DELAY_DAYS};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::error::{is_valid_email, DomainError};
