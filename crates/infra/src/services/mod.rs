mod mailer;

pub use mailer::{IReminderMailer, InMemoryMailer, LogMailer, WebhookMailer};
