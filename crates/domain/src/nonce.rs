use crate::shared::entity::ID;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// What a nonce authorizes. Each action signs a different message so a
/// nonce handed out for one purpose can not be replayed for another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonceAction {
    /// Unsubscribing the given email address
    Unsubscribe(String),
    /// Choosing the reminder delay for the given order
    SaveReminderDays(ID),
}

impl NonceAction {
    fn message(&self) -> String {
        match self {
            Self::Unsubscribe(email) => format!("wrr_unsubscribe_{}", email),
            Self::SaveReminderDays(order_id) => format!("wrr_save_reminder_days_{}", order_id),
        }
    }
}

/// Issues and verifies anti-forgery tokens bound to a `NonceAction`
#[derive(Clone)]
pub struct NonceIssuer {
    secret: String,
}

impl std::fmt::Debug for NonceIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceIssuer").finish_non_exhaustive()
    }
}

impl NonceIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC can take key of any size")
    }

    pub fn create(&self, action: &NonceAction) -> String {
        let mut mac = self.mac();
        mac.update(action.message().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    pub fn verify(&self, action: &NonceAction, nonce: &str) -> bool {
        let signature = match hex::decode(nonce.trim()) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        let mut mac = self.mac();
        mac.update(action.message().as_bytes());
        mac.verify_slice(&signature).is_ok()
    }
}
