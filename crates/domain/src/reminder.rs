use crate::shared::entity::ID;
use url::Url;

/// Eligibility state of one (order, product) pair. A `ReminderRecord` exists
/// only for line items that qualified for a reminder when the order completed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub order_id: ID,
    pub product_id: ID,
    /// Billing email captured when the order completed
    pub email: String,
    /// Set once when the record is created and never changed afterwards
    pub completed_at: i64,
    /// Delay chosen by the customer for the whole order
    pub customer_delay_days: Option<i64>,
    pub sent: bool,
    pub sent_at: Option<i64>,
}

impl ReminderRecord {
    pub fn new(order_id: ID, product_id: ID, email: &str, completed_at: i64) -> Self {
        Self {
            order_id,
            product_id,
            email: email.to_string(),
            completed_at,
            customer_delay_days: None,
            sent: false,
            sent_at: None,
        }
    }

    pub fn key(&self) -> (ID, ID) {
        (self.order_id, self.product_id)
    }

    /// Flips the record to sent. Returns false and leaves the record
    /// untouched when it was already sent.
    pub fn mark_sent(&mut self, at: i64) -> bool {
        if self.sent {
            return false;
        }
        self.sent = true;
        self.sent_at = Some(at);
        true
    }
}

/// Everything the mailer needs to render and deliver a reminder
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDetails {
    pub recipient: String,
    pub customer_name: String,
    /// `None` for test reminders that are not tied to an order
    pub order_id: Option<ID>,
    pub product_id: ID,
    pub product_name: String,
    pub reorder_link: String,
    pub unsubscribe_link: String,
}

impl ReminderDetails {
    pub const FALLBACK_CUSTOMER_NAME: &'static str = "Customer";

    pub fn customer_name(first_name: Option<&str>) -> String {
        first_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::FALLBACK_CUSTOMER_NAME)
            .to_string()
    }

    pub fn subject(&self) -> String {
        format!("Time to reorder {}!", self.product_name)
    }

    pub fn heading(&self) -> String {
        format!("Don't forget to reorder {}", self.product_name)
    }

    pub fn body_text(&self) -> String {
        format!(
            "= {} =\n\n\
             Hi {},\n\n\
             It's been a while since you last purchased {}. We wanted to remind you to reorder if you need it again.\n\n\
             Re-Order Now:\n{}\n\n\
             If you no longer wish to receive these reminders, you can unsubscribe here:\n{}\n",
            self.heading(),
            self.customer_name,
            self.product_name,
            self.reorder_link,
            self.unsubscribe_link
        )
    }
}

fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(&format!("{}{}", base.path().trim_end_matches('/'), path));
    url.set_query(None);
    url
}

/// Link that puts the product straight into the store's cart
pub fn reorder_link(store_url: &Url, product_id: &ID) -> String {
    let mut url = with_path(store_url, "/cart/");
    url.query_pairs_mut()
        .append_pair("add-to-cart", &product_id.as_string());
    url.to_string()
}

/// Link to the public unsubscribe route of this service
pub fn unsubscribe_link(public_url: &Url, email: &str, nonce: &str) -> String {
    let mut url = with_path(public_url, "/api/v1/unsubscribe");
    url.query_pairs_mut()
        .append_pair("email", email)
        .append_pair("nonce", nonce);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_sent_transitions_only_once() {
        let mut record = ReminderRecord::new(ID::new(100), ID::new(7), "a@x.com", 0);
        assert!(record.mark_sent(10));
        assert!(record.sent);
        assert_eq!(record.sent_at, Some(10));
        assert!(!record.mark_sent(20));
        assert_eq!(record.sent_at, Some(10));
    }

    #[test]
    fn builds_links() {
        let store_url = Url::parse("https://shop.example.com/").unwrap();
        assert_eq!(
            reorder_link(&store_url, &ID::new(7)),
            "https://shop.example.com/cart/?add-to-cart=7"
        );
        let store_url = Url::parse("https://example.com/shop").unwrap();
        assert_eq!(
            reorder_link(&store_url, &ID::new(7)),
            "https://example.com/shop/cart/?add-to-cart=7"
        );

        let public_url = Url::parse("http://localhost:5000").unwrap();
        assert_eq!(
            unsubscribe_link(&public_url, "a+b@x.com", "abc"),
            "http://localhost:5000/api/v1/unsubscribe?email=a%2Bb%40x.com&nonce=abc"
        );
    }

    #[test]
    fn renders_content() {
        let details = ReminderDetails {
            recipient: "a@x.com".into(),
            customer_name: ReminderDetails::customer_name(Some(" ")),
            order_id: Some(ID::new(100)),
            product_id: ID::new(7),
            product_name: "Coffee Beans".into(),
            reorder_link: "https://shop.example.com/cart/?add-to-cart=7".into(),
            unsubscribe_link: "http://localhost:5000/api/v1/unsubscribe".into(),
        };
        assert_eq!(details.customer_name, "Customer");
        assert_eq!(details.subject(), "Time to reorder Coffee Beans!");
        assert_eq!(details.heading(), "Don't forget to reorder Coffee Beans");
        let body = details.body_text();
        assert!(body.starts_with("= Don't forget to reorder Coffee Beans =\n\nHi Customer,"));
        assert!(body.contains("https://shop.example.com/cart/?add-to-cart=7"));
        assert!(body.contains("http://localhost:5000/api/v1/unsubscribe"));
        assert_eq!(ReminderDetails::customer_name(Some("Ada")), "Ada");
    }
}
