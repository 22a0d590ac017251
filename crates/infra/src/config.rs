use reorder_reminder_utils::create_random_secret;
use tracing::{info, warn};
use url::Url;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_STORE_URL: &str = "http://localhost";
const DEFAULT_REMINDER_DAY_OPTIONS: [i64; 5] = [15, 30, 45, 60, 90];

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Key that has to be given in the `x-api-key` header of admin requests
    pub admin_api_key: String,
    /// Secret used to sign unsubscribe and reminder preference nonces
    pub nonce_secret: String,
    /// Secret used to verify the HS256 tokens of store customers
    pub customer_jwt_secret: String,
    /// Base url of the store, used for building reorder links
    pub store_url: Url,
    /// Url this service is reachable at, used for building unsubscribe links
    pub public_url: Url,
    /// Reminders are POSTed to this url when set, otherwise they are only logged
    pub reminder_webhook_url: Option<Url>,
    pub reminder_webhook_key: Option<String>,
    /// Day counts a customer can choose from on the thank you page
    pub reminder_day_options: Vec<i64>,
    pub sweep_interval_secs: u64,
    /// How long a sweep may hold a reminder before another sweep can take it over
    pub claim_lease_millis: i64,
    /// Deliveries running longer than this count as failed. Always shorter
    /// than the claim lease, so a lease never runs out during a delivery.
    pub delivery_timeout_millis: i64,
}

fn secret_from_env(name: &str, description: &str) -> String {
    match std::env::var(name) {
        Ok(secret) => secret,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                name
            );
            let secret = create_random_secret(16);
            info!("{} was generated and set to: {}", description, secret);
            secret
        }
    }
}

fn url_from_env(name: &str, default: &str) -> Url {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    match Url::parse(&value) {
        Ok(url) => url,
        Err(_) => {
            warn!(
                "The given {}: {} is not a valid url, falling back to: {}.",
                name, value, default
            );
            Url::parse(default).expect("Default urls to be valid")
        }
    }
}

fn number_from_env<T: std::str::FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(number) => number,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

/// Parses a comma separated list of day counts, skipping non positive
/// and malformed entries
pub fn parse_day_options(value: &str) -> Vec<i64> {
    let mut options = value
        .split(',')
        .filter_map(|day| day.trim().parse::<i64>().ok())
        .filter(|day| *day > 0)
        .collect::<Vec<_>>();
    options.sort_unstable();
    options.dedup();
    options
}

/// Caps the requested delivery timeout at half of the claim lease
pub fn bounded_delivery_timeout(requested_millis: i64, claim_lease_millis: i64) -> i64 {
    let max = (claim_lease_millis / 2).max(1);
    if requested_millis > max || requested_millis < 1 {
        warn!(
            "Delivery timeout of {} ms does not fit in the claim lease of {} ms, using {} ms.",
            requested_millis, claim_lease_millis, max
        );
        return max;
    }
    requested_millis
}

impl Config {
    pub fn new() -> Self {
        let port = number_from_env("PORT", DEFAULT_PORT);
        let admin_api_key = secret_from_env("ADMIN_API_KEY", "Admin api key");
        let nonce_secret = secret_from_env("NONCE_SECRET", "Nonce secret");
        let customer_jwt_secret = secret_from_env("CUSTOMER_JWT_SECRET", "Customer jwt secret");
        let store_url = url_from_env("STORE_URL", DEFAULT_STORE_URL);
        let public_url = url_from_env("PUBLIC_URL", &format!("http://localhost:{}", port));

        let reminder_webhook_url = match std::env::var("REMINDER_WEBHOOK_URL") {
            Ok(value) => match Url::parse(&value) {
                Ok(url) => Some(url),
                Err(_) => {
                    warn!(
                        "The given REMINDER_WEBHOOK_URL: {} is not a valid url, reminders will only be logged.",
                        value
                    );
                    None
                }
            },
            Err(_) => None,
        };
        let reminder_webhook_key = std::env::var("REMINDER_WEBHOOK_KEY").ok();

        let reminder_day_options = match std::env::var("REMINDER_DAY_OPTIONS") {
            Ok(value) => {
                let options = parse_day_options(&value);
                if options.is_empty() {
                    warn!(
                        "The given REMINDER_DAY_OPTIONS: {} has no valid day counts, falling back to the defaults.",
                        value
                    );
                    DEFAULT_REMINDER_DAY_OPTIONS.to_vec()
                } else {
                    options
                }
            }
            Err(_) => DEFAULT_REMINDER_DAY_OPTIONS.to_vec(),
        };

        let claim_lease_millis =
            number_from_env::<i64>("REMINDER_CLAIM_LEASE_SECS", 15 * 60) * 1000;
        let delivery_timeout_millis = bounded_delivery_timeout(
            number_from_env::<i64>("REMINDER_DELIVERY_TIMEOUT_SECS", 30) * 1000,
            claim_lease_millis,
        );

        Self {
            port,
            admin_api_key,
            nonce_secret,
            customer_jwt_secret,
            store_url,
            public_url,
            reminder_webhook_url,
            reminder_webhook_key,
            reminder_day_options,
            sweep_interval_secs: number_from_env("SWEEP_INTERVAL_SECS", 60 * 60 * 24),
            claim_lease_millis,
            delivery_timeout_millis,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
