use crate::{product::ProductReminderConfig, shared::error::DomainError};

pub const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Delay in days until a reminder is due, by precedence: the customer's
/// choice for the order, then the product override, then `global_default`.
/// Non positive overrides are ignored.
pub fn resolve_delay(
    customer_delay_days: Option<i64>,
    product_config: Option<&ProductReminderConfig>,
    global_default: i64,
) -> i64 {
    if let Some(days) = customer_delay_days.filter(|days| *days > 0) {
        return days;
    }
    if let Some(days) = product_config
        .and_then(|config| config.delay_days)
        .filter(|days| *days > 0)
    {
        return days;
    }
    global_default
}

pub fn due_at(completed_at: i64, delay_days: i64) -> i64 {
    completed_at + delay_days * DAY_MILLIS
}

/// A reminder is due from the exact millisecond `delay_days` have elapsed
pub fn is_due(now: i64, completed_at: i64, delay_days: i64) -> bool {
    now >= due_at(completed_at, delay_days)
}

pub fn validate_delay_days(days: i64) -> Result<i64, DomainError> {
    if days < 1 {
        return Err(DomainError::InvalidDelayDays(days));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{product::ReminderToggle, shared::entity::ID};

    fn product_config(delay_days: Option<i64>) -> ProductReminderConfig {
        ProductReminderConfig {
            product_id: ID::new(7),
            enabled: ReminderToggle::Unset,
            delay_days,
        }
    }

    #[test]
    fn product_override_beats_global_default() {
        let config = product_config(Some(45));
        assert_eq!(resolve_delay(None, Some(&config), 30), 45);
    }

    #[test]
    fn customer_override_beats_everything() {
        let config = product_config(Some(45));
        assert_eq!(resolve_delay(Some(10), Some(&config), 30), 10);
        assert_eq!(resolve_delay(Some(10), None, 30), 10);
    }

    #[test]
    fn falls_back_to_global_default() {
        assert_eq!(resolve_delay(None, None, 30), 30);
        assert_eq!(resolve_delay(None, Some(&product_config(None)), 30), 30);
        assert_eq!(resolve_delay(Some(0), Some(&product_config(Some(0))), 30), 30);
        assert_eq!(resolve_delay(Some(-3), None, 30), 30);
    }

    #[test]
    fn due_boundary_is_inclusive() {
        let completed_at = 1_704_067_200_000; // 2024-01-01T00:00:00Z
        let hour = 1000 * 60 * 60;
        assert!(!is_due(completed_at + 29 * DAY_MILLIS + 23 * hour, completed_at, 30));
        assert!(!is_due(completed_at + 30 * DAY_MILLIS - 1, completed_at, 30));
        assert!(is_due(completed_at + 30 * DAY_MILLIS, completed_at, 30));
        assert!(is_due(completed_at + 31 * DAY_MILLIS, completed_at, 30));
    }

    #[test]
    fn delay_days_must_be_positive() {
        assert_eq!(validate_delay_days(1), Ok(1));
        assert_eq!(validate_delay_days(90), Ok(90));
        assert_eq!(validate_delay_days(0), Err(DomainError::InvalidDelayDays(0)));
        assert_eq!(validate_delay_days(-5), Err(DomainError::InvalidDelayDays(-5)));
    }
}
