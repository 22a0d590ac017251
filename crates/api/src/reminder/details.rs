use reorder_reminder_domain::{
    reorder_link, unsubscribe_link, NonceAction, Product, ReminderDetails, ID,
};
use reorder_reminder_infra::ReorderContext;

/// Renders the reminder of `product` for `recipient`, including a
/// signed unsubscribe link for the address
pub fn build_reminder_details(
    ctx: &ReorderContext,
    recipient: &str,
    first_name: Option<&str>,
    order_id: Option<ID>,
    product: &Product,
) -> ReminderDetails {
    let nonce = ctx
        .nonces
        .create(&NonceAction::Unsubscribe(recipient.to_string()));
    ReminderDetails {
        recipient: recipient.to_string(),
        customer_name: ReminderDetails::customer_name(first_name),
        order_id,
        product_id: product.id,
        product_name: product.name.clone(),
        reorder_link: reorder_link(&ctx.config.store_url, &product.id),
        unsubscribe_link: unsubscribe_link(&ctx.config.public_url, recipient, &nonce),
    }
}
