use reorder_reminder_sdk::{
    AuditLogEntryDTO, GetLogsInput, LineItemDTO, OrderStatus, ReorderSDK, UpsertOrderInput,
    UpsertProductInput, ID,
};

/// 2024-01-01T00:00:00Z, long enough ago for every default delay to have passed
pub const JAN_1_2024: i64 = 1_704_067_200_000;

/// Ids that do not collide between tests sharing a database
pub fn random_id() -> ID {
    ID::new(rand::random::<u32>() as i64)
}

pub async fn create_product(sdk: &ReorderSDK) -> ID {
    let product_id = random_id();
    sdk.product
        .upsert(UpsertProductInput {
            product_id,
            name: format!("Product {}", product_id),
        })
        .await
        .expect("Expected to upsert product");
    product_id
}

pub fn completed_order_input(order_id: ID, product_id: ID, email: &str) -> UpsertOrderInput {
    UpsertOrderInput {
        order_id,
        customer_id: Some(ID::new(5)),
        order_key: format!("wc_order_{}", order_id),
        status: OrderStatus::Completed,
        billing_email: Some(email.into()),
        billing_first_name: Some("Ada".into()),
        completed_at: Some(JAN_1_2024),
        line_items: vec![LineItemDTO {
            product_id: Some(product_id),
            quantity: 1,
        }],
    }
}

pub async fn logs_of_order(sdk: &ReorderSDK, order_id: ID) -> Vec<AuditLogEntryDTO> {
    sdk.audit_log
        .get(GetLogsInput {
            limit: Some(500),
            ..Default::default()
        })
        .await
        .expect("Expected to list logs")
        .logs
        .into_iter()
        .filter(|log| log.order_id == order_id)
        .collect()
}
