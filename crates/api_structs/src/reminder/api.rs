use crate::dtos::SweepReportDTO;
use reorder_reminder_domain::ID;
use serde::{Deserialize, Serialize};

pub mod run_sweep {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub report: SweepReportDTO,
    }
}

pub mod send_test_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        /// The first product of the catalog is used when not given
        #[serde(default)]
        pub product_id: Option<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub recipient: String,
        pub product_id: ID,
        pub subject: String,
    }
}

pub mod get_reminder_selector {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub order_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        /// Order access key for buyers that are not logged in
        #[serde(default)]
        pub key: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub order_id: ID,
        /// Whether the selector should be shown at all
        pub show: bool,
        pub day_options: Vec<i64>,
        pub selected_days: i64,
        pub nonce: String,
    }
}

pub mod save_reminder_days {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub order_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub days: i64,
        pub nonce: String,
        #[serde(default)]
        pub order_key: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub order_id: ID,
        pub days: i64,
        pub message: String,
    }
}
