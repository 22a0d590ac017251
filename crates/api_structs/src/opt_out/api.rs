use serde::{Deserialize, Serialize};

pub mod unsubscribe {
    use super::*;

    /// Given as query parameters on the public route and as body on the admin route
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub nonce: String,
    }

    pub type QueryParams = RequestBody;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub email: String,
        pub message: String,
    }
}

pub mod get_unsubscribe_token {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub email: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub email: String,
        pub nonce: String,
        pub unsubscribe_link: String,
    }
}
