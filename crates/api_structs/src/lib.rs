mod audit_log;
mod opt_out;
mod order;
mod product;
mod reminder;
mod settings;
mod status;

pub mod dtos {
    pub use crate::audit_log::dtos::*;
    pub use crate::order::dtos::*;
    pub use crate::product::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::settings::dtos::*;
}

pub use crate::audit_log::api::*;
pub use crate::opt_out::api::*;
pub use crate::order::api::*;
pub use crate::product::api::*;
pub use crate::reminder::api::*;
pub use crate::settings::api::*;
pub use crate::status::api::*;
