//! Domain models for the admin service.

mod goods;
mod quote;
mod settings;
pub mod value;

pub use goods::{GoodsEntry, GoodsItem, GoodsPage};
pub use quote::Quote;
pub use settings::{ApiSettings, SECRET_MASK, SettingsPatch};

#[cfg(test)]
mod tests;
