//! API handlers.

pub mod config;
pub mod coupon;
pub mod goods;
