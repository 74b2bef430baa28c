//! 聚合：快递员（含存储位）与订单
//!
pub mod courier;
pub mod order;
