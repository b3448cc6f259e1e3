//! HTTP surface of the dashboard

pub mod handlers;
