#![doc(test(attr(deny(warnings))))]

//! Installment Core tracks purchases paid in monthly installments and derives
//! what is due each month, how debt splits across categories, and how the
//! monthly load evolves over the coming year.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Installment Core tracing initialized.");
    });
}
