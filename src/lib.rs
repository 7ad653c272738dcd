//! Browser client for a household financial-control backend: accounts,
//! credit cards, categories, expenses, income, vehicle costs and financing.
//!
//! Pages live under [`ui`]; everything else is plain logic over records
//! fetched from the REST API and runs on the host as well as in the browser.

pub mod api;
pub mod calendar;
pub mod config;
pub mod consortium;
pub mod errors;
pub mod filters;
pub mod financing;
pub mod format;
pub mod forms;
pub mod logging;
pub mod models;
pub mod recurrence;
pub mod schedule;
pub mod ui;
pub mod validation;
pub mod vehicle;
