pub mod accounts;
pub mod calculator;
pub mod catalog;
pub mod comparison;
pub mod plan;
pub mod reading;
pub mod service;
pub mod store;
