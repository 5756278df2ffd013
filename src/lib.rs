//! Mealscan Library
//!
//! Core functionality for packaging meal photo captures and estimating
//! nutrition through the remote recognition service.

pub mod backend;
pub mod build_info;
pub mod capture;
pub mod db;
pub mod models;
pub mod result;
pub mod session;
pub mod store;
