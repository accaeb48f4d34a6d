//! HTTP middleware

pub mod dataset;
