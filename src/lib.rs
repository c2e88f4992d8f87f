// src/lib.rs

//! buzzreport: BuzzStream outreach reporting bridge

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
pub mod web;
