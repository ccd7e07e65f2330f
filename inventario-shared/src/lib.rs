#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

//! Wire models for the Inventario REST API plus the pure helpers the web
//! client derives its views from (chart scaling, dashboard summary).

pub mod charts;
pub mod models;
