//! Liveness webserver
//!
//! A minimal HTTP surface for hosting-platform uptime checks. It reads no
//! bot state; the monitors only care that the process answers.

pub mod routes;
pub mod server;

pub use server::{shutdown, start_server};
