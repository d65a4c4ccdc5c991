//! Playbill Library
//!
//! This library provides the core of the Playbill theatre site: the content
//! models, the host-driven carousel, lightbox and funding panel engines, the
//! crowdfunding and contact-autoreply services, and the HTTP server.

// Module declarations
pub mod config;
pub mod constants;
pub mod contact;
pub mod funding;
pub mod models;
pub mod services;
pub mod ui;
#[cfg(feature = "web")]
pub mod web;
