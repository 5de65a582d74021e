//! ZNS Leads API Library
//!
//! This library provides the core functionality for the ZNS lead intake API:
//! retirement and athletes-rights lead storage, the retirement eligibility
//! engine, bearer-token authentication, request audit logging and webhook
//! forwarding.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `circuit_breaker`: Circuit breaker for webhook delivery.
//! - `config`: Configuration management.
//! - `contact`: Phone normalization.
//! - `db`: Database connection, pool and migrations.
//! - `db_storage`: Database storage operations.
//! - `docs`: OpenAPI document.
//! - `eligibility`: Retirement score and benefit date calculation.
//! - `errors`: Error handling types.
//! - `extract`: JSON-or-form body extractor.
//! - `handlers`: HTTP request handlers.
//! - `middleware`: Authentication and request logging.
//! - `models`: Core data models.
//! - `server`: Router assembly.
//! - `webhook_client`: Outbound webhook client.
//! - `webhook_models`: Webhook payload models.

pub mod api;
pub mod core;
pub mod integrations;

pub mod circuit_breaker;
pub mod config;
pub mod contact;
pub mod db;
pub mod db_storage;
pub mod docs;
pub mod eligibility;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod webhook_client;
pub mod webhook_models;
