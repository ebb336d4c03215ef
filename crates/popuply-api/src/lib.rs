//! # popuply-api
//!
//! HTTP API layer for Popuply, built on Axum. Contains the shared
//! [`state::AppState`], route definitions, request/response DTOs, the
//! authentication extractors, and middleware.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
