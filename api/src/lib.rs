//! HTTP API layer for the EduPortal backend

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
