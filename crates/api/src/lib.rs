// Corkboard API Library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Router assembly
pub mod app;

// Authentication and authorization
pub mod auth;

// Server configuration
pub mod config;

// Services layer
pub mod services;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;
