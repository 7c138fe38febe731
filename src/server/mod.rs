//! Server-side API backend and business logic.
//!
//! This module contains the backend of the rental marketplace: HTTP endpoints, the
//! booking engine, data access, and the background workers that support them. The
//! backend uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, policy checks, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic, including availability, pricing, booking
//!   lifecycle and rating aggregation
//! - **Data Layer** (`data/`) - Database operations over SeaORM entities
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Bearer token authentication
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, cache, event channel, blob store)
//! - **Startup** (`startup`) - Database connection, migrations and admin bootstrap
//! - **Router** (`router`) - Route table and OpenAPI documentation
//! - **Scheduler** (`scheduler/`) - Cron jobs (expired cache entry sweep)
//! - **Policy** (`policy`) - Role-based authorization decisions
//! - **Storage** (`storage`) - Blob store for uploaded media
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** resolves the bearer token to an `Actor`
//! 3. **Controller** validates input, asks `policy` whether the actor may act, calls a service
//! 4. **Service** executes business logic inside transactions where required
//! 5. **Data** queries the database and returns entity models
//! 6. **Controller** converts the domain model to a DTO and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod policy;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod storage;
pub mod util;
