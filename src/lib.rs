//! Backend of an English/TOEIC training center LMS.
//!
//! Built on Actix Web with SeaORM persistence.
//!
//! # Architecture
//! - `config`: configuration management
//! - `entity`: SeaORM database entities
//! - `errors`: unified error handling
//! - `middlewares`: authentication and authorization middleware
//! - `models`: data model definitions
//! - `routes`: API routing layer
//! - `runtime`: runtime lifecycle management
//! - `services`: business logic layer
//! - `storage`: data storage layer (SeaORM)
//! - `utils`: helpers

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
