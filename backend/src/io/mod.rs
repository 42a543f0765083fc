//! # IO Module
//!
//! Provides the interface layer between the game UI and the domain logic.
//!
//! This module translates HTTP requests into domain operations and formats
//! domain results for the UI. It owns the REST protocol, JSON
//! serialization, and the mapping from domain errors to status codes. No
//! game rules live here.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum
//! - **Serialization**: Serde, using the DTOs from the `shared` crate
//! - **State Management**: `AppState` injected through Axum's `State` extractor
//!
//! ## Design Patterns
//!
//! - **Handler Pattern**: one handler function per endpoint, one router per resource
//! - **Mappers**: domain types never cross the wire directly

pub mod rest;
