//! # PlantCare Core
//!
//! Care task lifecycle and consistency engine for the plant-care companion
//! backend. Users photograph a tracked plant, an external analysis step
//! derives a growth-stage assessment plus recommended tasks, and this crate
//! persists the assessment, keeps its spawned tasks individually actionable,
//! and holds the three record kinds consistent with each other.
//!
//! ## Architecture
//!
//! The backing store supplies per-record atomicity and nothing else — no
//! multi-record transactions and no declarative cross-record constraints.
//! Every multi-entity rule is maintained in the [`care`] module:
//!
//! - per-user ownership across tracked plants, analysis records, and tasks,
//!   with absence and foreign ownership deliberately indistinguishable;
//! - idempotent batch linking: task identifiers are generated locally before
//!   either collection is written, the analysis record (carrying the full
//!   identifier list) lands first, and readers resolve the list defensively;
//! - the canonical multi-key display ordering of a task set.
//!
//! ## Module Organization
//!
//! - [`models`] - record shapes and the permissive status/priority/category
//!   value sets
//! - [`storage`] - the `CareStore` seam with memory and Postgres backends
//! - [`care`] - ownership check, analysis creator, task lifecycle, sorter
//! - [`web`] - axum HTTP surface (auth middleware, handlers, error envelope)
//! - [`config`] - deployment configuration
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use plantcare_core::storage::MemoryStore;
//! use plantcare_core::web::auth::StaticTokenVerifier;
//! use plantcare_core::web::state::AppState;
//!
//! let store = Arc::new(MemoryStore::new());
//! let verifier = Arc::new(StaticTokenVerifier::default());
//! let router = plantcare_core::web::build_router(AppState::new(store, verifier));
//! ```

pub mod care;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod web;

pub use config::CoreConfig;
pub use error::{CareError, Result};
pub use models::{AnalysisRecord, CareTask, TaskCategory, TaskPriority, TaskStatus, TrackedPlant};
