//! # Frontmat Architecture
//!
//! Frontmat bulk-edits the `key: value` frontmatter blocks at the top of markdown
//! notes. It is a library with a CLI client, not a CLI with some helpers: everything
//! below the CLI takes Rust arguments and returns Rust types.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, sets up logging, prints results        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Validates a BatchRequest and dispatches it by mode       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Batch loops: edit, summarize, show, target resolution    │
//! │  - Per-file failures are recorded, never fatal              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (property.rs, document.rs, mutation.rs, heat.rs)      │
//! │  - Parsing, normalization, mutation, rendering, counting    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward, code never prints, never exits the process and only reaches
//! files through [`store::DocumentStore`]. Diagnostics go through `tracing`; the
//! binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests against `InMemoryStore`. Most tests live here.
//! 2. **API**: dispatch and request validation.
//! 3. **CLI**: `tests/` drives the binary against a temporary directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Batch logic per mode, request and result types
//! - [`property`]: One normalized `key: value` pair
//! - [`document`]: Block location, parsing and rendering for one file
//! - [`mutation`]: The four editing modes
//! - [`heat`]: Frequency counting for `summarize` and `show`
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Persisted settings
//! - [`error`]: Error types
//! - `cli`: Argument parsing, logging setup and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod heat;
pub mod mutation;
pub mod property;
pub mod store;
