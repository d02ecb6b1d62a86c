//! # Kbase Architecture
//!
//! Kbase is the client-side state layer of a support knowledge base. Articles are grouped
//! into folders, and every folder and article belongs to one product category (`pabx` or
//! `omni`). The library holds the client's copy of both collections, persists them between
//! sessions and answers the queries a presentation layer needs.
//!
//! The CLI in `main.rs` is one client of this library. The `kbase-server` workspace member
//! is the relational backend that a networked client talks to; it reuses this crate's model.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, render.rs)                          │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade (api.rs)                                            │
//! │  - Resolves id prefixes, cascades folder deletion           │
//! │  - Filtered listings built from query.rs                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores (store/)                                            │
//! │  - FolderStore and ArticleStore, independent collections    │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing below the CLI writes to stdout/stderr or exits the process. Diagnostics go
//! through `tracing`; the binaries decide where they end up.
//!
//! ## Module Overview
//!
//! - [`model`]: Category, Folder, Article, creation drafts and patches
//! - [`store`]: the two stores and their persistence backends
//! - [`query`]: search, sort and count helpers
//! - [`media`]: attachment list cleanup and video embed URLs
//! - [`api`]: the [`api::KnowledgeBase`] facade
//! - [`config`]: `config.json` handling
//! - [`error`]: [`error::KbError`] and the crate `Result`

pub mod api;
pub mod config;
pub mod error;
pub mod media;
pub mod model;
pub mod query;
pub mod store;
