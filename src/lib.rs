#![allow(clippy::doc_markdown)] // Allow technical terms like Firestore, GCS in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Fireblob
//!
//! Thin async facade over two managed Google Cloud services, Firestore for
//! documents and Cloud Storage for blobs, addressed through a single client
//! keyed by small capability traits.
//!
//! ## Overview
//!
//! Every operation resolves a semantic key to a collection/document pair or a
//! bucket/object pair and forwards the call to the backing SDK crate. There is
//! no independent data model and no retry policy beyond what the SDK crates
//! themselves provide; errors surface verbatim.
//!
//! Keys come in three capability levels:
//! - [`keys::Categorizer`] - category only (collection or bucket name)
//! - [`keys::Grouping`] - category plus identifier (document or object name)
//! - [`keys::MetaGrouping`] - grouping plus a metadata map for object updates
//!
//! ## Module Organization
//!
//! - [`keys`] - Capability traits and ready-made key value types
//! - [`client`] - The facade client and its document/object/bucket operations
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing bootstrap
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fireblob::{FireblobClient, FireblobConfig, Key};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FireblobClient::new(FireblobConfig::new("my-project")).await?;
//!
//! let invoice = Key::new("invoices", "2024-0042");
//! let fields = client.doc_data(&invoice).await?;
//! println!("invoice fields: {:?}", fields);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod logging;

// Re-export commonly used types for convenience
pub use client::{FireblobClient, ObjectLocation};
pub use config::FireblobConfig;
pub use error::{ClientError, ClientResult};
pub use keys::{Categorizer, Grouping, Key, MetaGrouping, MetaKey};

// Backing-service types that appear in the public surface
pub use firestore::FirestoreDocument;
pub use google_cloud_storage::http::buckets::{patch::BucketPatchConfig, Bucket};
pub use google_cloud_storage::http::objects::Object;
