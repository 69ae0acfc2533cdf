//! Language-agnostic core functionality for Arrow table operations
//!
//! `arrow-table-core` wraps the Apache arrow-rs and parquet-rs crates with a
//! small table-oriented API that language bindings can expose over a C ABI.
//!
//! # Key Components
//!
//! - **Table**: An immutable table made of a schema and ordered
//!   [`RecordBatch`](arrow_array::RecordBatch) chunks
//!   - Zero-copy slicing and concatenation
//!   - Chunk-level column access for interchange-format export
//!
//! - **Readers**: Whole-table loaders for Parquet, Feather (Arrow IPC),
//!   CSV and newline-delimited JSON
//!   - Column projection and row limits for Parquet
//!   - [`read::ParquetStream`] for batch-at-a-time streaming reads
//!
//! - **Writers**: Parquet and Feather file writers
//!   - Compression codec and row-group/chunk sizing through
//!     [`write::WriteOptions`]
//!
//! # Design Philosophy
//!
//! This crate stays value-free: data enters and leaves as Arrow arrays, so
//! bindings can hand buffers across the boundary through the Arrow C Data
//! Interface without copying. All fallible operations return
//! [`error::TableError`] rather than panicking; the boundary crate is
//! responsible for translating errors into the caller runtime's failure
//! mechanism.

pub mod compression;
pub mod error;
pub mod read;
pub mod table;
pub mod write;

pub use compression::Codec;
pub use error::{ErrorContext, Result, TableError};
pub use read::{ParquetReadOptions, ParquetStream};
pub use table::Table;
pub use write::WriteOptions;
