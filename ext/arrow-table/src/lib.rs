//! C-ABI boundary for `arrow-table-core`
//!
//! Every exported function follows the same contract:
//!
//! - Data crosses the boundary either as an opaque handle
//!   ([`arrow_table_core::Table`], [`arrow_table_core::ParquetStream`]) or
//!   as an Arrow C Data Interface struct (`FFI_ArrowArray` /
//!   `FFI_ArrowSchema`) with the standard release-callback contract.
//! - Fallible functions take a trailing `err_out: *mut *mut c_char`. On
//!   success it is set to null; on failure it receives a heap-allocated
//!   message (release with [`guard::error_message_free`]) and the function
//!   returns its sentinel value. The [`ffi_guard!`](crate::guard) wrapper
//!   also catches panics, so no unwind ever crosses the ABI and Rust
//!   destructors run before the error is reported.
//! - Every pointer handed out has exactly one matching `*_free` function,
//!   and all free functions tolerate null.

pub mod datatype;
pub mod guard;
pub mod io;
pub mod reader;
pub mod schema;
pub mod table;
