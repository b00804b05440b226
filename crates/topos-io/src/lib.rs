//! # Topos IO
//!
//! File formats for the Topos POD toolkit.
//!
//! ## Modules
//!
//! - [`timelist`] — The snapshot-list file: one time-directory identifier
//!   per line.
//! - [`snapshot`] — Point-cloud snapshot files: reference probing and
//!   parallel loading into a single snapshot matrix, with an explicit
//!   policy for unreadable files.
//! - [`binary`] — Raw little-endian `f64` persistence with no embedded
//!   shape metadata; shape is always supplied by the caller.

pub mod binary;
pub mod snapshot;
pub mod timelist;
