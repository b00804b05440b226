//! # Topos Core
//!
//! The numerical backbone of the Topos framework. This crate implements
//! snapshot-based Proper Orthogonal Decomposition (POD) of time series of
//! spatial fields, and the reconstruction of fields from a stored mode basis.
//!
//! ## Method
//!
//! The method of snapshots diagonalises the `T × T` temporal correlation
//! matrix instead of the (typically much larger) spatial covariance matrix:
//! eigenpairs of the normalised Gram matrix of snapshot columns yield the
//! temporal coefficients ("chronos"), and spatial modes are recovered as
//! linear combinations of the snapshot columns. An optional Spectral POD
//! (SPOD) step smooths the Gram matrix with a periodic convolution kernel
//! before the eigendecomposition, emphasising temporally coherent structures.
//!
//! ## Modules
//!
//! - [`types`] — Settings and result containers.
//! - [`pod`] — The decomposition pipeline (Gram matrix, SPOD filter,
//!   eigendecomposition, RIC truncation, mode synthesis).
//! - [`reconstruct`] — Projection of snapshots onto a mode basis and
//!   recombination of reconstructed fields.

pub mod pod;
pub mod reconstruct;
pub mod types;
