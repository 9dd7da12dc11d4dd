//! Domain types and pure logic for the ShieldAI forensic client.
//!
//! Nothing in this crate performs I/O. The wire types mirror the JSON
//! exchanged with the analysis and evaluation services, and
//! [`verdict`] turns an analysis result into display-ready data.

pub mod analysis;
pub mod error;
pub mod evaluation;
pub mod feedback;
pub mod media;
pub mod validation;
pub mod verdict;
