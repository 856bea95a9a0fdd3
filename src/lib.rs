//! Migrates dynamic route handlers from synchronously destructured
//! `params` to awaited `params`.
//!
//! ```text
//! async function GET(req, { params }: { params: { id: string } }) {
//!   try {
//! ```
//!
//! becomes
//!
//! ```text
//! async function GET(req, { params }: { params: Promise<{ id: string }> }) {
//!   try {
//!     const { id } = await params
//! ```
//!
//! The rewrite engine lives in [`rewrite`] and is pure; [`commands`] wires
//! it to file discovery and write-back.

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod rewrite;

// Re-export commonly used types
pub use crate::commands::{handle_migrate, MigrateOptions, RunSummary, WriteMode};
pub use crate::config::{MigrateConfig, RewriteConfig};
pub use crate::errors::MigrateError;
pub use crate::rewrite::{transform, transform_source, RouteFile, TransformationOutcome};
