//! Core type definitions used across the VaultDocs workspace.

pub mod id;

pub use id::*;
