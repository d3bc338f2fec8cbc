//! Lead Radar - Prospect Readiness Vetting Pipeline
//!
//! This crate implements the vetting core for a B2B lead-intake product:
//! incremental qualification-field extraction from intake conversations,
//! completeness gating, concurrent external validation, and weighted
//! readiness scoring into immutable snapshots.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
