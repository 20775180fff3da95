//! Test modules for glyphview-io
//!
//! End-to-end checks of the exporter against models built by the mesh builder.

pub mod export_tests;
