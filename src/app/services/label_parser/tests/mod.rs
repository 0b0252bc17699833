//! Tests for run identifier and time label parsing
