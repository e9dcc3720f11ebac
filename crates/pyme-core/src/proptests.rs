//! Property-based tests for RUT handling and formatting.
