//! Unit tests for the order module.
