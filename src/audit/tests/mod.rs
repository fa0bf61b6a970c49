//! Unit tests for the audit module.
