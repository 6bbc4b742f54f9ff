//! Deterministic, pure logic shared by the workflow.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod calendar;
pub mod path;
pub mod request;
pub mod types;
