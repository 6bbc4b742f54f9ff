//! Project folder scaffolding for design-software templates.
//!
//! Given a profile (one per target application, e.g. Vectric Aspire or
//! SketchUp), a project name, a category and today's date, the crate builds a
//! deterministic directory under the profile's base folder, copies a template
//! into it under a new name and hands the result to the OS to open.
//!
//! - **[`core`]**: Pure, deterministic logic (month table, path construction,
//!   request validation). No I/O.
//! - **[`io`]**: Side-effecting operations (config file, template listing,
//!   directory creation and copy, OS opener, overwrite confirmation).
//!
//! [`profiles`] resolves profile records from the persisted configuration and
//! [`materialize`] coordinates core logic with I/O to run one workflow.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod materialize;
pub mod profiles;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
