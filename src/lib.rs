//! URL query-state codec and configuration deep-merge utilities.
//!
//! The crate keeps filter/transform UI state in a URL: [`codec`] translates
//! between a query string and an ordered key-value [`model::QueryState`], and
//! [`merge`] combines nested JSON parameter sets with an explicit
//! primary-wins precedence rule. Everything in those two modules is a pure,
//! total function over its inputs. The remaining modules are the shell around
//! the `urlstate` binary: config file loading and tracing setup.

pub mod codec;
pub mod config;
pub mod logging;
pub mod merge;
pub mod model;
