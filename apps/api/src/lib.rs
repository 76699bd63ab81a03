//! Workplace skills coach: occupation lookup, AI practice scenarios and feedback.
//!
//! The `skills-coach` binary serves the HTTP API and browser UI; the `coach`
//! binary is a terminal front end for the same flow.

pub mod client;
pub mod coaching;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod onet;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;
