//! Readiness Quiz: quiz orchestration engine for the Business x AI
//! readiness funnel.

pub mod admin;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod quiz;
