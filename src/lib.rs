//! JornaGEO conference landing page: content rendering and registration submission.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
