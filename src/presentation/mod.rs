//! Askama views and fragment templates.

pub mod fragments;
pub mod views;
