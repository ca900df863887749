//! Account settings client for the Todo web application.
//!
//! Contains the form field validators, the validated input types built on top
//! of them, the settings page model and the API client it talks to.

pub mod api;
pub mod components;
pub mod config;
pub mod consts;
pub mod models;
pub mod pages;
pub mod types;
pub mod utils;
