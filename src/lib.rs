//! Core library for the `landslide-rest` CLI.
//!
//! This crate loads Postman collections, resolves their requests into
//! concrete HTTP calls and executes them with retries, timeouts and basic
//! auth. The binary is a thin layer over [`runner::Runner`] and
//! [`landslide::LandslideClient`].
pub mod args;
pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod landslide;
pub mod output;
pub mod runner;
