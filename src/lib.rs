//! Chat client for a document question-answering service.
//!
//! The controllers, localization and settings are plain Rust and can be
//! driven headlessly; `ui` and `views` put a Dioxus interface on top.

pub mod api;
pub mod config;
pub mod controller;
pub mod i18n;
pub mod session;
pub mod storage;
pub mod surface;
pub mod transcript;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
