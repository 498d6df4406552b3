//! modelcards - read, write and publish Hugging Face model and dataset cards
//!
//! A card is a Markdown document with a YAML metadata block:
//!
//! ```text
//! ---
//! language: en
//! license: mit
//! ---
//! # my-cool-model
//! ```
//!
//! [`RepoCard`] parses such documents into typed [`CardData`] plus body text, renders
//! new cards from templates, and saves, validates and pushes them to the Hub.

pub mod card;
pub mod error;
pub mod hub;
pub mod staging;
pub mod template;

pub use card::{CardData, CardKind, CardWarning, EvalResult, PushOptions, RepoCard};
pub use error::{CardError, Result};
pub use hub::{HubClient, HubConfig};
pub use template::{HandlebarsRenderer, TemplateRenderer, TemplateVars};
