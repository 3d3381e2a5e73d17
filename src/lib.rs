//! Glow-chat is a terminal-first chat client for the GLOW showroom
//! assistant, with a bundled mock backend for local development.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`pipeline`] turns one raw backend reply into an ordered sequence of
//!   short display-ready bubbles (small-talk short-circuit, segmentation,
//!   cosmetic formatting, follow-up questions).
//! - [`ui`] parses bubbles into a view-model and renders the transcript,
//!   documents panel, and input box in the interactive event loop.
//! - [`core`] owns the transcript data model, upload records, the HTTP
//!   backend seam, and configuration.
//! - [`server`] is the Express-style mock backend: static files, a canned
//!   `/chat` reply, and a multipart `/api/upload` pass-through to disk.
//! - [`commands`] parses the slash commands accepted by the input line.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into
//! [`ui::chat_loop::run_chat`] or [`server::run`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod pipeline;
pub mod server;
pub mod ui;
pub mod utils;
