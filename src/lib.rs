//! Browser chess against an opponent that plays uniformly random legal moves.
//!
//! Rules come from the `chess` crate; the board is drawn by the page in
//! `static/`. Each websocket session owns one [`game::GameOrchestrator`].

pub mod config;
pub mod game;
pub mod models;
pub mod routes;
pub mod websocket;
