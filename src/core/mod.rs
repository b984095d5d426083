//! # Core Application Logic
//!
//! This module contains Safar's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    API     │
//!            │  Adapter   │ ─────────► │  client    │
//!            │ (ratatui)  │            │ (reqwest)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`filter`]: Client-side criteria over fetched lists
//! - [`listing`]: Fetched snapshot plus busy flag, shared by both screens
//! - [`interest`]: The booking-interest form state machine
//! - [`config`]: Layered settings resolution

pub mod action;
pub mod config;
pub mod filter;
pub mod interest;
pub mod listing;
pub mod notice;
pub mod routes;
pub mod session;
pub mod state;
pub mod vehicles;
