//! # Core Launcher Logic
//!
//! This module contains the launcher's navigation and resource logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Resources (lookup)   │
//!                    │  • Catalog + Switcher   │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No UI. Minimal I/O.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`resource`]: Layered resource resolution with logged fallback
//! - [`catalog`]: The fixed navigation entries
//! - [`page`]: Page kinds, factories and page-local state
//! - [`navigation`]: `NavigationState` and the `PageSwitcher`
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`dialog`]: Single-answer confirmation flow
//! - [`links`]: Opening URLs in the host's default handler
//! - [`config`]: Settings and resource overrides
//! - [`crash_guard`]: Supervising the launcher and writing crash logs

pub mod action;
pub mod catalog;
pub mod config;
pub mod crash_guard;
pub mod dialog;
pub mod links;
pub mod navigation;
pub mod page;
pub mod resource;
pub mod state;
