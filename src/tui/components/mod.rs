//! # TUI Components
//!
//! All UI components for the terminal launcher.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top bar with version, page and status
//! - `NavPane`: Side navigation list, collapsed or expanded
//! - `PageView`: The current page, reading its page-local state
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `CrashPrompt`: Owns the test-crash `ConfirmDialog` and answers it
//!   from key events; `ConfirmDialogView` draws it
//!
//! Components receive external data as "props" (function parameters), not
//! by reaching into global state:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! NavPane::new(catalog.entries(), nav.selected(), nav.is_pane_open()).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar)
//! ├── nav_pane.rs        (Side navigation)
//! ├── page_view.rs       (Page content)
//! └── confirm_dialog.rs  (Test-crash confirmation overlay)
//! ```

pub mod confirm_dialog;
pub mod nav_pane;
pub mod page_view;
mod title_bar;

pub use confirm_dialog::{Answered, ConfirmDialogView, CrashPrompt};
pub use nav_pane::NavPane;
pub use page_view::PageView;
pub use title_bar::TitleBar;
