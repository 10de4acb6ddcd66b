//! Terminal UI. Banner plus the interactive ranking flow.

pub mod banner;
pub mod tui;

/// Banner and colored prompt theme. Call once at startup, after tracing init.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
