//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the submit shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for the help line
/// Ctrl+S works on all platforms (Cmd+S also works on macOS)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Password visibility toggles
pub const TOGGLE_PASSWORD_SHORTCUT: &str = "F2";
pub const TOGGLE_CONFIRM_PASSWORD_SHORTCUT: &str = "F3";
