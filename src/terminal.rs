//! Terminal management - size probing, cursor control, and panic-safe cleanup.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clear the whole screen.
pub const CLEAR: &[u8] = b"\x1b[2J";
/// Move the cursor to the top-left corner.
pub const HOME: &[u8] = b"\x1b[H";
/// Hide the cursor.
const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
/// Show the cursor.
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

/// Static flag to track if the screen needs restoring (for panic handler)
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Global flag for handling Ctrl+C across the application
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Query the terminal's (columns, rows).
pub fn probe_size() -> io::Result<(u16, u16)> {
    crossterm::terminal::size()
}

/// Check if Ctrl+C has been received.
pub fn interrupted() -> bool {
    CTRLC_RECEIVED.load(Ordering::SeqCst)
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup. The handler only flips a
/// flag; the render loop notices it and exits through the normal cleanup
/// path, so the handler itself must not write to the screen.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
    })
}

/// Guard that takes over the screen and restores it on drop.
/// This handles both normal exits and panics.
pub struct TerminalGuard {
    /// Whether this guard is responsible for cleanup
    active: bool,
}

impl TerminalGuard {
    /// Hide the cursor and clear the screen, returning a guard that undoes
    /// both when dropped.
    ///
    /// # Errors
    /// Returns an error if writing to stdout fails
    pub fn enter() -> io::Result<Self> {
        // Install panic hook before touching the screen
        install_panic_hook();

        let mut stdout = io::stdout();
        stdout.write_all(HIDE_CURSOR)?;
        stdout.write_all(CLEAR)?;
        stdout.write_all(HOME)?;
        stdout.flush()?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);

        Ok(Self { active: true })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            SCREEN_ACTIVE.store(false, Ordering::SeqCst);
            // Best-effort cleanup - ignore errors during drop
            let _ = restore_screen();
        }
    }
}

fn restore_screen() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(SHOW_CURSOR)?;
    stdout.write_all(CLEAR)?;
    stdout.write_all(HOME)?;
    stdout.flush()
}

/// Install a panic hook that restores the terminal before panicking.
/// This ensures the panic message lands on a usable screen.
fn install_panic_hook() {
    // Only install once - check if we've already installed
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return; // Already installed
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Restore the screen before showing the panic message
        if SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = restore_screen();
        }

        // Call the original panic hook to print the panic message
        original_hook(panic_info);
    }));
}
