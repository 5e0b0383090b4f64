//! Terminal display and input polling

use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::time::Duration;

pub const WINDOW_TITLE: &str = "Console Raytracing";

/// Kitty protocol flags: release events, plus modifier keys reported on
/// their own so Left Shift can be bound.
pub const KEYBOARD_FLAGS: KeyboardEnhancementFlags =
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        .union(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        .union(KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES);

/// Terminal display handler with buffered output
pub struct TerminalDisplay {
    buffer: BufWriter<Stdout>,
    keyboard_enhanced: bool,
    mouse_captured: bool,
}

impl TerminalDisplay {
    pub fn new(mouse_capture: bool) -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))?;
        terminal::enable_raw_mode()?;

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )?;

        // Release events need the kitty keyboard protocol
        let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            execute!(stdout, PushKeyboardEnhancementFlags(KEYBOARD_FLAGS))?;
        }

        if mouse_capture {
            execute!(stdout, EnableMouseCapture)?;
        }

        // Focus loss clears held keys whose release we will never see
        execute!(stdout, EnableFocusChange)?;

        tracing::info!(keyboard_enhanced, mouse_capture, "Terminal initialized");

        Ok(Self {
            buffer: BufWriter::new(stdout),
            keyboard_enhanced,
            mouse_captured: mouse_capture,
        })
    }

    /// True if key release events will be reported
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Wipe the whole screen, used when the frame shrinks
    pub fn clear(&mut self) -> io::Result<()> {
        write!(self.buffer, "\x1b[2J")?;
        self.buffer.flush()
    }

    /// Render content to terminal with line-by-line positioning
    /// This prevents long lines from corrupting cursor position
    pub fn render(&mut self, content: &str, status: &str) -> io::Result<()> {
        // \x1b[?25l = hide cursor, \x1b[?7l = disable line wrap
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        let mut rows = 0;
        for (i, line) in content.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
            rows = i + 1;
        }

        // Clear from cursor to end of screen (removes leftover from larger frames)
        write!(self.buffer, "\x1b[J")?;

        write!(
            self.buffer,
            "\x1b[{};1H\x1b[K\x1b[38;2;255;255;255m{}\x1b[0m",
            rows + 1,
            status
        )?;

        write!(self.buffer, "\x1b[?7h")?;

        self.buffer.flush()
    }

    /// Next input event, waiting at most `timeout`
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            return Ok(Some(event::read()?));
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.buffer.flush();
        let mut stdout = stdout();
        let _ = execute!(stdout, DisableFocusChange);
        if self.mouse_captured {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
    }
}
