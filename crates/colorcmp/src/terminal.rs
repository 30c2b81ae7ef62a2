//! Terminal capability detection: should a report carry ANSI colors?
//!
//! The policy, in order:
//!
//! 1. `NO_COLOR` set to a non-empty value disables color (<https://no-color.org>).
//! 2. `FORCE_COLOR` set to a non-empty value enables color (<https://force-color.org>).
//! 3. A stream backed by an OS descriptor is colored iff it is a terminal.
//! 4. Otherwise `TERM` decides: set and not `dumb`.
//!
//! Step 4 exists for in-memory sinks (test harness capture buffers and the
//! like): `TERM` is inherited from the invoking shell and reflects the real
//! terminal, while CI environments usually leave it unset.

use std::fs::File;
use std::io::{self, IsTerminal};

/// Environment variable that disables color when non-empty.
pub const NO_COLOR_VAR: &str = "NO_COLOR";
/// Environment variable that forces color when non-empty.
pub const FORCE_COLOR_VAR: &str = "FORCE_COLOR";
/// Terminal type variable consulted for streams without a descriptor.
pub const TERM_VAR: &str = "TERM";

/// An output sink whose terminal-ness can be queried.
pub trait TerminalStream {
    /// Returns `Some(is_tty)` when the stream is backed by an OS-level
    /// descriptor, `None` when there is nothing to query.
    fn terminal(&self) -> Option<bool>;
}

macro_rules! descriptor_stream {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TerminalStream for $ty {
                fn terminal(&self) -> Option<bool> {
                    Some(self.is_terminal())
                }
            }
        )*
    };
}

macro_rules! memory_stream {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TerminalStream for $ty {
                fn terminal(&self) -> Option<bool> {
                    None
                }
            }
        )*
    };
}

descriptor_stream!(io::Stdout, io::StdoutLock<'_>, io::Stderr, io::StderrLock<'_>, File);
memory_stream!(Vec<u8>, String, io::Sink);

impl<T> TerminalStream for io::Cursor<T> {
    fn terminal(&self) -> Option<bool> {
        None
    }
}

impl<S: TerminalStream + ?Sized> TerminalStream for &S {
    fn terminal(&self) -> Option<bool> {
        (**self).terminal()
    }
}

impl<S: TerminalStream + ?Sized> TerminalStream for &mut S {
    fn terminal(&self) -> Option<bool> {
        (**self).terminal()
    }
}

/// Decide whether output written to `stream` should use ANSI colors, reading
/// the process environment.
pub fn should_use_color<S: TerminalStream + ?Sized>(stream: &S) -> bool {
    should_use_color_with(|name| std::env::var(name).ok(), stream)
}

/// Like [`should_use_color`], with an explicit environment lookup.
pub fn should_use_color_with<E, S>(env: E, stream: &S) -> bool
where
    E: Fn(&str) -> Option<String>,
    S: TerminalStream + ?Sized,
{
    let non_empty = |name: &str| env(name).is_some_and(|v| !v.is_empty());

    if non_empty(NO_COLOR_VAR) {
        return false;
    }
    if non_empty(FORCE_COLOR_VAR) {
        return true;
    }
    if let Some(tty) = stream.terminal() {
        return tty;
    }
    env(TERM_VAR).is_some_and(|term| !term.is_empty() && term != "dumb")
}
