//! `libewmh` implements the parts of the [Extended Window Manager Hints (EWMH) specification](https://specifications.freedesktop.org/wm-spec/latest/)
//! needed to find the windows an EWMH compatible window manager is managing and to throw them
//! around the screen. The EWHM spec builds on the lower level Inter Client Communication
//! Conventions Manual (ICCCM) to define interactions between window managers, compositing
//! managers and applications.
//!
//! [Root Window Properties](https://specifications.freedesktop.org/wm-spec/latest/ar01s03.html)
//! The EWMH spec defines a number of properties that EWHM compliant window managers will maintain
//! and return to clients requesting information. `libewmh` reads the client list, the supported
//! hints and per window titles and pids, then moves and resizes every client to random places.
//!
//! `winsperg` drives `libewmh` from the command line; the X server is reached through the
//! `DisplayServer` trait so the logic can run against anything that answers the same requests.
mod atoms;
mod config;
mod error;
mod model;
mod server;
#[cfg(test)]
mod testing;
mod window;
mod wm;
mod x11;
pub use config::*;
pub use error::*;
pub use model::*;
pub use server::DisplayServer;
pub use window::{list, run, RunSummary, StopHandle};
pub use wm::WindowManager;
pub use x11::*;

/// All essential symbols in a simple consumable form
///
/// ### Examples
/// ```
/// use libewmh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::*;
    pub use x11rb::protocol::xproto::AtomEnum;
}
