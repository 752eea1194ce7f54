use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

use rand::Rng;
use tracing::{debug, info};

use crate::{
    server::DisplayServer, RandomizeOutcome, WindowId, WindowManager, WindowManagerError, WindowManagerResult,
};

/// StopHandle lets another thread or a signal handler end the shuffle loop after the window
/// currently being handled.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// RunSummary counts what the shuffle loop did before it stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds: u64,
    pub applied: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: RandomizeOutcome) {
        match outcome {
            RandomizeOutcome::Applied(_) => self.applied += 1,
            RandomizeOutcome::Skipped(_) => self.skipped += 1,
            RandomizeOutcome::Failed => self.failed += 1,
        }
    }
}

/// Check the window manager can move windows, snapshot its client list and then shuffle every
/// client to a random geometry, pausing after each one. The list is never refreshed so windows
/// opened later are left alone and windows closed later simply fail.
///
/// Loops until the `stop` handle is set or the configured number of rounds is reached; with
/// neither it never returns `Ok`.
///
/// ### Arguments
/// * `wm` - window manager control to work through
/// * `rng` - random source for the new geometries
/// * `out` - where the verbose window listing is written
/// * `stop` - handle checked before each window
///
/// ### Examples
/// ```ignore
/// use libewmh::prelude::*;
/// let wm = WindowManager::connect(Config::new().rounds(Some(1))).unwrap();
/// libewmh::run(&wm, &mut rand::thread_rng(), &mut std::io::stdout(), &StopHandle::new()).unwrap();
/// ```
pub fn run<S, R, W>(wm: &WindowManager<S>, rng: &mut R, out: &mut W, stop: &StopHandle) -> WindowManagerResult<RunSummary>
where
    S: DisplayServer,
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    if !wm.supports_resizing() {
        return Err(WindowManagerError::Unsupported.into());
    }
    let clients = wm.client_list().ok_or(WindowManagerError::ClientListNotFound)?;

    let screen = wm.screen_size();
    info!("shuffling {} windows on a {} screen", clients.len(), screen);

    if wm.config().is_verbose() {
        list(wm, clients.windows(), out)?;
    }

    let mut summary = RunSummary::default();
    let delay = wm.config().pause();
    while !stop.is_stopped() && wm.config().max_rounds().map_or(true, |max| summary.rounds < max) {
        for win in clients.windows() {
            if stop.is_stopped() {
                break;
            }
            summary.record(wm.randomize_geometry(*win, screen, rng));
            thread::sleep(delay);
        }

        // Nothing to shuffle, still pause so the loop doesn't spin
        if clients.is_empty() {
            thread::sleep(delay);
        }
        summary.rounds += 1;
        debug!("run: {:?}", summary);
    }
    info!("stopped after {} rounds", summary.rounds);
    Ok(summary)
}

/// Write the pid and title of each of the given windows, one line per window. A missing pid is
/// shown as 0 and a missing title as None.
///
/// ### Examples
/// ```ignore
/// use libewmh::prelude::*;
/// let wm = WindowManager::connect(Config::new()).unwrap();
/// let clients = wm.client_list().unwrap();
/// libewmh::list(&wm, clients.windows(), &mut std::io::stdout()).unwrap();
/// ```
pub fn list<S, W>(wm: &WindowManager<S>, windows: &[WindowId], out: &mut W) -> WindowManagerResult<()>
where
    S: DisplayServer,
    W: Write + ?Sized,
{
    writeln!(out, "Currently open windows:")?;
    for win in windows {
        let title = wm.win_title(*win);
        let pid = wm.win_pid(*win);
        writeln!(out, "PID: {:<6}Title: {}", pid.unwrap_or(0), title.as_deref().unwrap_or("None"))?;
    }
    Ok(())
}
