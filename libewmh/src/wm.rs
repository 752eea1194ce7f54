//! `WindowManager` uses the [Extended Window Manager Hints (EWMH) specification](https://specifications.freedesktop.org/wm-spec/latest/)
//! to find the windows an EWMH compatible window manager is managing and to shuffle them around.
//!
//! [Root Window Properties](https://specifications.freedesktop.org/wm-spec/latest/ar01s03.html)
//! The window manager maintains the list of clients it manages (`_NET_CLIENT_LIST` or the older
//! GNOME `_WIN_CLIENT_LIST`) and the list of hints it supports (`_NET_SUPPORTED`) on the root
//! window. Every query here goes straight to the server, nothing is cached between calls.
use rand::Rng;
use tracing::{debug, warn};
use x11rb::protocol::xproto::AtomEnum;

use crate::{
    server::DisplayServer, x11::X11Server, AtomId, ClientList, Config, ErrorWrapper, PropertyValue,
    RandomizeOutcome, ScreenSize, WindowId, WindowManagerError, WindowManagerResult, MAX_PROPERTY_LEN,
};

/// Window Manager control queries EWMH properties through a `DisplayServer` and applies random
/// geometries to the windows it finds.
pub struct WindowManager<S: DisplayServer> {
    server: S,      // display server connection
    config: Config, // runtime options
}

impl WindowManager<X11Server> {
    /// Create the window manager control instance and connect to the X11 server
    ///
    /// ### Examples
    /// ```ignore
    /// use libewmh::prelude::*;
    /// let wm = WindowManager::connect(Config::new()).unwrap();
    /// ```
    pub fn connect(config: Config) -> WindowManagerResult<Self> {
        let server = X11Server::connect(config.method)?;
        Ok(WindowManager::new(server, config))
    }
}

impl<S: DisplayServer> WindowManager<S> {
    /// Create the window manager control instance on top of the given server
    pub fn new(server: S, config: Config) -> Self {
        Self { server, config }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the root window
    pub fn root(&self) -> WindowId {
        self.server.root()
    }

    /// Get the screen size
    pub fn screen_size(&self) -> ScreenSize {
        self.server.screen_size()
    }

    /// Get the named property of the given window. Only returns a value when the server reports
    /// the property with exactly the expected type; at most `MAX_PROPERTY_LEN` 32bit units are
    /// read and anything longer is silently cut.
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    /// * `type_` - type the property is expected to have
    /// * `name` - name of the property
    ///
    /// ### Examples
    /// ```ignore
    /// use libewmh::prelude::*;
    /// let wm = WindowManager::connect(Config::new()).unwrap();
    /// let value = wm.get_property(wm.root(), AtomEnum::ATOM.into(), "_NET_SUPPORTED");
    /// ```
    pub fn get_property(&self, win: WindowId, type_: AtomId, name: &str) -> Option<PropertyValue> {
        let raw = match self
            .server
            .intern_atom(name)
            .and_then(|atom| self.server.get_property(win, atom, type_, MAX_PROPERTY_LEN))
        {
            Ok(raw) => raw,
            Err(err) => {
                if self.config.verbose {
                    warn!("Cannot get property: {}", name);
                }
                debug!("get_property: id: {}, name: {}, err: {}", win, name, err);
                return None;
            },
        };

        if raw.type_ != type_ {
            if self.config.verbose {
                warn!("Cannot get property {} as its return type and property type are not equal.", name);
            }
            debug!("get_property: id: {}, name: {}, expected: {}, got: {}", win, name, type_, raw.type_);
            return None;
        }

        let value = PropertyValue::from_raw(raw);
        debug!("get_property: id: {}, name: {}, len: {}", win, name, value.len());
        Some(value)
    }

    /// Get the named property of the root window
    pub fn get_root_property(&self, type_: AtomId, name: &str) -> Option<PropertyValue> {
        self.get_property(self.server.root(), type_, name)
    }

    /// Get the windows managed by the window manager. `_NET_CLIENT_LIST` is read as a list of
    /// windows and only if that fails is `_WIN_CLIENT_LIST` read as a list of cardinals.
    pub fn client_list(&self) -> Option<ClientList> {
        let value = self
            .get_root_property(AtomEnum::WINDOW.into(), "_NET_CLIENT_LIST")
            .or_else(|| self.get_root_property(AtomEnum::CARDINAL.into(), "_WIN_CLIENT_LIST"));

        match value {
            Some(value) => {
                let clients = ClientList::from_value(&value);
                debug!("client_list: windows: {}, bytes: {}", clients.len(), clients.byte_len());
                Some(clients)
            },
            None => {
                if self.config.verbose {
                    warn!("Cannot get properties of _NET_CLIENT_LIST or _WIN_CLIENT_LIST.");
                }
                None
            },
        }
    }

    /// Get window title preferring the UTF-8 `_NET_WM_NAME` over the legacy `WM_NAME`
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    pub fn win_title(&self, win: WindowId) -> Option<String> {
        // Both are always queried
        let wm_name = self.get_property(win, AtomEnum::STRING.into(), "WM_NAME");
        let net_wm_name = match self.server.intern_atom("UTF8_STRING") {
            Ok(utf8) => self.get_property(win, utf8, "_NET_WM_NAME"),
            Err(err) => {
                debug!("win_title: id: {}, err: {}", win, err);
                None
            },
        };

        let title = net_wm_name.or(wm_name).map(|x| x.to_string_lossy());
        debug!("win_title: id: {}, title: {:?}", win, title);
        title
    }

    /// Get window pid from `_NET_WM_PID`
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    pub fn win_pid(&self, win: WindowId) -> Option<u32> {
        // Defined as: _NET_WM_PID, CARDINAL/32
        self.get_property(win, AtomEnum::CARDINAL.into(), "_NET_WM_PID").and_then(|x| x.to_u32s().first().copied())
    }

    /// Determine if the window manager advertises `_NET_MOVERESIZE_WINDOW` in `_NET_SUPPORTED`
    pub fn supports_resizing(&self) -> bool {
        let target = match self.server.intern_atom("_NET_MOVERESIZE_WINDOW") {
            Ok(atom) => atom,
            Err(err) => {
                debug!("supports_resizing: err: {}", err);
                return false;
            },
        };
        let supported = match self.get_root_property(AtomEnum::ATOM.into(), "_NET_SUPPORTED") {
            Some(value) => value,
            None => return false,
        };
        let result = supported.to_u32s().into_iter().any(|x| AtomId(x) == target);
        debug!("supports_resizing: {}", result);
        result
    }

    /// Move and resize the window to a random place and size on the screen. Windows whose
    /// current geometry does not pass the configured filter are left alone, as is every window
    /// when the screen is smaller than 2x2 pixels since no value fits in `[1, dim - 1]`. Failures
    /// are logged when verbose and otherwise ignored.
    ///
    /// ### Arguments
    /// * `win` - id of the window to manipulate
    /// * `screen` - bounds for every random value
    /// * `rng` - random source
    pub fn randomize_geometry<R: Rng + ?Sized>(
        &self, win: WindowId, screen: ScreenSize, rng: &mut R,
    ) -> RandomizeOutcome {
        let current = match self.server.geometry(win) {
            Ok(geometry) => geometry,
            Err(err) => {
                if self.config.verbose {
                    warn!("Failed to get the geometry of window {}: {}", win, err);
                }
                return RandomizeOutcome::Failed;
            },
        };

        if !self.config.filter.accepts(&current) {
            debug!("randomize_geometry: id: {}, skipped: {}", win, current);
            return RandomizeOutcome::Skipped(current);
        }

        // No room for a position or size of at least one pixel
        if screen.width < 2 || screen.height < 2 {
            debug!("randomize_geometry: id: {}, screen too small: {}", win, screen);
            return RandomizeOutcome::Skipped(current);
        }

        let next = crate::Geometry::random(screen, rng);
        match self.server.move_resize(win, next) {
            Ok(()) => RandomizeOutcome::Applied(next),
            Err(err) => {
                if self.config.verbose {
                    report_resize_error(&err);
                }
                RandomizeOutcome::Failed
            },
        }
    }
}

fn report_resize_error(err: &ErrorWrapper) {
    match err.wm_error() {
        Some(WindowManagerError::BadValue) => warn!("Failed to resize a window: Bad Value"),
        Some(WindowManagerError::BadWindow(_)) => warn!("Failed to resize a window: Bad Window"),
        _ => warn!("Failed to resize a window: {}", err),
    }
}
