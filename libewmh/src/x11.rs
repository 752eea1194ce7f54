//! `X11Server` implements the `DisplayServer` requests on top of an x11rb `RustConnection`.
use tracing::{debug, trace};
use x11rb::{
    connection::Connection,
    errors::ReplyError,
    protocol::{
        xproto::{
            self, ChangeWindowAttributesAux, ClientMessageEvent, ConfigureWindowAux, ConnectionExt as _,
            EventMask,
        },
        ErrorKind,
    },
    rust_connection::RustConnection,
};

use crate::{
    atoms::AtomCollection, server::DisplayServer, AtomId, ErrorWrapper, Geometry, MoveResizeMethod, RawProperty,
    ScreenSize, WindowId, WindowManagerError, WindowManagerResult,
};

// Define the second byte of the move resize flags 32bit value
// Used to indicate that the associated value has been changed and needs to be acted upon
pub type MoveResizeWindowFlags = u32;
pub const MOVE_RESIZE_WINDOW_X: MoveResizeWindowFlags = 1 << 8;
pub const MOVE_RESIZE_WINDOW_Y: MoveResizeWindowFlags = 1 << 9;
pub const MOVE_RESIZE_WINDOW_WIDTH: MoveResizeWindowFlags = 1 << 10;
pub const MOVE_RESIZE_WINDOW_HEIGHT: MoveResizeWindowFlags = 1 << 11;

// Source indication, 2 marks the request as coming from a pager rather than the application
pub const MOVE_RESIZE_SOURCE_PAGER: MoveResizeWindowFlags = 2 << 12;

/// X11 connection to the default display
pub struct X11Server {
    conn: RustConnection,     // x11 connection
    atoms: AtomCollection,    // atom cache
    method: MoveResizeMethod, // request used for move/resize
    screen: usize,            // screen number
    root: u32,                // root window id
    width: u32,               // screen width
    height: u32,              // screen height
}

impl X11Server {
    /// Connect to the display named by `$DISPLAY` and register for structure notifications on
    /// the root window.
    pub fn connect(method: MoveResizeMethod) -> WindowManagerResult<Self> {
        let (conn, screen) = x11rb::connect(None)?;

        // Get the screen size
        let (width, height, root) = {
            let screen = &conn.setup().roots[screen];
            (screen.width_in_pixels as u32, screen.height_in_pixels as u32, screen.root)
        };

        let atoms = AtomCollection::new(&conn)?.reply()?;

        // Nothing reads these events, selecting them only announces interest as xlib clients do
        let aux = ChangeWindowAttributesAux::new().event_mask(EventMask::SUBSTRUCTURE_NOTIFY);
        conn.change_window_attributes(root, &aux)?.check()?;

        debug!("connect: screen: {}, root: {}, w: {}, h: {}, method: {}", screen, root, width, height, method);
        Ok(Self { conn, atoms, method, screen, root, width, height })
    }

    /// Get the default screen number
    pub fn screen(&self) -> usize {
        self.screen
    }

    // Atoms interned at connect time, anything else goes to the server
    fn cached_atom(&self, name: &str) -> Option<xproto::Atom> {
        match name {
            "_NET_SUPPORTED" => Some(self.atoms._NET_SUPPORTED),
            "_NET_CLIENT_LIST" => Some(self.atoms._NET_CLIENT_LIST),
            "_NET_MOVERESIZE_WINDOW" => Some(self.atoms._NET_MOVERESIZE_WINDOW),
            "_NET_WM_NAME" => Some(self.atoms._NET_WM_NAME),
            "_NET_WM_PID" => Some(self.atoms._NET_WM_PID),
            "_WIN_CLIENT_LIST" => Some(self.atoms._WIN_CLIENT_LIST),
            "UTF8_STRING" => Some(self.atoms.UTF8_STRING),
            _ => None,
        }
    }

    /// Send the event to the root window ensuring that a flush is called
    fn send_event(&self, msg: ClientMessageEvent) -> WindowManagerResult<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY;
        self.conn.send_event(false, self.root, mask, &msg)?.check()?;
        self.conn.flush()?;
        debug!("send_event: win: {}", msg.window);
        Ok(())
    }
}

/// Map protocol errors raised by a move/resize onto the domain errors callers report on
fn resize_error(err: ReplyError, win: WindowId) -> ErrorWrapper {
    if let ReplyError::X11Error(ref x11) = err {
        match x11.error_kind {
            ErrorKind::Value => return WindowManagerError::BadValue.into(),
            ErrorKind::Window => return WindowManagerError::BadWindow(win.0).into(),
            _ => (),
        }
    }
    err.into()
}

impl DisplayServer for X11Server {
    fn root(&self) -> WindowId {
        WindowId(self.root)
    }

    fn screen_size(&self) -> ScreenSize {
        ScreenSize::new(self.width, self.height)
    }

    fn intern_atom(&self, name: &str) -> WindowManagerResult<AtomId> {
        if let Some(atom) = self.cached_atom(name) {
            return Ok(AtomId(atom));
        }
        let atom = self.conn.intern_atom(false, name.as_bytes())?.reply()?.atom;
        trace!("intern_atom: {}: {}", name, atom);
        Ok(AtomId(atom))
    }

    fn get_property(
        &self, win: WindowId, property: AtomId, type_: AtomId, long_length: u32,
    ) -> WindowManagerResult<RawProperty> {
        let reply = self.conn.get_property(false, win.0, property.0, type_.0, 0, long_length)?.reply()?;
        trace!(
            "get_property: id: {}, prop: {}, type: {}, format: {}, items: {}",
            win,
            property,
            reply.type_,
            reply.format,
            reply.value_len
        );
        Ok(RawProperty { type_: AtomId(reply.type_), format: reply.format, value_len: reply.value_len, value: reply.value })
    }

    fn geometry(&self, win: WindowId) -> WindowManagerResult<Geometry> {
        // The returned x, y location is relative to its parent window making the values useless
        // on their own. Using `translate_coordinates` against the root maps them into real world
        // coordinates.
        let g = self.conn.get_geometry(win.0)?.reply()?;
        let t = self.conn.translate_coordinates(win.0, g.root, g.x, g.y)?.reply()?;

        let geometry = Geometry::new(t.dst_x as i32, t.dst_y as i32, g.width as u32, g.height as u32);
        debug!("geometry: id: {}, {}", win, geometry);
        Ok(geometry)
    }

    fn move_resize(&self, win: WindowId, geometry: Geometry) -> WindowManagerResult<()> {
        match self.method {
            MoveResizeMethod::Configure => {
                let aux = ConfigureWindowAux::new()
                    .x(geometry.x)
                    .y(geometry.y)
                    .width(geometry.width)
                    .height(geometry.height);
                self.conn.configure_window(win.0, &aux)?.check().map_err(|err| resize_error(err, win))?;
                self.conn.flush()?;
            },
            MoveResizeMethod::ClientMessage => {
                // Gravity is the lower byte, zero means use the window's own gravity
                let flags = MOVE_RESIZE_WINDOW_X
                    | MOVE_RESIZE_WINDOW_Y
                    | MOVE_RESIZE_WINDOW_WIDTH
                    | MOVE_RESIZE_WINDOW_HEIGHT
                    | MOVE_RESIZE_SOURCE_PAGER;
                self.send_event(ClientMessageEvent::new(
                    32,
                    win.0,
                    self.atoms._NET_MOVERESIZE_WINDOW,
                    [flags, geometry.x as u32, geometry.y as u32, geometry.width, geometry.height],
                ))
                .map_err(|err| match err {
                    ErrorWrapper::Reply(err) => resize_error(err, win),
                    err => err,
                })?;
            },
        }
        debug!("move_resize: id: {}, {}", win, geometry);
        Ok(())
    }
}
