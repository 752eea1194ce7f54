use std::fmt;

use rand::Rng;
use x11rb::protocol::xproto::{self, AtomEnum};

/// Size in bytes of the 32bit unit the X protocol measures property lengths in
pub const UNIT_SIZE: usize = 4;

/// Maximum number of 32bit units requested for any one property
pub const MAX_PROPERTY_LEN: u32 = 1024;

/// WindowId references a server side window object owned by the window manager or its clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

impl From<xproto::Window> for WindowId {
    fn from(val: xproto::Window) -> Self {
        WindowId(val)
    }
}

impl From<WindowId> for u32 {
    fn from(val: WindowId) -> Self {
        val.0
    }
}

// Implement format! support
impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// AtomId is an interned identifier for a property, type or feature name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub u32);

impl AtomId {
    /// The `None` atom the server reports for a property that does not exist
    pub const NONE: AtomId = AtomId(x11rb::NONE);
}

impl From<AtomEnum> for AtomId {
    fn from(val: AtomEnum) -> Self {
        AtomId(val.into())
    }
}

impl From<AtomId> for xproto::Atom {
    fn from(val: AtomId) -> Self {
        val.0
    }
}

// Implement format! support
impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen size in pixels of the default screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// Implement format! support
impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Geometry of a window with its origin in root window coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Draw a new geometry with every component uniform in `[1, screen - 1]` of the matching
    /// screen dimension. Size is drawn from the same ranges as position.
    ///
    /// The screen must be at least 2x2 pixels.
    pub fn random<R: Rng + ?Sized>(screen: ScreenSize, rng: &mut R) -> Self {
        let x = rng.gen_range(1..screen.width);
        let y = rng.gen_range(1..screen.height);
        let width = rng.gen_range(1..screen.width);
        let height = rng.gen_range(1..screen.height);
        Self { x: x as i32, y: y as i32, width, height }
    }
}

// Implement format! support
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x: {}, y: {}, w: {}, h: {}", self.x, self.y, self.width, self.height)
    }
}

/// GeometryFilter decides which windows are sane enough to be shuffled. The defaults skip
/// windows that sit at or beyond the top/left screen edge or have no size, which tends to
/// catch minimized and off screen windows. Multi monitor layouts with negative coordinates
/// will be skipped too, hence the option to relax or disable it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryFilter {
    pub min_x: i32,
    pub min_y: i32,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for GeometryFilter {
    fn default() -> Self {
        Self { min_x: 1, min_y: 1, min_width: 1, min_height: 1 }
    }
}

impl GeometryFilter {
    /// A filter that accepts every geometry
    pub fn none() -> Self {
        Self { min_x: i32::MIN, min_y: i32::MIN, min_width: 0, min_height: 0 }
    }

    /// Check if the given geometry passes the filter
    pub fn accepts(&self, geometry: &Geometry) -> bool {
        geometry.x >= self.min_x
            && geometry.y >= self.min_y
            && geometry.width >= self.min_width
            && geometry.height >= self.min_height
    }
}

/// MoveResizeMethod selects the request used to apply a new geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveResizeMethod {
    /// Core protocol `ConfigureWindow` request
    #[default]
    Configure,

    /// EWMH `_NET_MOVERESIZE_WINDOW` client message sent to the root window
    ClientMessage,
}

// Implement format! support
impl fmt::Display for MoveResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// RawProperty is the server's answer to a property query before any type checking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperty {
    pub type_: AtomId,
    pub format: u8,
    pub value_len: u32,
    pub value: Vec<u8>,
}

/// PropertyValue owns the bytes of a successfully read property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyValue {
    bytes: Vec<u8>,
}

impl PropertyValue {
    /// Copy out the bytes of the given reply. The length kept is the byte width implied by the
    /// reported format times the item count, clamped to what was actually received.
    pub fn from_raw(raw: RawProperty) -> Self {
        let width = raw.format as usize / (32 / UNIT_SIZE);
        let len = width * raw.value_len as usize;
        let mut bytes = raw.value;
        bytes.truncate(len);
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the value as a list of 32bit items, any trailing partial item is dropped
    pub fn to_u32s(&self) -> Vec<u32> {
        self.bytes
            .chunks_exact(UNIT_SIZE)
            .map(|x| u32::from_ne_bytes([x[0], x[1], x[2], x[3]]))
            .collect()
    }

    /// Decode the value as a list of window ids
    pub fn to_window_ids(&self) -> Vec<WindowId> {
        self.to_u32s().into_iter().map(WindowId).collect()
    }

    /// Decode the value as a string ending at the first NUL byte if any
    pub fn to_string_lossy(&self) -> String {
        let end = self.bytes.iter().position(|x| *x == 0).unwrap_or(self.bytes.len());
        String::from_utf8_lossy(&self.bytes[..end]).into_owned()
    }
}

/// ClientList is the snapshot of the windows the window manager manages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientList {
    windows: Vec<WindowId>,
    byte_len: usize,
}

impl ClientList {
    pub fn from_value(value: &PropertyValue) -> Self {
        Self { windows: value.to_window_ids(), byte_len: value.len() }
    }

    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }

    /// Length in bytes of the property the list was read from
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// RandomizeOutcome reports what happened to a single window during a shuffle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomizeOutcome {
    /// The new geometry was sent to the server
    Applied(Geometry),

    /// The current geometry did not pass the filter so nothing was sent
    Skipped(Geometry),

    /// The geometry could not be read or the move/resize was rejected
    Failed,
}
