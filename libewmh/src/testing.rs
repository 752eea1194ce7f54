//! In memory `DisplayServer` that answers property queries the way an X server does.
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;

use x11rb::protocol::xproto::AtomEnum;

use crate::{
    server::DisplayServer, AtomId, Geometry, RawProperty, ScreenSize, WindowId, WindowManagerError,
    WindowManagerResult,
};

struct MockProperty {
    type_: AtomId,
    format: u8,
    value: Vec<u8>,
}

pub(crate) struct MockServer {
    root: WindowId,
    screen: ScreenSize,
    atoms: RefCell<HashMap<String, AtomId>>,
    next_atom: Cell<u32>,
    properties: RefCell<HashMap<(WindowId, AtomId), MockProperty>>,
    geometries: RefCell<HashMap<WindowId, Geometry>>,
    bad_windows: RefCell<HashSet<WindowId>>,
    rejected: RefCell<HashMap<WindowId, WindowManagerError>>,
    queries: RefCell<Vec<AtomId>>,
    move_resizes: RefCell<Vec<(WindowId, Geometry)>>,
}

impl MockServer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let mut atoms = HashMap::new();
        for (name, atom) in [
            ("ATOM", AtomEnum::ATOM),
            ("CARDINAL", AtomEnum::CARDINAL),
            ("STRING", AtomEnum::STRING),
            ("WINDOW", AtomEnum::WINDOW),
            ("WM_NAME", AtomEnum::WM_NAME),
        ] {
            atoms.insert(name.to_owned(), AtomId::from(atom));
        }
        Self {
            root: WindowId(0x100),
            screen: ScreenSize::new(width, height),
            atoms: RefCell::new(atoms),
            next_atom: Cell::new(300),
            properties: RefCell::new(HashMap::new()),
            geometries: RefCell::new(HashMap::new()),
            bad_windows: RefCell::new(HashSet::new()),
            rejected: RefCell::new(HashMap::new()),
            queries: RefCell::new(Vec::new()),
            move_resizes: RefCell::new(Vec::new()),
        }
    }

    /// Atom for the given name, interning it if needed
    pub(crate) fn atom(&self, name: &str) -> AtomId {
        let mut atoms = self.atoms.borrow_mut();
        if let Some(atom) = atoms.get(name) {
            return *atom;
        }
        let atom = AtomId(self.next_atom.get());
        self.next_atom.set(atom.0 + 1);
        atoms.insert(name.to_owned(), atom);
        atom
    }

    pub(crate) fn set_property(&self, win: WindowId, name: &str, type_name: &str, format: u8, value: Vec<u8>) {
        let (prop, type_) = (self.atom(name), self.atom(type_name));
        self.properties.borrow_mut().insert((win, prop), MockProperty { type_, format, value });
    }

    pub(crate) fn set_string(&self, win: WindowId, name: &str, type_name: &str, value: &str) {
        self.set_property(win, name, type_name, 8, value.as_bytes().to_vec());
    }

    pub(crate) fn set_u32s(&self, win: WindowId, name: &str, type_name: &str, values: &[u32]) {
        self.set_property(win, name, type_name, 32, values.iter().flat_map(|x| x.to_ne_bytes()).collect());
    }

    pub(crate) fn set_geometry(&self, win: WindowId, geometry: Geometry) {
        self.geometries.borrow_mut().insert(win, geometry);
    }

    /// Every request naming this window fails as if it had been destroyed
    pub(crate) fn set_bad_window(&self, win: WindowId) {
        self.bad_windows.borrow_mut().insert(win);
    }

    /// Move/resize requests for this window fail with the given error
    pub(crate) fn reject_move_resize(&self, win: WindowId, err: WindowManagerError) {
        self.rejected.borrow_mut().insert(win, err);
    }

    /// Number of times the named property was queried
    pub(crate) fn property_queries(&self, name: &str) -> usize {
        let atom = self.atom(name);
        self.queries.borrow().iter().filter(|x| **x == atom).count()
    }

    pub(crate) fn move_resizes(&self) -> Vec<(WindowId, Geometry)> {
        self.move_resizes.borrow().clone()
    }

    fn check_window(&self, win: WindowId) -> WindowManagerResult<()> {
        if self.bad_windows.borrow().contains(&win) {
            return Err(WindowManagerError::BadWindow(win.0).into());
        }
        Ok(())
    }
}

impl DisplayServer for MockServer {
    fn root(&self) -> WindowId {
        self.root
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    fn intern_atom(&self, name: &str) -> WindowManagerResult<AtomId> {
        Ok(self.atom(name))
    }

    fn get_property(
        &self, win: WindowId, property: AtomId, type_: AtomId, long_length: u32,
    ) -> WindowManagerResult<RawProperty> {
        self.check_window(win)?;
        self.queries.borrow_mut().push(property);

        let properties = self.properties.borrow();
        let prop = match properties.get(&(win, property)) {
            Some(prop) => prop,
            None => return Ok(RawProperty { type_: AtomId::NONE, ..Default::default() }),
        };
        if prop.type_ != type_ {
            return Ok(RawProperty { type_: prop.type_, format: prop.format, ..Default::default() });
        }

        let len = prop.value.len().min(long_length as usize * 4);
        let value = prop.value[..len].to_vec();
        let value_len = (len / (prop.format as usize / 8)) as u32;
        Ok(RawProperty { type_: prop.type_, format: prop.format, value_len, value })
    }

    fn geometry(&self, win: WindowId) -> WindowManagerResult<Geometry> {
        self.check_window(win)?;
        self.geometries.borrow().get(&win).copied().ok_or_else(|| WindowManagerError::BadWindow(win.0).into())
    }

    fn move_resize(&self, win: WindowId, geometry: Geometry) -> WindowManagerResult<()> {
        self.check_window(win)?;
        if let Some(err) = self.rejected.borrow().get(&win) {
            return Err(err.clone().into());
        }
        self.move_resizes.borrow_mut().push((win, geometry));
        Ok(())
    }
}

/// Shared buffer the log lines of a test are written to
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber collecting every warning or worse and return the messages logged
pub(crate) fn capture_warnings<F: FnOnce()>(f: F) -> Vec<String> {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap().lines().map(|x| x.trim().to_owned()).filter(|x| !x.is_empty()).collect()
}
