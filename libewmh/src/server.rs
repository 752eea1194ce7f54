use crate::{AtomId, Geometry, RawProperty, ScreenSize, WindowId, WindowManagerResult};

/// DisplayServer is the set of synchronous requests `WindowManager` needs from the X server.
/// `X11Server` is the real thing, tests swap in an in memory double.
pub trait DisplayServer {
    /// Root window of the default screen
    fn root(&self) -> WindowId;

    /// Size in pixels of the default screen
    fn screen_size(&self) -> ScreenSize;

    /// Resolve the given name to its atom, creating it if needed
    fn intern_atom(&self, name: &str) -> WindowManagerResult<AtomId>;

    /// Read up to `long_length` 32bit units of the given property from offset 0 without deleting
    /// it. A missing property is reported with type `AtomId::NONE` and a property of another
    /// type with its actual type and no data, as the server does.
    fn get_property(
        &self, win: WindowId, property: AtomId, type_: AtomId, long_length: u32,
    ) -> WindowManagerResult<RawProperty>;

    /// Get the window's size and its origin translated to root window coordinates
    fn geometry(&self, win: WindowId) -> WindowManagerResult<Geometry>;

    /// Move and resize the window in a single request
    fn move_resize(&self, win: WindowId, geometry: Geometry) -> WindowManagerResult<()>;
}
