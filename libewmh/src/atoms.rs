//! Well known atoms interned once at connection time.
//!
//! Property reads resolve their names on every call, these are only the atoms the X11 backend
//! needs for its own requests.
x11rb::atom_manager! {
    pub AtomCollection: AtomCollectionCookie {
        _NET_SUPPORTED,
        _NET_CLIENT_LIST,
        _NET_MOVERESIZE_WINDOW,
        _NET_WM_NAME,
        _NET_WM_PID,
        _WIN_CLIENT_LIST,
        UTF8_STRING,
    }
}
