use std::time::Duration;

use crate::{GeometryFilter, MoveResizeMethod};

/// Pause between two windows so the server isn't flooded with back to back requests
pub const DEFAULT_DELAY: Duration = Duration::from_nanos(16_969_696);

/// Config carries every runtime option and is owned by the `WindowManager`
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) verbose: bool,
    pub(crate) delay: Duration,
    pub(crate) rounds: Option<u64>,
    pub(crate) filter: GeometryFilter,
    pub(crate) method: MoveResizeMethod,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            delay: DEFAULT_DELAY,
            rounds: None,
            filter: GeometryFilter::default(),
            method: MoveResizeMethod::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with the defaults
    ///
    /// ### Examples
    /// ```
    /// use libewmh::prelude::*;
    /// let config = Config::new().verbose(true);
    /// assert!(config.is_verbose());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable diagnostics and the window listing
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the pause taken after each window is shuffled
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Stop after the given number of passes over the client list
    ///
    /// ### Arguments
    /// * `rounds` - number of passes or None to loop forever
    pub fn rounds(mut self, rounds: Option<u64>) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the filter deciding which windows may be shuffled
    ///
    /// ### Examples
    /// ```
    /// use libewmh::prelude::*;
    /// let config = Config::new().filter(GeometryFilter::none());
    /// assert_eq!(config.geometry_filter(), &GeometryFilter::none());
    /// ```
    pub fn filter(mut self, filter: GeometryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the request used to move and resize windows
    pub fn method(mut self, method: MoveResizeMethod) -> Self {
        self.method = method;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn pause(&self) -> Duration {
        self.delay
    }

    pub fn max_rounds(&self) -> Option<u64> {
        self.rounds
    }

    pub fn geometry_filter(&self) -> &GeometryFilter {
        &self.filter
    }

    pub fn move_resize_method(&self) -> MoveResizeMethod {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert!(!config.is_verbose());
        assert_eq!(config.pause(), Duration::from_nanos(16_969_696));
        assert_eq!(config.max_rounds(), None);
        assert_eq!(config.geometry_filter(), &GeometryFilter::default());
        assert_eq!(config.move_resize_method(), MoveResizeMethod::Configure);
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .verbose(true)
            .delay(Duration::ZERO)
            .rounds(Some(3))
            .filter(GeometryFilter::none())
            .method(MoveResizeMethod::ClientMessage);
        assert!(config.is_verbose());
        assert_eq!(config.pause(), Duration::ZERO);
        assert_eq!(config.max_rounds(), Some(3));
        assert_eq!(config.geometry_filter(), &GeometryFilter::none());
        assert_eq!(config.move_resize_method(), MoveResizeMethod::ClientMessage);
    }
}
