use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::extract::RestoredRoute;
use crate::location::Location;

/// The host's window: where it is, and how to move it.
///
/// A browser host maps these onto `window.location`; a native host may open
/// the system browser for [`Navigator::redirect`].
pub trait Navigator: Send + Sync {
    /// The page currently shown.
    fn location(&self) -> Location;

    /// Leave the page for `url`. Terminal for the current page context.
    fn redirect(&self, url: &str);

    /// Open `url` in a popup instead of navigating away.
    fn open_popup(&self, url: &str) {
        self.redirect(url);
    }

    /// Rewrite the visible URL without a navigation, once the token block
    /// has been consumed.
    fn replace_route(&self, route: &RestoredRoute);
}

/// Navigator that only records what it was asked to do.
///
/// Useful for native hosts that drive navigation themselves, and in tests.
#[derive(Debug)]
pub struct MemoryNavigator {
    location: Mutex<Location>,
    redirects: Mutex<Vec<String>>,
    popups: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(location: Location) -> Self {
        Self {
            location: Mutex::new(location),
            redirects: Mutex::new(Vec::new()),
            popups: Mutex::new(Vec::new()),
        }
    }

    pub fn set_location(&self, location: Location) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = location;
    }

    /// URLs passed to [`Navigator::redirect`], oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs passed to [`Navigator::open_popup`], oldest first.
    pub fn popups(&self) -> Vec<String> {
        self.popups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Location {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn redirect(&self, url: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }

    fn open_popup(&self, url: &str) {
        self.popups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }

    fn replace_route(&self, route: &RestoredRoute) {
        let href = route.href();
        match Location::parse(&href) {
            Ok(location) => self.set_location(location),
            Err(err) => warn!(href = %href, error = %err, "cannot restore route"),
        }
    }
}
