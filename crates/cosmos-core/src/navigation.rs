//! Logical routes of the application.

use serde::{Deserialize, Serialize};

/// The two screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Worry entry screen
    #[default]
    Entry,
    /// Meditation run
    Meditation,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Meditation => "/meditation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Entry => "Home",
            Route::Meditation => "Meditation",
        }
    }

    /// Resolves a path back to its route.
    pub fn from_path(path: &str) -> Option<Route> {
        [Route::Entry, Route::Meditation]
            .into_iter()
            .find(|route| route.path() == path)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
