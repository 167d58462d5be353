use cosmos_core::Route;

/// Current route plus the history that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    /// Starts at the entry route.
    pub fn new() -> Self {
        Self {
            current: Route::Entry,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Routes visited before the current one, oldest first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Moves to `route`. Navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        tracing::info!("[Router] {} -> {}", self.current, route);
        self.history.push(self.current);
        self.current = route;
        true
    }

    /// Navigates by path, e.g. `"/meditation"`.
    pub fn navigate_path(&mut self, path: &str) -> Option<Route> {
        let route = Route::from_path(path)?;
        self.navigate(route);
        Some(route)
    }

    /// Returns to the previous route.
    pub fn back(&mut self) -> Option<Route> {
        let previous = self.history.pop()?;
        tracing::info!("[Router] back {} -> {}", self.current, previous);
        self.current = previous;
        Some(previous)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
