use leptos::*;

/// Where the router should go next.
///
/// Session logic and guards only write here; the component mounted inside
/// the router is the single consumer.
#[derive(Debug, Clone, Copy)]
pub struct NavigationIntent {
    target: RwSignal<Option<String>>,
}

impl NavigationIntent {
    pub fn new() -> Self {
        Self {
            target: create_rw_signal(None),
        }
    }

    pub fn request(&self, path: &str) {
        self.target.set(Some(path.to_string()));
    }

    /// Tracked read of the pending target.
    pub fn pending(&self) -> Option<String> {
        self.target.get()
    }

    pub fn take(&self) -> Option<String> {
        let target = self.target.get_untracked();
        if target.is_some() {
            self.target.set(None);
        }
        target
    }
}

impl Default for NavigationIntent {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_navigation() -> NavigationIntent {
    use_context::<NavigationIntent>().unwrap_or_else(|| {
        let intent = NavigationIntent::new();
        provide_context(intent);
        intent
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn take_consumes_the_latest_request() {
        with_runtime(|| {
            let intent = NavigationIntent::new();
            assert!(intent.take().is_none());

            intent.request("/dashboard");
            intent.request("/login");
            assert_eq!(intent.pending().as_deref(), Some("/login"));
            assert_eq!(intent.take().as_deref(), Some("/login"));
            assert!(intent.take().is_none());
        });
    }

    #[test]
    fn use_navigation_shares_one_intent_per_context() {
        with_runtime(|| {
            let first = use_navigation();
            first.request("/empleados");
            assert_eq!(use_navigation().take().as_deref(), Some("/empleados"));
        });
    }
}
