//! Navigation stack entries

use waypoint_core::{Destination, RouteInfo};

/// A navigation stack entry
///
/// The same route may sit on a stack more than once, so every entry gets a
/// unique key a renderer can use to tell the copies apart.
#[derive(Debug, Clone)]
pub struct StackEntry<R> {
    /// The destination
    pub destination: Destination<R>,
    /// Unique key for this entry
    pub key: String,
}

impl<R: RouteInfo> StackEntry<R> {
    /// Create a new stack entry
    pub fn new(destination: Destination<R>) -> Self {
        Self {
            destination,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Concatenate the path segments of a stack, bottom to top
pub(crate) fn join_paths<R: RouteInfo>(entries: &[StackEntry<R>]) -> String {
    entries
        .iter()
        .map(|entry| entry.destination.path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Route(&'static str);

    impl RouteInfo for Route {
        fn path(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_entries_get_distinct_keys() {
        let a = StackEntry::new(Destination::push(Route("a")));
        let b = StackEntry::new(Destination::push(Route("a")));
        assert_ne!(a.key, b.key);
        assert_eq!(a.destination, b.destination);
    }

    #[test]
    fn test_join_paths() {
        let entries: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|p| StackEntry::new(Destination::push(Route(p))))
            .collect();
        assert_eq!(join_paths(&entries), "abc");
        assert_eq!(join_paths::<Route>(&[]), "");
    }
}
