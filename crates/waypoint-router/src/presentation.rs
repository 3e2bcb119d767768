//! Presentation slots
//!
//! A router presents at most one sheet and one full screen cover. Each lives
//! in a [`PresentationSlot`]: a shared cell the parent router writes when it
//! presents, and the child router hosting the presented flow clears when it
//! closes itself. The child holds the slot, never the parent router.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use waypoint_core::{Destination, RouteInfo};

use crate::observe::ChangeNotifier;

/// Kind of modal presentation a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    /// Modal sheet
    Sheet,
    /// Full screen cover
    FullScreenCover,
}

/// Shared cell holding the destination currently presented by a router
pub struct PresentationSlot<R> {
    kind: PresentationKind,
    current: Rc<RefCell<Option<Destination<R>>>>,
    /// Bumped on every write
    generation: Rc<Cell<u64>>,
    notifier: ChangeNotifier,
}

impl<R: RouteInfo> PresentationSlot<R> {
    /// Create an empty slot reporting changes through `notifier`
    pub fn new(kind: PresentationKind, notifier: ChangeNotifier) -> Self {
        Self {
            kind,
            current: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            notifier,
        }
    }

    /// Kind of presentation
    pub fn kind(&self) -> PresentationKind {
        self.kind
    }

    /// Presented destination, if any
    pub fn get(&self) -> Option<Destination<R>> {
        self.current.borrow().clone()
    }

    /// Number of writes made through any handle to this slot
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Replace the presented destination
    pub fn set(&self, destination: Option<Destination<R>>) {
        self.current.replace(destination);
        self.generation.set(self.generation.get() + 1);
        self.notifier.notify(match self.kind {
            PresentationKind::Sheet => "sheet",
            PresentationKind::FullScreenCover => "full_screen_cover",
        });
    }

    /// Present a destination
    pub fn present(&self, destination: Destination<R>) {
        self.set(Some(destination));
    }

    /// Clear the slot
    pub fn clear(&self) {
        self.set(None);
    }

    /// Whether something is presented
    pub fn is_active(&self) -> bool {
        self.current.borrow().is_some()
    }
}

impl<R> Clone for PresentationSlot<R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            current: Rc::clone(&self.current),
            generation: Rc::clone(&self.generation),
            notifier: self.notifier.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for PresentationSlot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationSlot")
            .field("kind", &self.kind)
            .field("current", &self.current.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Route(&'static str);

    impl RouteInfo for Route {
        fn path(&self) -> String {
            format!("/{}", self.0)
        }
    }

    #[test]
    fn test_present_and_clear() {
        let slot = PresentationSlot::new(PresentationKind::Sheet, ChangeNotifier::new());
        assert!(!slot.is_active());

        slot.present(Destination::sheet(Route("login")));
        assert!(slot.is_active());
        assert_eq!(slot.get().unwrap().route(), &Route("login"));

        slot.clear();
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_clones_share_contents() {
        let parent = PresentationSlot::new(PresentationKind::FullScreenCover, ChangeNotifier::new());
        let child_binding = parent.clone();

        parent.present(Destination::full_screen_cover(Route("player")));
        assert!(child_binding.is_active());

        child_binding.clear();
        assert!(!parent.is_active());
        assert_eq!(child_binding.kind(), PresentationKind::FullScreenCover);
    }

    #[test]
    fn test_changes_notify_owner() {
        let notifier = ChangeNotifier::new();
        let slot = PresentationSlot::new(PresentationKind::Sheet, notifier.clone());

        slot.present(Destination::sheet(Route("a")));
        slot.clone().clear();
        assert_eq!(notifier.revision(), 2);
    }

    #[test]
    fn test_generation_counts_writes_through_clones() {
        let slot = PresentationSlot::new(PresentationKind::Sheet, ChangeNotifier::new());
        let binding = slot.clone();
        assert_eq!(slot.generation(), 0);

        slot.present(Destination::sheet(Route("login")));
        let first = binding.generation();
        slot.present(Destination::sheet(Route("login")));

        // Same route, new write
        assert_eq!(slot.get().unwrap(), Destination::sheet(Route("login")));
        assert_eq!(binding.generation(), first + 1);
    }
}
