//! Single-stack router
//!
//! A [`Router`] owns one navigation stack plus the sheet and full screen cover
//! it is presenting. It is a cheap-clone handle: clones share state, which is
//! how a pushed screen and its parent see the same stack. All state lives
//! behind a `RefCell` whose borrow is never held across a call into user code
//! (validators, dismiss callbacks), so callbacks may navigate re-entrantly.
//!
//! # Validation gates
//!
//! Before routing, the router asks the destination for a gate. If one comes
//! back, the destination is parked in a [`Suspension`], the gate is routed in
//! its place, and the gate's dismiss callback is extended with a hook that
//! resumes the suspension: success routes the parked destination (or flushes
//! the pending multi-push queue), failure abandons it.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tokio::sync::watch;

use waypoint_core::{
    last_contiguous_index, Destination, DismissCallback, NavigationMode, RouteInfo, RouterConfig,
};

use crate::observe::ChangeNotifier;
use crate::presentation::{PresentationKind, PresentationSlot};
use crate::stack::{join_paths, StackEntry};
use crate::suspension::Suspension;
use crate::view::RouteView;

/// Point-in-time copy of a router's state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSnapshot<R> {
    /// Routes on the stack, bottom to top
    pub stack: Vec<R>,
    /// Concatenated path of the stack
    pub current_path: String,
    /// Presented sheet
    pub sheet: Option<R>,
    /// Presented full screen cover
    pub full_screen_cover: Option<R>,
    /// Routes of an unfinished multi-push
    pub pending: Vec<R>,
}

/// Mutable router state
struct RouterState<R> {
    stack: Vec<StackEntry<R>>,
    current_path: String,
    pending: Vec<Destination<R>>,
    suspensions: Vec<Suspension<R>>,
}

impl<R> Default for RouterState<R> {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            current_path: String::new(),
            pending: Vec::new(),
            suspensions: Vec::new(),
        }
    }
}

struct RouterShared<R> {
    state: RefCell<RouterState<R>>,
    sheet: PresentationSlot<R>,
    full_screen_cover: PresentationSlot<R>,
    /// Parent slot this router was presented in; `None` for a root router
    is_presented: Option<PresentationSlot<R>>,
    notifier: ChangeNotifier,
    config: RouterConfig,
}

/// Navigation stack controller for one surface
pub struct Router<R> {
    shared: Rc<RouterShared<R>>,
}

impl<R> Clone for Router<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<R: RouteInfo> Default for Router<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RouteInfo> Router<R> {
    /// Create a root router with default settings
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a root router
    pub fn with_config(config: RouterConfig) -> Self {
        Self::build(None, config)
    }

    /// Create a router hosting a flow presented in `binding`
    ///
    /// Dismissing this router with an empty stack clears `binding`.
    pub fn presented_in(binding: PresentationSlot<R>, config: RouterConfig) -> Self {
        Self::build(Some(binding), config)
    }

    fn build(is_presented: Option<PresentationSlot<R>>, config: RouterConfig) -> Self {
        let notifier = ChangeNotifier::new();
        Self {
            shared: Rc::new(RouterShared {
                state: RefCell::new(RouterState::default()),
                sheet: PresentationSlot::new(PresentationKind::Sheet, notifier.clone()),
                full_screen_cover: PresentationSlot::new(
                    PresentationKind::FullScreenCover,
                    notifier.clone(),
                ),
                is_presented,
                notifier,
                config,
            }),
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Destinations on the stack, bottom to top
    pub fn stack(&self) -> Vec<Destination<R>> {
        self.shared
            .state
            .borrow()
            .stack
            .iter()
            .map(|entry| entry.destination.clone())
            .collect()
    }

    /// Stack entries with their keys, bottom to top
    pub fn entries(&self) -> Vec<StackEntry<R>> {
        self.shared.state.borrow().stack.clone()
    }

    /// Number of entries on the stack
    pub fn depth(&self) -> usize {
        self.shared.state.borrow().stack.len()
    }

    /// Concatenated path segments of the stack
    pub fn current_path(&self) -> String {
        self.shared.state.borrow().current_path.clone()
    }

    /// Destinations of an unfinished multi-push
    pub fn pending_routes(&self) -> Vec<Destination<R>> {
        self.shared.state.borrow().pending.clone()
    }

    /// Requests waiting on a validation gate, oldest first
    pub fn suspensions(&self) -> Vec<Suspension<R>> {
        self.shared.state.borrow().suspensions.clone()
    }

    /// Presented sheet
    pub fn presenting_sheet(&self) -> Option<Destination<R>> {
        self.shared.sheet.get()
    }

    /// Presented full screen cover
    pub fn presenting_full_screen_cover(&self) -> Option<Destination<R>> {
        self.shared.full_screen_cover.get()
    }

    /// Whether a sheet or full screen cover is presented
    pub fn is_presenting(&self) -> bool {
        self.shared.sheet.is_active() || self.shared.full_screen_cover.is_active()
    }

    /// Slot holding the presented sheet
    pub fn sheet_slot(&self) -> &PresentationSlot<R> {
        &self.shared.sheet
    }

    /// Slot holding the presented full screen cover
    pub fn full_screen_cover_slot(&self) -> &PresentationSlot<R> {
        &self.shared.full_screen_cover
    }

    /// Parent slot this router was presented in
    pub fn is_presented(&self) -> Option<&PresentationSlot<R>> {
        self.shared.is_presented.as_ref()
    }

    /// Router settings
    pub fn config(&self) -> &RouterConfig {
        &self.shared.config
    }

    /// Current state revision
    pub fn revision(&self) -> u64 {
        self.shared.notifier.revision()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.notifier.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> NavigationSnapshot<R> {
        let state = self.shared.state.borrow();
        NavigationSnapshot {
            stack: state
                .stack
                .iter()
                .map(|entry| entry.destination.route().clone())
                .collect(),
            current_path: state.current_path.clone(),
            sheet: self.shared.sheet.get().map(|d| d.route().clone()),
            full_screen_cover: self.shared.full_screen_cover.get().map(|d| d.route().clone()),
            pending: state.pending.iter().map(|d| d.route().clone()).collect(),
        }
    }

    /// Whether both handles point at the same router
    pub fn ptr_eq(&self, other: &Router<R>) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Route to a destination
    ///
    /// The destination's validation hook may redirect through a gate first;
    /// in that case the destination itself is only routed once the gate is
    /// dismissed with success.
    pub fn route_to(&self, destination: Destination<R>) {
        self.route_through_gates(destination, Vec::new());
    }

    /// Route `destination`, following gates; `chain` holds the ids of the
    /// suspensions this request has created so far
    fn route_through_gates(&self, destination: Destination<R>, mut chain: Vec<String>) {
        if let Some(gate) = destination.is_route_valid() {
            if chain.len() >= self.shared.config.max_redirect_depth {
                tracing::warn!(
                    route = ?destination.route(),
                    depth = chain.len(),
                    "Validation redirect limit reached, dropping navigation"
                );
                self.shared
                    .state
                    .borrow_mut()
                    .suspensions
                    .retain(|suspension| !chain.iter().any(|id| id == suspension.id()));
                return;
            }

            tracing::debug!(
                route = ?destination.route(),
                gate = ?gate.route(),
                "Navigation intercepted by validation gate"
            );
            let suspension = Suspension::new(destination);
            chain.push(suspension.id().to_string());
            self.shared
                .state
                .borrow_mut()
                .suspensions
                .push(suspension.clone());

            let gate = gate.with_dismiss_hook(self.resume_hook(suspension));
            self.route_through_gates(gate, chain);
            return;
        }

        match destination.mode() {
            NavigationMode::Push => self.push(destination),
            NavigationMode::Sheet => self.shared.sheet.present(destination),
            NavigationMode::FullScreenCover => self.shared.full_screen_cover.present(destination),
        }
    }

    /// Push several destinations in order
    ///
    /// The list is kept as the pending queue while it is routed; each
    /// destination leaves the queue when it is pushed, so a gate that
    /// interrupts the chain can later flush what is left.
    pub fn push_multiple(&self, routes: Vec<Destination<R>>) {
        self.shared.state.borrow_mut().pending = routes.clone();
        for route in routes {
            self.route_to(route);
        }
    }

    /// Replace the stack with the given destinations
    ///
    /// An empty list is the same as [`Router::pop_to_root`].
    pub fn push_replacement(&self, routes: Vec<Destination<R>>) {
        if routes.is_empty() {
            self.pop_to_root();
        } else {
            self.mutate_stack("replace", |stack| stack.clear());
            self.push_multiple(routes);
        }
    }

    /// Remove every entry from the stack
    pub fn pop_to_root(&self) {
        self.mutate_stack("pop_to_root", |stack| stack.clear());
    }

    /// Whether the stack has an entry to pop
    pub fn can_pop(&self) -> bool {
        !self.shared.state.borrow().stack.is_empty()
    }

    /// Go back
    ///
    /// Pops the top entry, or closes the presented surface hosting this router
    /// when the stack is already empty.
    pub fn dismiss(&self) {
        if self.can_pop() {
            self.mutate_stack("pop", |stack| {
                stack.pop();
            });
        } else if let Some(binding) = &self.shared.is_presented {
            binding.clear();
        }
    }

    /// Finish a validation flow hosted by this router
    ///
    /// Runs the dismiss callback of the destination presented through this
    /// router's binding (or, for a router without one, of its own presented
    /// sheet) and then closes the binding.
    pub fn dismiss_validator(&self, success: bool) {
        let binding = self.shared.is_presented.as_ref();
        match binding.and_then(|slot| slot.get().map(|presented| (slot, presented))) {
            Some((slot, presented)) => {
                let generation = slot.generation();
                presented.notify_dismissed(success);
                // Keep whatever the callback presented in its place.
                if slot.generation() == generation {
                    slot.clear();
                }
            }
            None => {
                if let Some(sheet) = self.shared.sheet.get() {
                    sheet.notify_dismissed(success);
                }
                if let Some(slot) = binding {
                    slot.clear();
                }
            }
        }
    }

    /// Close the surface hosting this router without running callbacks
    pub fn dismiss_sheet(&self) {
        if let Some(binding) = &self.shared.is_presented {
            binding.clear();
        }
    }

    /// Pop towards `target`
    ///
    /// Walks the stack from the bottom and pops the top entry once for every
    /// entry passed before the first one equal to `target`. If `target` is not
    /// on the stack, the whole stack is removed.
    pub fn pop_until(&self, target: &Destination<R>) {
        let passed = {
            let state = self.shared.state.borrow();
            state
                .stack
                .iter()
                .position(|entry| entry.destination == *target)
                .unwrap_or(state.stack.len())
        };

        if passed > 0 {
            self.mutate_stack("pop_until", |stack| {
                let keep = stack.len().saturating_sub(passed);
                stack.truncate(keep);
            });
        }
    }

    /// Pop the top entry if there is one, then route to `route`
    pub fn pop_and_push(&self, route: Destination<R>) {
        if self.can_pop() {
            self.dismiss();
        }
        self.route_to(route);
    }

    /// Reconcile a deep link with this stack
    ///
    /// When the path is already open here, everything above the last
    /// occurrence of `routes` is popped; if the chain is not actually on the
    /// stack nothing changes. Otherwise the chain is pushed.
    pub fn handle_deeplink(&self, routes: Vec<Destination<R>>, is_path_present_in_this_stack: bool) {
        if !is_path_present_in_this_stack {
            tracing::debug!(routes = routes.len(), "Pushing deep link chain");
            self.push_multiple(routes);
            return;
        }

        let stack = self.stack();
        match last_contiguous_index(&stack, &routes) {
            Some(index) if stack.len() > index + 1 => {
                tracing::debug!(keep = index + 1, "Trimming stack to deep link");
                self.mutate_stack("deeplink", |stack| stack.truncate(index + 1));
            }
            Some(_) => {}
            None => {
                tracing::debug!("Deep link chain not found on stack, ignoring");
            }
        }
    }

    /// Whether `path` occurs in the current path
    ///
    /// An empty query is never considered present.
    pub fn is_path_present(&self, path: &str) -> bool {
        !path.is_empty() && self.shared.state.borrow().current_path.contains(path)
    }

    /// Resolve a suspended request
    ///
    /// On success the suspended destination is routed again, or the pending
    /// multi-push queue is flushed if it still holds entries. On failure the
    /// request is abandoned and the pending queue cleared. Either way, other
    /// suspensions parked on a queued destination are settled along with it.
    /// Returns `false` if the suspension was already resolved.
    pub fn resume(&self, suspension: &Suspension<R>, success: bool) -> bool {
        let pending = {
            let mut state = self.shared.state.borrow_mut();
            let Some(index) = state
                .suspensions
                .iter()
                .position(|outstanding| outstanding.id() == suspension.id())
            else {
                return false;
            };
            state.suspensions.remove(index);

            let pending = std::mem::take(&mut state.pending);
            state
                .suspensions
                .retain(|outstanding| !pending.contains(outstanding.target()));
            pending
        };

        if !success {
            tracing::debug!(route = ?suspension.target().route(), "Validation failed, navigation abandoned");
            return true;
        }

        tracing::debug!(route = ?suspension.target().route(), "Validation passed, resuming navigation");
        if pending.is_empty() {
            self.route_to(suspension.target().clone());
        } else {
            self.push_multiple(pending);
        }
        true
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Router that hosts navigation triggered from a destination shown in `mode`
    ///
    /// Pushed screens share this router. Sheets and full screen covers get a
    /// new router whose binding is this router's matching slot.
    pub fn router_for(&self, mode: NavigationMode) -> Router<R> {
        match mode {
            NavigationMode::Push => self.clone(),
            NavigationMode::Sheet => {
                Router::presented_in(self.shared.sheet.clone(), self.shared.config.clone())
            }
            NavigationMode::FullScreenCover => Router::presented_in(
                self.shared.full_screen_cover.clone(),
                self.shared.config.clone(),
            ),
        }
    }

    /// Build content for `destination` with the router it should navigate with
    pub fn view_for<V: RouteView<R>>(&self, destination: &Destination<R>, view: &V) -> V::Output {
        view.build(destination, self.router_for(destination.mode()))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn push(&self, destination: Destination<R>) {
        tracing::debug!(route = ?destination.route(), "Push");
        {
            let mut state = self.shared.state.borrow_mut();
            let state = &mut *state;
            if let Some(index) = state.pending.iter().position(|p| *p == destination) {
                state.pending.remove(index);
            }
            state.stack.push(StackEntry::new(destination));
            state.current_path = join_paths(&state.stack);
        }
        self.shared.notifier.notify("push");
    }

    /// Apply a stack mutation, recompute the path, then notify
    fn mutate_stack(&self, reason: &'static str, mutate: impl FnOnce(&mut Vec<StackEntry<R>>)) {
        {
            let mut state = self.shared.state.borrow_mut();
            let state = &mut *state;
            mutate(&mut state.stack);
            state.current_path = join_paths(&state.stack);
        }
        self.shared.notifier.notify(reason);
    }

    fn resume_hook(&self, suspension: Suspension<R>) -> DismissCallback {
        let router: Weak<RouterShared<R>> = Rc::downgrade(&self.shared);
        Rc::new(move |success| match router.upgrade() {
            Some(shared) => {
                Router { shared }.resume(&suspension, success);
            }
            None => {
                tracing::debug!("Router dropped before validation finished");
            }
        })
    }
}

impl<R: RouteInfo> fmt::Debug for Router<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("Router")
            .field(
                "stack",
                &state
                    .stack
                    .iter()
                    .map(|entry| entry.destination.route())
                    .collect::<Vec<_>>(),
            )
            .field("current_path", &state.current_path)
            .field("pending", &state.pending.len())
            .field("suspensions", &state.suspensions.len())
            .field("sheet", &self.shared.sheet)
            .field("full_screen_cover", &self.shared.full_screen_cover)
            .field("is_presented", &self.shared.is_presented.is_some())
            .finish()
    }
}
