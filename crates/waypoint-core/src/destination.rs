//! Navigation destinations
//!
//! A [`Destination`] is the request a caller hands to a router: which route to
//! show, how to present it, optional data for the screen, a callback to run
//! when a presented flow finishes, and an optional validation hook that can
//! redirect the request through a gate (a login screen, a paywall) first.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use thiserror::Error;

use crate::route::RouteInfo;

/// Destination errors
#[derive(Debug, Error)]
pub enum DestinationError {
    /// Payload could not be encoded or decoded
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type for destination operations
pub type Result<T> = std::result::Result<T, DestinationError>;

/// Opaque data attached to a destination
pub type Payload = serde_json::Value;

/// Callback invoked when a presented flow is dismissed
///
/// The flag is `true` when the flow completed successfully.
pub type DismissCallback = Rc<dyn Fn(bool)>;

/// How a destination is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NavigationMode {
    /// Pushed onto the router's stack
    #[default]
    Push,
    /// Presented as a modal sheet
    Sheet,
    /// Presented as a modal covering the whole surface
    FullScreenCover,
}

/// Validation hook consulted before a destination is routed
///
/// Returning `Some(gate)` makes the router show `gate` instead and park the
/// requested destination until the gate's flow is dismissed with success.
#[cfg_attr(test, mockall::automock)]
pub trait RouteValidator<R: RouteInfo> {
    /// Gate to route through before `destination`, or `None` if it may proceed
    fn gate_for(&self, destination: &Destination<R>) -> Option<Destination<R>>;
}

/// A navigation request
///
/// Equality and hashing only consider the route, so a destination compares
/// equal to any other request for the same screen regardless of payload or
/// presentation mode.
pub struct Destination<R> {
    route: R,
    mode: NavigationMode,
    payload: Option<Payload>,
    on_dismiss: Option<DismissCallback>,
    validator: Option<Rc<dyn RouteValidator<R>>>,
}

impl<R: RouteInfo> Destination<R> {
    /// Create a destination with the given presentation mode
    pub fn new(route: R, mode: NavigationMode) -> Self {
        Self {
            route,
            mode,
            payload: None,
            on_dismiss: None,
            validator: None,
        }
    }

    /// Create a destination pushed onto the stack
    pub fn push(route: R) -> Self {
        Self::new(route, NavigationMode::Push)
    }

    /// Create a destination presented as a sheet
    pub fn sheet(route: R) -> Self {
        Self::new(route, NavigationMode::Sheet)
    }

    /// Create a destination presented as a full screen cover
    pub fn full_screen_cover(route: R) -> Self {
        Self::new(route, NavigationMode::FullScreenCover)
    }

    /// Attach a payload
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach a payload serialized from `value`
    pub fn with_payload_from<T: Serialize>(self, value: &T) -> Result<Self> {
        let payload = serde_json::to_value(value)?;
        Ok(self.with_payload(payload))
    }

    /// Set the dismiss callback, replacing any existing one
    pub fn with_on_dismiss(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.on_dismiss = Some(Rc::new(callback));
        self
    }

    /// Run `hook` after the existing dismiss callback, if there is one
    pub fn with_dismiss_hook(mut self, hook: DismissCallback) -> Self {
        self.on_dismiss = Some(match self.on_dismiss.take() {
            Some(existing) => Rc::new(move |success| {
                existing(success);
                hook(success);
            }),
            None => hook,
        });
        self
    }

    /// Attach a validation hook
    pub fn with_validator(mut self, validator: Rc<dyn RouteValidator<R>>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The route identity
    pub fn route(&self) -> &R {
        &self.route
    }

    /// The presentation mode
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Path segment contributed to a router's current path
    pub fn path(&self) -> String {
        self.route.path()
    }

    /// Tab this destination targets when it heads a deep link
    pub fn tab_index(&self) -> Option<usize> {
        self.route.tab_index()
    }

    /// Raw payload, if any
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Decode the payload into `T`
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.payload {
            Some(payload) => Ok(Some(T::deserialize(payload)?)),
            None => Ok(None),
        }
    }

    /// Whether a dismiss callback is attached
    pub fn has_on_dismiss(&self) -> bool {
        self.on_dismiss.is_some()
    }

    /// Run the validation hook
    ///
    /// Returns the gate to show instead of this destination, or `None` when it
    /// can be routed immediately.
    pub fn is_route_valid(&self) -> Option<Destination<R>> {
        self.validator
            .as_ref()
            .and_then(|validator| validator.gate_for(self))
    }

    /// Invoke the dismiss callback, if any
    pub fn notify_dismissed(&self, success: bool) {
        if let Some(callback) = &self.on_dismiss {
            callback(success);
        }
    }
}

impl<R: Clone> Clone for Destination<R> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            mode: self.mode,
            payload: self.payload.clone(),
            on_dismiss: self.on_dismiss.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<R: PartialEq> PartialEq for Destination<R> {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route
    }
}

impl<R: Eq> Eq for Destination<R> {}

impl<R: Hash> Hash for Destination<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.route.hash(state);
    }
}

impl<R: fmt::Debug> fmt::Debug for Destination<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("route", &self.route)
            .field("mode", &self.mode)
            .field("payload", &self.payload)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
