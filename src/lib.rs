//! Waypoint
//!
//! Navigation-stack controller for declarative UIs. This crate re-exports the
//! workspace crates:
//!
//! - [`core`] - Routes, destinations, path matching, deep-link parsing, config
//! - [`router`] - Single-stack and tabbed routers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use waypoint_core as core;
pub use waypoint_router as router;

pub use waypoint_core::{
    first_contiguous_index, last_contiguous_index, ConfigError, Deeplink, DeeplinkError,
    DeeplinkParser, Destination, DismissCallback, NavigationMode, Payload, RouteInfo, RouteParams,
    RouteValidator, RouterConfig, TabConfig,
};
pub use waypoint_router::{
    NavigationSnapshot, PresentationKind, PresentationSlot, RouteView, Router, StackEntry,
    Suspension, TabRouter,
};
