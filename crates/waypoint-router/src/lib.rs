//! Navigation state machines for Waypoint
//!
//! This crate provides the routers that own navigation state: a single-stack
//! [`Router`] with modal presentation and validation gates, and a
//! [`TabRouter`] composing one router per tab.
//!
//! # Modules
//!
//! - [`router`] - Stack mutations, presentation, validation gates, deep links
//! - [`tab_router`] - Tab selection and cross-tab deep-link reconciliation
//! - [`presentation`] - Shared slots for sheets and full screen covers
//! - [`suspension`] - Requests parked behind a validation gate
//! - [`stack`] - Stack entries
//! - [`observe`] - Change notification
//! - [`view`] - Hand-off to the rendering layer
//!
//! # Example
//!
//! ```rust
//! use waypoint_core::{Destination, RouteInfo};
//! use waypoint_router::Router;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum AppRoute {
//!     Feed,
//!     Post(u32),
//! }
//!
//! impl RouteInfo for AppRoute {
//!     fn path(&self) -> String {
//!         match self {
//!             AppRoute::Feed => "/feed".to_string(),
//!             AppRoute::Post(id) => format!("/post/{}", id),
//!         }
//!     }
//! }
//!
//! let router = Router::new();
//! router.route_to(Destination::push(AppRoute::Feed));
//! router.route_to(Destination::push(AppRoute::Post(7)));
//! assert_eq!(router.current_path(), "/feed/post/7");
//!
//! router.dismiss();
//! assert_eq!(router.current_path(), "/feed");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod observe;
pub mod presentation;
pub mod router;
pub mod stack;
pub mod suspension;
pub mod tab_router;
pub mod view;

pub use observe::ChangeNotifier;
pub use presentation::{PresentationKind, PresentationSlot};
pub use router::{NavigationSnapshot, Router};
pub use stack::StackEntry;
pub use suspension::Suspension;
pub use tab_router::TabRouter;
pub use view::RouteView;
