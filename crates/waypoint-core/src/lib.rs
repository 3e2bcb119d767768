//! Core navigation types for Waypoint
//!
//! This crate provides the value types a navigation surface is built from:
//! route identities, destinations with their presentation mode and validation
//! hooks, contiguous path matching, deep-link parsing and configuration.
//!
//! # Modules
//!
//! - [`route`] - The [`RouteInfo`] trait implemented by application route enums
//! - [`destination`] - [`Destination`] values handed to a router
//! - [`path_match`] - Contiguous subsequence search used for deep-link reconciliation
//! - [`deeplink`] - URL to route-chain parsing
//! - [`config`] - Router and tab configuration
//!
//! # Example
//!
//! ```rust
//! use waypoint_core::{Destination, NavigationMode, RouteInfo};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum AppRoute {
//!     Home,
//!     Settings,
//! }
//!
//! impl RouteInfo for AppRoute {
//!     fn path(&self) -> String {
//!         match self {
//!             AppRoute::Home => "/home".to_string(),
//!             AppRoute::Settings => "/settings".to_string(),
//!         }
//!     }
//! }
//!
//! let destination = Destination::sheet(AppRoute::Settings);
//! assert_eq!(destination.mode(), NavigationMode::Sheet);
//! assert_eq!(destination.path(), "/settings");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod deeplink;
pub mod destination;
pub mod path_match;
pub mod route;

pub use config::{ConfigError, RouterConfig, TabConfig};
pub use deeplink::{Deeplink, DeeplinkError, DeeplinkParser, RouteParams};
pub use destination::{
    DestinationError, Destination, DismissCallback, NavigationMode, Payload, RouteValidator,
};
pub use path_match::{first_contiguous_index, last_contiguous_index};
pub use route::RouteInfo;
