//! Route identity
//!
//! Applications describe every place they can navigate to as a closed enum and
//! implement [`RouteInfo`] for it. The router only ever compares, hashes and
//! reads path segments from routes; everything else about a screen lives in the
//! rendering layer.

use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a navigable route
///
/// Two destinations are the same navigation target exactly when their routes
/// compare equal, so include in the route every field that distinguishes one
/// screen from another (a profile name, a post id) and nothing else.
pub trait RouteInfo: Clone + Eq + Hash + Debug + 'static {
    /// Path segment this route contributes to a router's current path
    ///
    /// Segments are concatenated without separators, so they normally start
    /// with `/` (e.g. `/profile/alice`).
    fn path(&self) -> String;

    /// Tab that owns this route when it heads a deep link
    fn tab_index(&self) -> Option<usize> {
        None
    }
}
