//! Rendering hand-off
//!
//! Rendering is not this crate's concern, but a screen that navigates further
//! needs a router to do it with. [`RouteView`] is the seam: the router picks
//! the right router for the destination's mode and hands both to the view
//! builder.

use waypoint_core::{Destination, RouteInfo};

use crate::router::Router;

/// Builds renderable content for a destination
pub trait RouteView<R: RouteInfo> {
    /// Rendered content
    type Output;

    /// Build content for `destination`, navigating further through `router`
    ///
    /// Pushed destinations receive the router that owns the stack; sheets and
    /// full screen covers receive a fresh router bound to the presenting slot.
    fn build(&self, destination: &Destination<R>, router: Router<R>) -> Self::Output;
}

impl<R, F, O> RouteView<R> for F
where
    R: RouteInfo,
    F: Fn(&Destination<R>, Router<R>) -> O,
{
    type Output = O;

    fn build(&self, destination: &Destination<R>, router: Router<R>) -> O {
        self(destination, router)
    }
}
