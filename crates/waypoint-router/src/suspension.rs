//! Suspended navigation requests
//!
//! When a destination is intercepted by a validation gate the router records a
//! [`Suspension`] for it. The record is what the gate's dismiss hook resumes,
//! and it stays inspectable on the router until the gate resolves.

use std::fmt;

use waypoint_core::{Destination, RouteInfo};

/// A navigation request waiting on a validation gate
#[derive(Clone)]
pub struct Suspension<R> {
    id: String,
    target: Destination<R>,
}

impl<R: RouteInfo> Suspension<R> {
    /// Suspend `target`
    pub fn new(target: Destination<R>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            target,
        }
    }

    /// Unique id of this suspension
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The destination that was intercepted
    pub fn target(&self) -> &Destination<R> {
        &self.target
    }
}

impl<R: fmt::Debug> fmt::Debug for Suspension<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suspension")
            .field("id", &self.id)
            .field("target", &self.target)
            .finish()
    }
}
