//! Host container collaborator.
//!
//! A [`ContainerHost`] stands for the element a graph is placed in: it knows
//! its current pixel size and fans resize notifications out to subscribers.
//! A graph holds a [`ResizeSubscription`], acquired when the graph is built
//! and released when it is disposed or dropped, so discarded graphs never
//! leave listeners behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{GraphError, GraphResult};

/// Container size in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug)]
struct ContainerState {
    size: ContainerSize,
    next_listener_id: u64,
    /// Pending notification count per listener.
    listeners: BTreeMap<u64, usize>,
}

/// Host-side handle to a resizable container.
///
/// Cloning yields another handle to the same container. Notifications are
/// dispatched serially on the owning thread.
#[derive(Debug, Clone)]
pub struct ContainerHost {
    state: Rc<RefCell<ContainerState>>,
}

impl ContainerHost {
    #[must_use]
    pub fn new(size: ContainerSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(ContainerState {
                size,
                next_listener_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn size(&self) -> ContainerSize {
        self.state.borrow().size
    }

    /// Updates the container size and queues one notification per listener.
    pub fn resize(&self, size: ContainerSize) {
        let mut state = self.state.borrow_mut();
        state.size = size;
        for pending in state.listeners.values_mut() {
            *pending += 1;
        }
        trace!(
            width = size.width,
            height = size.height,
            listeners = state.listeners.len(),
            "container resized"
        );
    }

    /// Registers a new resize listener.
    #[must_use]
    pub fn subscribe(&self) -> ResizeSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.insert(id, 0);
        ResizeSubscription {
            id,
            state: Rc::downgrade(&self.state),
            released: false,
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Graph-side registration on a [`ContainerHost`].
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    state: Weak<RefCell<ContainerState>>,
    released: bool,
}

impl ResizeSubscription {
    fn state(&self) -> GraphResult<Rc<RefCell<ContainerState>>> {
        if self.released {
            return Err(GraphError::ContainerDetached);
        }
        self.state.upgrade().ok_or(GraphError::ContainerDetached)
    }

    /// Current size of the container.
    pub fn container_size(&self) -> GraphResult<ContainerSize> {
        Ok(self.state()?.borrow().size)
    }

    /// Takes and clears the count of notifications delivered since the last call.
    pub fn take_pending(&self) -> GraphResult<usize> {
        let state = self.state()?;
        let mut state = state.borrow_mut();
        let pending = state
            .listeners
            .get_mut(&self.id)
            .ok_or(GraphError::ContainerDetached)?;
        Ok(std::mem::take(pending))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.released && self.state.strong_count() > 0
    }

    /// Unregisters the listener. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.remove(&self.id);
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
