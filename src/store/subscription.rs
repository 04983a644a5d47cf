// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Listener registry with explicit subscription handles.
//!
//! A [`Channel`] fans a value out to every registered listener. Registering
//! returns a [`Subscription`]; the listener stays attached until the handle is
//! released or dropped. Everything here is single-threaded (`Rc`/`RefCell`).

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::{Rc, Weak};

pub type Listener<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: BTreeMap<u64, Listener<T>>,
    // ids released while their listener was running
    released: HashSet<u64>,
}

pub struct Channel<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: BTreeMap::new(),
                released: HashSet::new(),
            })),
        }
    }

    /// Delivers `initial` to the listener right away, then keeps it attached.
    pub fn subscribe(&self, initial: &T, mut listener: Listener<T>) -> Subscription {
        listener(initial);
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.listeners.insert(id, listener);
            id
        };
        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    let mut reg = reg.borrow_mut();
                    if reg.listeners.remove(&id).is_none() {
                        reg.released.insert(id);
                    }
                }
            })),
        }
    }

    pub fn publish(&self, value: &T) {
        let ids: Vec<u64> = self.registry.borrow().listeners.keys().copied().collect();
        for id in ids {
            let taken = self.registry.borrow_mut().listeners.remove(&id);
            let Some(mut listener) = taken else {
                continue;
            };
            listener(value);
            let mut reg = self.registry.borrow_mut();
            if !reg.released.remove(&id) {
                reg.listeners.insert(id, listener);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener attached; dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn release(mut self) {
        if let Some(f) = self.release.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.release.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fires_immediately_then_on_publish() {
        let ch: Channel<u32> = Channel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let sub = ch.subscribe(&1, Box::new(move |v| s.borrow_mut().push(*v)));
        ch.publish(&2);
        ch.publish(&3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        drop(sub);
        ch.publish(&4);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(ch.listener_count(), 0);
    }

    #[test]
    fn listener_can_release_itself() {
        let ch: Channel<u32> = Channel::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));
        let (slot2, calls2) = (slot.clone(), calls.clone());
        let sub = ch.subscribe(
            &0,
            Box::new(move |v| {
                calls2.set(calls2.get() + 1);
                if *v == 1 {
                    if let Some(sub) = slot2.borrow_mut().take() {
                        sub.release();
                    }
                }
            }),
        );
        *slot.borrow_mut() = Some(sub);
        ch.publish(&1);
        ch.publish(&2);
        assert_eq!(calls.get(), 2);
        assert_eq!(ch.listener_count(), 0);
    }

    #[test]
    fn handle_outliving_channel_is_harmless() {
        let ch: Channel<u32> = Channel::new();
        let sub = ch.subscribe(&0, Box::new(|_| {}));
        drop(ch);
        sub.release();
    }
}
