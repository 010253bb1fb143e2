// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared handle for webs queried from several threads.
//!
//! Queries take the read lock and may overlap each other. Mutations take the
//! write lock, so a cascading removal is never observed half done.

use crate::error::Result;
use crate::graph::NodeWeb;
use crate::id::NodeId;
use crate::path::Route;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Reference-counted, reader/writer locked web
#[derive(Debug, Clone, Default)]
pub struct SharedWeb {
    inner: Arc<RwLock<NodeWeb>>,
}

impl SharedWeb {
    /// Wrap a web
    pub fn new(web: NodeWeb) -> Self {
        Self {
            inner: Arc::new(RwLock::new(web)),
        }
    }

    /// Lock for reading
    pub fn read(&self) -> RwLockReadGuard<'_, NodeWeb> {
        self.inner.read()
    }

    /// Lock for writing
    pub fn write(&self) -> RwLockWriteGuard<'_, NodeWeb> {
        self.inner.write()
    }

    /// Run a mutation under the write lock
    pub fn edit<T>(&self, f: impl FnOnce(&mut NodeWeb) -> T) -> T {
        f(&mut self.inner.write())
    }

    /// Shortest distance under the read lock
    pub fn shortest_distance(&self, from: NodeId, to: NodeId) -> Result<Option<f64>> {
        self.read().path_finder().shortest_distance(from, to)
    }

    /// Shortest route under the read lock
    pub fn shortest_route(&self, from: NodeId, to: NodeId) -> Result<Option<Route>> {
        self.read().path_finder().shortest_route(from, to)
    }

    /// Copy of the current web
    pub fn snapshot(&self) -> NodeWeb {
        self.read().clone()
    }
}

impl From<NodeWeb> for SharedWeb {
    fn from(web: NodeWeb) -> Self {
        Self::new(web)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_queries_with_serialized_edits() {
        let mut web = NodeWeb::new("Shared");
        let a = web.add_node(None);
        let b = web.add_node(None);
        let x = web.add_bridge();
        web.connect(a, x, 1.0).unwrap();
        web.connect(b, x, 2.0).unwrap();
        let shared = SharedWeb::new(web);

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        // Either the bridge is intact or it is gone with all
                        // its connections; nothing in between is visible.
                        match shared.shortest_distance(a, b).unwrap() {
                            Some(d) => assert_eq!(d, 3.0),
                            None => assert_eq!(shared.read().connection_count(), 0),
                        }
                    }
                })
            })
            .collect();

        shared.edit(|web| web.remove_bridge(x)).unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(shared.shortest_route(a, b).unwrap(), None);
        assert_eq!(shared.snapshot().connection_count(), 0);
    }
}
