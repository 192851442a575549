use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use crate::git::engine::Engine;
use crate::git::error::Result;
use crate::git::repository::factories::TreeFactory;
use crate::git::repository::oid::Oid;

/// A snapshot of staged paths, addressed by the id of its tree object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tree {
    oid: Oid,
}

impl Tree {
    pub fn new(oid: Oid) -> Self {
        Self { oid }
    }

    pub fn oid(&self) -> &Oid {
        &self.oid
    }
}

/// Looks trees up in the object database.
pub struct GitTreeFactory {
    engine: Rc<Engine>,
}

impl GitTreeFactory {
    pub fn new(engine: Rc<Engine>) -> Self {
        Self { engine }
    }
}

impl TreeFactory for GitTreeFactory {
    fn tree(&self, oid: &Oid) -> Result<Tree> {
        debug!(tree = %oid.short(7), "looking up tree");
        self.engine.find_tree(oid)?;
        Ok(Tree::new(oid.clone()))
    }
}
