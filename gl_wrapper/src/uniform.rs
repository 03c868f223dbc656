use std::cell::RefCell;
use std::collections::HashMap;

use gl::types::GLint;

/// Name to location map filled lazily on first use of each uniform.
#[derive(Debug, Default)]
pub struct UniformCache {
    locations: RefCell<HashMap<String, GLint>>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached location, calling `lookup` only for names not seen yet.
    ///
    /// Missing uniforms (`-1`) are cached as well.
    pub fn location<F>(&self, name: &str, lookup: F) -> GLint
    where
        F: FnOnce(&str) -> GLint,
    {
        if let Some(loc) = self.locations.borrow().get(name) {
            return *loc;
        }

        let loc = lookup(name);
        self.locations.borrow_mut().insert(name.to_owned(), loc);
        loc
    }

    pub fn len(&self) -> usize {
        self.locations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.locations.borrow_mut().clear();
    }
}
