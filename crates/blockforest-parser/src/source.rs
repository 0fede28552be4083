//! Lookup of model documents by logical name.
//!
//! The parser never reads files itself. Every document, the root one and each
//! subsystem reference, is obtained through a [`DocumentSource`].

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use indexmap::IndexMap;

/// A read-only collection of named XML documents.
///
/// Lookups must be deterministic for the lifetime of the source.
pub trait DocumentSource {
    /// Returns the text of the document called `name`, if present.
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn lookup(&self, name: &str) -> Option<&str> {
        (**self).lookup(name)
    }
}

impl<H: BuildHasher> DocumentSource for HashMap<String, String, H> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<H: BuildHasher> DocumentSource for IndexMap<String, String, H> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl DocumentSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}
