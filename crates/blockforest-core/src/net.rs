//! Raw connection declarations.
//!
//! A [`Net`] is one `Line` of a scope: a source endpoint, zero or more
//! destinations and an optional tree of fan-out [`Branch`]es. Endpoints are
//! stored as bare block SIDs; the `#<port>` suffix of the source text is
//! removed with [`strip_port_suffix`] before anything is stored.

use std::slice;

use serde::Serialize;

use crate::value::AttributeMap;

/// Strips a trailing port-index suffix from an endpoint reference.
///
/// # Examples
///
/// ```
/// use blockforest_core::net::strip_port_suffix;
///
/// assert_eq!(strip_port_suffix("B12#1"), "B12");
/// assert_eq!(strip_port_suffix("7#out:1"), "7");
/// assert_eq!(strip_port_suffix("7"), "7");
/// ```
pub fn strip_port_suffix(reference: &str) -> &str {
    let sid = match reference.split_once('#') {
        Some((sid, _port)) => sid,
        None => reference,
    };
    sid.trim()
}

/// The destination side of a net.
///
/// A net with one destination holds [`Destination::Single`]. Adding a second
/// destination promotes it to [`Destination::Many`] with both entries in
/// discovery order; further destinations are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Destination {
    Single(String),
    Many(Vec<String>),
}

impl Destination {
    /// Returns this destination extended by `sid`, promoting a single
    /// destination to a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockforest_core::net::Destination;
    ///
    /// let dst = Destination::Single("2".to_string()).promote("3");
    /// assert_eq!(dst, Destination::Many(vec!["2".to_string(), "3".to_string()]));
    /// ```
    pub fn promote(self, sid: impl Into<String>) -> Self {
        match self {
            Destination::Single(first) => Destination::Many(vec![first, sid.into()]),
            Destination::Many(mut sids) => {
                sids.push(sid.into());
                Destination::Many(sids)
            }
        }
    }

    /// Merges `sid` into an optional destination, creating a single
    /// destination on first use.
    pub fn merge(dst: &mut Option<Destination>, sid: impl Into<String>) {
        *dst = Some(match dst.take() {
            Some(existing) => existing.promote(sid),
            None => Destination::Single(sid.into()),
        });
    }

    /// Iterates over the destination SIDs in discovery order.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        match self {
            Destination::Single(sid) => slice::from_ref(sid).iter(),
            Destination::Many(sids) => sids.iter(),
        }
    }

    /// Returns `true` if any destination equals `sid`.
    pub fn contains(&self, sid: &str) -> bool {
        self.iter().any(|dst| dst == sid)
    }

    /// Number of destinations.
    pub fn len(&self) -> usize {
        match self {
            Destination::Single(_) => 1,
            Destination::Many(sids) => sids.len(),
        }
    }

    /// Returns `true` if no SID is held, which only an empty
    /// [`Destination::Many`] can be.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a Destination {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A splice point on a net, possibly fanning out further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Branch {
    #[serde(rename = "Src", skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    #[serde(rename = "Dst", skip_serializing_if = "Option::is_none")]
    dst: Option<Destination>,
    #[serde(rename = "Branches", skip_serializing_if = "Vec::is_empty")]
    branches: Vec<Branch>,
    #[serde(flatten)]
    attributes: AttributeMap,
}

impl Branch {
    /// Create a branch from its endpoints, nested branches and remaining parameters.
    pub fn new(
        src: Option<String>,
        dst: Option<Destination>,
        branches: Vec<Branch>,
        attributes: AttributeMap,
    ) -> Self {
        Self {
            src,
            dst,
            branches,
            attributes,
        }
    }

    /// Source SID declared on this branch, if any.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Destination(s) declared on this branch itself, in declaration order.
    pub fn dst(&self) -> Option<&Destination> {
        self.dst.as_ref()
    }

    /// Branches nested below this one, in declaration order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Parameters other than `Src`/`Dst`.
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}

/// One raw connection declaration of a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Net {
    #[serde(rename = "Src", skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    #[serde(rename = "Dst", skip_serializing_if = "Option::is_none")]
    dst: Option<Destination>,
    #[serde(rename = "Branches", skip_serializing_if = "Vec::is_empty")]
    branches: Vec<Branch>,
    #[serde(flatten)]
    attributes: AttributeMap,
}

impl Net {
    /// Create a net from its top-level endpoints, branches and remaining parameters.
    pub fn new(
        src: Option<String>,
        dst: Option<Destination>,
        branches: Vec<Branch>,
        attributes: AttributeMap,
    ) -> Self {
        Self {
            src,
            dst,
            branches,
            attributes,
        }
    }

    /// Top-level source SID.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Top-level destination(s), before branch reduction.
    pub fn dst(&self) -> Option<&Destination> {
        self.dst.as_ref()
    }

    /// Fan-out branches in declaration order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Parameters other than `Src`/`Dst` (e.g. `Name`, `ZOrder`, `Points`).
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}
