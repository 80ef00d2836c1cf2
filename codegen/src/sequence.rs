//! First-call detection for runs of repeated list-item calls.
//!
//! A helper that emits one list item per call (an implemented interface, a
//! thrown exception) identifies itself with a [`SiteId`]. The tracker
//! remembers the last site that reported in; a call is "first" whenever its
//! site differs from that one.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteId(&'static str);

impl SiteId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    last: Option<SiteId>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `site` as the most recent caller without asking anything.
    pub fn mark(&mut self, site: SiteId) {
        self.last = Some(site);
    }

    /// Whether a call from `site` would start a new run.
    pub fn is_first(&self, site: SiteId) -> bool {
        self.last != Some(site)
    }

    /// Reports whether `site` starts a new run and records it.
    pub fn advance(&mut self, site: SiteId) -> bool {
        let first = self.is_first(site);
        self.last = Some(site);
        first
    }

    pub fn last(&self) -> Option<SiteId> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
