use fxhash::FxHashMap;
use tracing::warn;

use crate::{
    error::{NetworkError, NetworkResult},
    link::transport_link::TransportLink,
    link_id::LinkId,
};

/// Links of a network addressed by id and gauge.
///
/// Ids are stored in their canonical form, so a link built as `"70-69"` is
/// found when asking for `"69-70"` as well.
#[derive(Debug, Clone)]
pub struct LinksTable<L> {
    links: FxHashMap<LinkId, FxHashMap<String, L>>,
}

impl<L> Default for LinksTable<L> {
    fn default() -> Self {
        LinksTable {
            links: FxHashMap::default(),
        }
    }
}

impl<L: TransportLink> LinksTable<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a link, returning the one it replaces for the same pair and
    /// gauge.
    pub fn insert(&mut self, link: L) -> Option<L> {
        let id = link.id().canonical();
        let gauge = link.gauge().to_owned();

        let replaced = self.links.entry(id).or_default().insert(gauge, link);
        if replaced.is_some() {
            warn!("Link {} is repeated, keeping the last one", id);
        }
        replaced
    }

    pub fn get(&self, id: LinkId, gauge: &str) -> Option<&L> {
        self.links.get(&id.canonical())?.get(gauge)
    }

    pub fn get_mut(&mut self, id: LinkId, gauge: &str) -> Option<&mut L> {
        self.links.get_mut(&id.canonical())?.get_mut(gauge)
    }

    /// Like [`LinksTable::get`], failing with [`NetworkError::UnknownLink`].
    pub fn find(&self, id: LinkId, gauge: &str) -> NetworkResult<&L> {
        self.get(id, gauge).ok_or_else(|| NetworkError::UnknownLink {
            link: id.to_string(),
            gauge: gauge.to_owned(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.links.values().flat_map(|gauges| gauges.values())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut L> {
        self.links.values_mut().flat_map(|gauges| gauges.values_mut())
    }

    /// Number of links, counting each gauge separately.
    pub fn len(&self) -> usize {
        self.links.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<L: TransportLink> FromIterator<L> for LinksTable<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut table = LinksTable::new();
        for link in iter {
            table.insert(link);
        }
        table
    }
}
