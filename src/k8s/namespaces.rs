/// Namespace selection from include/exclude filters
use std::collections::HashSet;
use tracing::{debug, warn};

/// Chooses which live namespaces an export run visits
pub struct NamespaceSelector<'a> {
    included: &'a [String],
    excluded: &'a [String],
}

impl<'a> NamespaceSelector<'a> {
    pub fn new(included: &'a [String], excluded: &'a [String]) -> Self {
        Self { included, excluded }
    }

    /// Compute the working set of namespaces.
    ///
    /// A non-empty inclusion list wins outright: its names are kept in their
    /// configured order if they exist in `live`, and the exclusion list is not
    /// consulted. Otherwise every live namespace not excluded is kept, in
    /// `live` order.
    pub fn select(&self, live: &[String]) -> Vec<String> {
        if self.included.is_empty() {
            let excluded: HashSet<&str> = self.excluded.iter().map(String::as_str).collect();
            return live
                .iter()
                .filter(|ns| !excluded.contains(ns.as_str()))
                .cloned()
                .collect();
        }

        if !self.excluded.is_empty() {
            debug!("includedNamespaces is set, ignoring excludedNamespaces");
        }

        let live: HashSet<&str> = live.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for ns in self.included {
            if !live.contains(ns.as_str()) {
                warn!("Namespace {} does not exist, skipping", ns);
                continue;
            }
            if seen.insert(ns.as_str()) {
                selected.push(ns.clone());
            }
        }

        selected
    }
}
