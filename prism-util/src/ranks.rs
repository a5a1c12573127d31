//! Rank lookups over a pluggable permission-group service.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

/// Group membership and weight lookups, normally backed by the server's
/// permission plugin. Implementations must answer from their own cache;
/// callers treat these as cheap synchronous queries.
pub trait RankService: Send + Sync {
    fn player_groups(&self, who: Uuid) -> Vec<String>;
    fn all_groups(&self) -> Vec<String>;
    fn group_weights(&self) -> HashMap<String, i32>;
    fn user_prefix(&self, who: Uuid) -> Option<String>;
    fn user_suffix(&self, who: Uuid) -> Option<String>;
}

/// Convenience queries layered over a [`RankService`].
pub struct RanksLister {
    service: Arc<dyn RankService>,
}

impl RanksLister {
    #[must_use]
    pub fn new(service: Arc<dyn RankService>) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn player_ranks(&self, who: Uuid) -> Vec<String> {
        self.service.player_groups(who)
    }

    #[must_use]
    pub fn all_ranks(&self) -> Vec<String> {
        self.service.all_groups()
    }

    /// Every group paired with its weight scaled by `multiplier`.
    #[must_use]
    pub fn all_ranks_with_weights(&self, multiplier: f64) -> Vec<(String, f64)> {
        self.service
            .group_weights()
            .into_iter()
            .map(|(group, weight)| (group, f64::from(weight) * multiplier))
            .collect()
    }

    /// The player's heaviest group, or `"default"` when they have none.
    #[must_use]
    pub fn highest_weighing_group(&self, who: Uuid) -> String {
        let weights = self.service.group_weights();
        self.service
            .player_groups(who)
            .into_iter()
            .max_by_key(|group| weights.get(group).copied().unwrap_or(0))
            .unwrap_or_else(|| "default".to_string())
    }

    #[must_use]
    pub fn highest_weighing_group_weight(&self, who: Uuid) -> i32 {
        let group = self.highest_weighing_group(who);
        self.service.group_weights().get(&group).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn user_prefix(&self, who: Uuid) -> Option<String> {
        self.service.user_prefix(who)
    }

    #[must_use]
    pub fn user_suffix(&self, who: Uuid) -> Option<String> {
        self.service.user_suffix(who)
    }
}

/// A table-backed rank service, useful for servers without a permission
/// plugin and for tests.
#[derive(Default)]
pub struct StaticRankService {
    inner: RwLock<StaticRankTable>,
}

#[derive(Default)]
struct StaticRankTable {
    groups: HashMap<Uuid, Vec<String>>,
    weights: HashMap<String, i32>,
    prefixes: HashMap<Uuid, String>,
    suffixes: HashMap<Uuid, String>,
}

impl StaticRankService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_group(&self, group: impl Into<String>, weight: i32) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.weights.insert(group.into(), weight);
    }

    pub fn assign(&self, who: Uuid, group: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.groups.entry(who).or_default().push(group.into());
    }

    pub fn set_prefix(&self, who: Uuid, prefix: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.prefixes.insert(who, prefix.into());
    }

    pub fn set_suffix(&self, who: Uuid, suffix: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.suffixes.insert(who, suffix.into());
    }
}

impl RankService for StaticRankService {
    fn player_groups(&self, who: Uuid) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .groups
            .get(&who)
            .cloned()
            .unwrap_or_default()
    }

    fn all_groups(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut groups: Vec<String> = inner.weights.keys().cloned().collect();
        groups.sort();
        groups
    }

    fn group_weights(&self) -> HashMap<String, i32> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .weights
            .clone()
    }

    fn user_prefix(&self, who: Uuid) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .prefixes
            .get(&who)
            .cloned()
    }

    fn user_suffix(&self, who: Uuid) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .suffixes
            .get(&who)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_group_respects_weights() {
        let service = Arc::new(StaticRankService::new());
        service.define_group("default", 0);
        service.define_group("vip", 10);
        service.define_group("admin", 100);

        let who = Uuid::new_v4();
        service.assign(who, "vip");
        service.assign(who, "admin");

        let lister = RanksLister::new(service);
        assert_eq!(lister.highest_weighing_group(who), "admin");
        assert_eq!(lister.highest_weighing_group_weight(who), 100);
    }

    #[test]
    fn unknown_player_falls_back_to_default() {
        let lister = RanksLister::new(Arc::new(StaticRankService::new()));
        assert_eq!(lister.highest_weighing_group(Uuid::new_v4()), "default");
        assert_eq!(lister.highest_weighing_group_weight(Uuid::new_v4()), 0);
    }
}
