use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::DisplayMode;

use super::persistence::{self, SELECTED_ENTITIES_KEY, VIEW_MODE_KEY};
use super::{EntitySelection, LookbackWindow, StatsQuery, ViewStateStore};

/// Which entities are charted and how.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplaySelection {
    pub mode: DisplayMode,
    pub selected_ids: Vec<u64>,
}

impl DisplaySelection {
    /// Restores the persisted selection; missing or malformed entries fall
    /// back to `All` with nothing selected.
    #[must_use]
    pub fn load(store: &impl ViewStateStore) -> Self {
        let mode = match store.get(VIEW_MODE_KEY).as_deref() {
            Some("all") | None => DisplayMode::All,
            Some("selected") => DisplayMode::Selected,
            Some(other) => {
                debug!(value = other, "discarding unknown persisted view mode");
                DisplayMode::All
            }
        };
        let selected_ids: Vec<u64> =
            persistence::load_json(store, SELECTED_ENTITIES_KEY).unwrap_or_default();
        Self { mode, selected_ids }
    }

    /// Best-effort persistence of the selection.
    pub fn save(&self, store: &mut impl ViewStateStore) {
        let mode = match self.mode {
            DisplayMode::All => "all",
            DisplayMode::Selected => "selected",
        };
        if let Err(err) = store.set(VIEW_MODE_KEY, mode.to_owned()) {
            warn!(error = %err, "failed to persist view mode");
        }
        if let Err(err) = persistence::save_json(store, SELECTED_ENTITIES_KEY, &self.selected_ids) {
            warn!(error = %err, "failed to persist selected entities");
        }
    }

    /// Shows the combined series of every entity.
    pub fn select_all(&mut self) {
        self.mode = DisplayMode::All;
        self.selected_ids.clear();
    }

    /// Adds or removes `id` and switches to per-entity lines.
    pub fn toggle(&mut self, id: u64) {
        if let Some(position) = self.selected_ids.iter().position(|selected| *selected == id) {
            self.selected_ids.remove(position);
        } else {
            self.selected_ids.push(id);
        }
        self.mode = DisplayMode::Selected;
    }

    /// Forgets a deleted entity.
    pub fn remove(&mut self, id: u64) {
        self.selected_ids.retain(|selected| *selected != id);
    }

    #[must_use]
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Stats query for the current selection, or `None` when per-entity mode
    /// has nothing selected.
    #[must_use]
    pub fn stats_query(&self, lookback: LookbackWindow) -> Option<StatsQuery> {
        let selection = match self.mode {
            DisplayMode::All => EntitySelection::All,
            DisplayMode::Selected if self.selected_ids.is_empty() => return None,
            DisplayMode::Selected => EntitySelection::Ids(self.selected_ids.clone()),
        };
        Some(StatsQuery::new(selection, lookback))
    }
}
