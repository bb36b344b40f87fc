//! The outline session: one store, its selection, search query and pending delete.
//!
//! Every UI command lands here. The session owns all outline state and is
//! passed to command handlers explicitly; nothing is kept in globals.

use std::ops::Range;

use crate::{
    filter, highlight, validate_rename, DeleteReport, DeleteWorkflow, FilterResult, NullSink,
    ObjectId, ObjectRecord, ObjectType, OutlineConfig, OutlineError, PendingDelete,
    PropertiesKind, PropertiesSink, RenameDraft, Result, Selection, TreeStore,
};

/// One line of the outline as the panel should draw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: ObjectId,
    pub icon: &'static str,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

pub struct OutlineState {
    store: TreeStore,
    selection: Selection,
    delete: DeleteWorkflow,
    search_query: String,
    config: OutlineConfig,
    properties: Box<dyn PropertiesSink + Send + Sync>,
}

impl Default for OutlineState {
    fn default() -> Self {
        Self::new(OutlineConfig::default())
    }
}

impl OutlineState {
    /// Starts a session, with the sample scene if the config asks for it.
    pub fn new(config: OutlineConfig) -> Self {
        let store = if config.load_sample_scene {
            TreeStore::sample()
        } else {
            TreeStore::new()
        };
        Self::with_store(store, config)
    }

    /// Wraps `store`. An invalid config is replaced by the defaults.
    pub fn with_store(store: TreeStore, config: OutlineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Invalid outline config, using defaults");
                OutlineConfig::default()
            }
        };
        Self {
            store: store.with_suffix_width(config.suffix_width),
            selection: Selection::new(),
            delete: DeleteWorkflow::new(),
            search_query: String::new(),
            config,
            properties: Box::new(NullSink),
        }
    }

    /// Starts a session from a serialized tree; bad input yields an empty outline and the error.
    pub fn from_json(json: &str, config: OutlineConfig) -> (Self, Option<OutlineError>) {
        let (store, diagnostic) = TreeStore::load_or_empty(json);
        (Self::with_store(store, config), diagnostic)
    }

    /// Registers the properties panel that hears about selection changes.
    pub fn set_properties_sink(&mut self, sink: Box<dyn PropertiesSink + Send + Sync>) {
        self.properties = sink;
    }

    // -- Queries --

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.store.get(id)
    }

    pub fn name_of(&self, id: ObjectId) -> Option<&str> {
        self.store.get(id).map(ObjectRecord::name)
    }

    pub fn type_of(&self, id: ObjectId) -> Option<ObjectType> {
        self.store.get(id).map(ObjectRecord::object_type)
    }

    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.selection.selected()
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn filter(&self) -> FilterResult {
        filter(&self.store, &self.search_query)
    }

    /// Span of `id`'s name to highlight for the current query
    pub fn highlight(&self, id: ObjectId) -> Option<Range<usize>> {
        let record = self.store.get(id)?;
        highlight(&self.search_query, record.name())
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.delete.pending()
    }

    pub fn rename_draft(&self, id: ObjectId) -> Option<&RenameDraft> {
        self.store.get(id).and_then(ObjectRecord::rename_draft)
    }

    /// Rows to draw this frame: the expanded tree, or the flat match list while searching.
    pub fn visible_rows(&self) -> Vec<OutlineRow> {
        match self.filter() {
            FilterResult::Matches(ids) => ids
                .into_iter()
                .filter_map(|id| {
                    let record = self.store.get(id)?;
                    Some(OutlineRow {
                        id,
                        icon: record.object_type().icon(),
                        depth: 0,
                        has_children: record.has_children(),
                        expanded: record.expanded,
                    })
                })
                .collect(),
            FilterResult::FullTree => {
                let mut rows = Vec::with_capacity(self.store.len());
                let mut stack: Vec<(ObjectId, usize)> =
                    self.store.roots().iter().rev().map(|id| (*id, 0)).collect();

                while let Some((id, depth)) = stack.pop() {
                    let Some(record) = self.store.get(id) else { continue };
                    rows.push(OutlineRow {
                        id,
                        icon: record.object_type().icon(),
                        depth,
                        has_children: record.has_children(),
                        expanded: record.expanded,
                    });
                    if record.expanded {
                        let children = record.children().iter().rev();
                        stack.extend(children.map(|child| (*child, depth + 1)));
                    }
                }
                rows
            }
        }
    }

    // -- Selection --

    pub fn toggle_select(&mut self, id: ObjectId) {
        self.selection
            .toggle(&self.store, id, self.properties.as_mut());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(self.properties.as_mut());
    }

    // -- Search --

    pub fn search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    // -- Tree view flags --

    pub fn toggle_expanded(&mut self, id: ObjectId) {
        self.store.toggle_expanded(id);
    }

    pub fn expand_all(&mut self) {
        self.store.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.store.collapse_all();
    }

    pub fn set_visible(&mut self, id: ObjectId, visible: bool) {
        self.store.set_visible(id, visible);
    }

    // -- Rename --

    /// Puts `id` into edit mode with its current name. Returns false for unknown ids.
    pub fn begin_rename(&mut self, id: ObjectId) -> bool {
        match self.store.get_mut(id) {
            Some(record) => {
                record.rename = Some(RenameDraft::new(record.name.clone()));
                true
            }
            None => false,
        }
    }

    /// Replaces the text being edited and refreshes its inline validation message.
    pub fn update_rename(&mut self, id: ObjectId, text: impl Into<String>) -> bool {
        let text = text.into();
        let error = validate_rename(&self.store, id, &text).err();
        match self.store.get_mut(id) {
            Some(record) => {
                record.rename = Some(RenameDraft { text, error });
                true
            }
            None => false,
        }
    }

    /// Commits `new_name`. On rejection the record stays in edit mode with the error attached.
    pub fn commit_rename(&mut self, id: ObjectId, new_name: &str) -> Result<()> {
        if !self.update_rename(id, new_name) {
            return Err(OutlineError::NotFound(id));
        }
        self.commit_rename_draft(id)
    }

    /// Commits whatever text the edit box currently holds.
    pub fn commit_rename_draft(&mut self, id: ObjectId) -> Result<()> {
        let text = match self.store.get(id) {
            Some(record) => match record.rename_draft() {
                Some(draft) => draft.text.clone(),
                None => return Ok(()),
            },
            None => return Err(OutlineError::NotFound(id)),
        };

        if let Err(err) = validate_rename(&self.store, id, &text) {
            if let Some(draft) = self.store.get_mut(id).and_then(|r| r.rename.as_mut()) {
                draft.error = Some(err.clone());
            }
            return Err(err.into());
        }

        self.store.rename(id, &text)?;
        if let Some(record) = self.store.get_mut(id) {
            record.rename = None;
        }
        Ok(())
    }

    pub fn cancel_rename(&mut self, id: ObjectId) -> bool {
        match self.store.get_mut(id) {
            Some(record) => {
                record.rename = None;
                true
            }
            None => false,
        }
    }

    // -- Delete --

    pub fn request_delete(&mut self, ids: &[ObjectId]) -> &PendingDelete {
        self.delete.propose(&self.store, ids)
    }

    /// Proposes deleting the current selection; `None` when nothing is selected.
    pub fn request_delete_selected(&mut self) -> Option<&PendingDelete> {
        if self.selection.is_empty() {
            return None;
        }
        let ids = self.selection.selected();
        Some(self.delete.propose(&self.store, &ids))
    }

    pub fn confirm_delete(&mut self) -> Result<DeleteReport> {
        let selected_before = self.selection.len();
        let report = self.delete.confirm(&mut self.store, &mut self.selection)?;
        if self.selection.len() < selected_before {
            self.properties.select(PropertiesKind::None, "");
        }
        Ok(report)
    }

    pub fn cancel_delete(&mut self) -> Result<()> {
        self.delete.cancel()
    }

    // -- Add --

    /// Adds a root object named from the config hint and selects it exclusively.
    pub fn add_object(&mut self, object_type: ObjectType) -> ObjectId {
        let id = self.store.add(self.config.name_hint(object_type), object_type);
        self.selection
            .select_only(&self.store, id, self.properties.as_mut());
        id
    }
}
