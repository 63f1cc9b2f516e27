//! Main application state and logic

use std::collections::HashMap;
use std::path::PathBuf;

use terrace_core::{
    Fact, FactContext, FactSnapshot, FactStack, RelationSource, StackBuilder, StackCache,
    StackConfig, StackDisplay, StackView,
};

use crate::ui::theme::StackTheme;
use crate::ui::Overlay;

/// Main application state
pub struct App {
    // Loaded data
    pub source: Option<PathBuf>,
    pub corpus_name: String,
    facts: Vec<Fact>,

    // Stacking
    pub context: FactContext,
    builder: StackBuilder,
    caches: HashMap<FactContext, StackCache>,
    stacks: Vec<FactStack>,
    region_len: usize,

    // UI state
    pub view: StackView,
    pub selected: usize,
    pub theme: StackTheme,
    overlay: Option<Overlay>,

    // Status
    status_message: Option<String>,
    pub pending_reload: bool,
}

impl App {
    /// Create an application over a loaded snapshot
    pub fn new(snapshot: FactSnapshot, source: Option<PathBuf>, config: StackConfig) -> Self {
        let mut app = Self {
            source,
            corpus_name: snapshot.metadata.corpus_name,
            facts: snapshot.facts,
            context: config.context.unwrap_or(FactContext::Knowledge),
            builder: StackBuilder::new(config),
            caches: HashMap::new(),
            stacks: Vec::new(),
            region_len: 0,
            view: StackView::new(),
            selected: 0,
            theme: StackTheme::default(),
            overlay: None,
            status_message: None,
            pending_reload: false,
        };

        // Open on the first non-empty context unless one was configured
        if config.context.is_none() && app.count_in(app.context) == 0 {
            if let Some(context) = FactContext::ALL.into_iter().find(|c| app.count_in(*c) > 0) {
                app.context = context;
            }
        }

        app.refresh();
        app
    }

    /// Recompute the stacks of the current context
    pub fn refresh(&mut self) {
        let region: Vec<Fact> = self
            .facts
            .iter()
            .filter(|f| f.context == self.context)
            .cloned()
            .collect();

        let cache = self.caches.entry(self.context).or_default();
        self.stacks = cache.stacks(&self.builder, &region).to_vec();
        self.region_len = region.len();

        self.view.retain(&self.stacks);
        self.selected = self.selected.min(self.stacks.len().saturating_sub(1));
    }

    /// Replace the loaded facts, keeping expansion state where primaries survive
    pub fn replace_snapshot(&mut self, snapshot: FactSnapshot) {
        self.corpus_name = snapshot.metadata.corpus_name;
        self.facts = snapshot.facts;
        self.refresh();
        self.set_status(format!("Reloaded {} facts", self.facts.len()));
    }

    /// Stacks of the current context
    pub fn stacks(&self) -> &[FactStack] {
        &self.stacks
    }

    /// How each stack of the current context is drawn
    pub fn layout(&self) -> Vec<StackDisplay<'_>> {
        self.view.layout(&self.stacks)
    }

    /// Number of facts in the current context
    pub fn region_len(&self) -> usize {
        self.region_len
    }

    /// Number of loaded facts in a context
    pub fn count_in(&self, context: FactContext) -> usize {
        self.facts.iter().filter(|f| f.context == context).count()
    }

    /// The relation source in use
    pub fn relation_source(&self) -> RelationSource {
        self.builder.relation_source()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to the next context
    pub fn next_context(&mut self) {
        self.switch_context(self.context.next());
    }

    /// Switch to the previous context
    pub fn previous_context(&mut self) {
        self.switch_context(self.context.previous());
    }

    fn switch_context(&mut self, context: FactContext) {
        self.context = context;
        self.selected = 0;
        self.refresh();
    }

    /// Move the selection down
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.stacks.len() {
            self.selected += 1;
        }
    }

    /// Move the selection up
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the first stack
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Select the last stack
    pub fn select_last(&mut self) {
        self.selected = self.stacks.len().saturating_sub(1);
    }

    /// The selected stack, if any
    pub fn selected_stack(&self) -> Option<&FactStack> {
        self.stacks.get(self.selected)
    }

    // =========================================================================
    // Stack actions
    // =========================================================================

    /// Expand or collapse the selected stack
    pub fn toggle_selected(&mut self) {
        let Some(stack) = self.selected_stack() else {
            return;
        };

        if stack.is_single() {
            self.set_status("Nothing to expand: no related facts");
            return;
        }

        let primary = stack.primary().id.clone();
        let related = stack.related_count();
        if self.view.toggle(&primary) {
            self.set_status(format!("Expanded {related} related facts"));
        } else {
            self.clear_status();
        }
    }

    /// Collapse every stack
    pub fn collapse_all(&mut self) {
        self.view.collapse_all();
        self.set_status("Collapsed all stacks");
    }

    /// Switch to the next relation source and recompute
    pub fn cycle_relation_source(&mut self) {
        let source = self.builder.relation_source().next();
        let config = self.builder.config().with_relation_source(source);
        self.builder = StackBuilder::new(config);
        self.refresh();
        self.set_status(format!("Relation source: {source}"));
    }

    /// Request a reload of the snapshot file
    pub fn request_reload(&mut self) {
        if self.source.is_some() {
            self.pending_reload = true;
        } else {
            self.set_status("Sample corpus has no file to reload");
        }
    }

    // =========================================================================
    // Overlay and status
    // =========================================================================

    /// Check if an overlay is shown
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// The overlay being shown
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Toggle the help overlay
    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Some(Overlay::Help) => None,
            None => Some(Overlay::Help),
        };
    }

    /// Close any overlay
    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// The current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
