//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans, applies
//! them to a loaded [`EntityGraph`] and writes the document back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::graph::vocabulary::{property, types, uri, ROOT_ID};
use crate::graph::{builders, link, unique_links, Entity, EntityGraph};

use super::plan::{OperationPlan, PlanAction, RootUpdate};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Whether a new action entity was added. False when the same command
    /// line had already been recorded.
    pub action_recorded: bool,

    /// Location of the written document; `None` in dry-run mode.
    pub document: Option<PathBuf>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            action_recorded: false,
            document: None,
        }
    }
}

/// Applies operation plans to a provenance graph.
///
/// The executor can run in normal mode (applying changes and persisting)
/// or dry-run mode (reporting without changes).
///
/// # Examples
///
/// ```no_run
/// use runprov::graph::EntityGraph;
/// use runprov::operations::{OperationPlan, PlanExecutor};
/// use std::path::Path;
///
/// let root = Path::new("/work");
/// let mut graph = EntityGraph::load(root).unwrap();
/// let plan = OperationPlan::new("Nothing to do");
///
/// let result = PlanExecutor::new(&mut graph, root).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert!(result.document.is_none());
/// ```
pub struct PlanExecutor<'a> {
    graph: &'a mut EntityGraph,
    crate_root: &'a Path,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor writing to `crate_root`.
    #[must_use]
    pub fn new(graph: &'a mut EntityGraph, crate_root: &'a Path) -> Self {
        Self {
            graph,
            crate_root,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode neither the graph nor the document is touched.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan and persists the graph.
    ///
    /// # Errors
    ///
    /// Returns a validation error, before anything is changed, if the plan
    /// would record an entity under an identifier that already names an
    /// entity of another kind. Returns an I/O error if the document cannot
    /// be written.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        self.check_conflicts(plan)?;
        let mut result = ExecutionResult::new(plan, self.dry_run);
        if self.dry_run {
            return Ok(result);
        }

        for action in &plan.actions {
            if self.execute_action(action) {
                result.action_recorded = true;
            }
        }

        result.document = Some(self.graph.persist(self.crate_root)?);
        Ok(result)
    }

    /// Applies one action. Returns true only when a new action entity was
    /// inserted.
    fn execute_action(&mut self, action: &PlanAction) -> bool {
        match action {
            PlanAction::ConformToProfile => {
                self.graph.insert_if_absent(builders::process_run_profile());
                self.graph.extend_context(uri::WORKFLOW_RUN_CONTEXT);
                self.graph
                    .root_mut()
                    .set(property::CONFORMS_TO, link(uri::PROCESS_RUN_PROFILE));
                false
            }
            PlanAction::AddSoftware(entity)
            | PlanAction::AddDirectory(entity)
            | PlanAction::AddAgent(entity) => {
                self.graph.insert_if_absent(entity.clone());
                false
            }
            PlanAction::UpsertFile(entity) => {
                self.graph.upsert(entity.clone(), refresh_file);
                false
            }
            PlanAction::AddAction(entity) => self.add_action(entity),
            PlanAction::UpdateRoot(update) => {
                self.update_root(update);
                false
            }
        }
    }

    fn check_conflicts(&self, plan: &OperationPlan) -> Result<()> {
        let mut claimed: HashMap<&str, &str> = HashMap::new();
        for (entity, kind) in plan.actions.iter().filter_map(PlanAction::claimed_entity) {
            let id = entity.id();
            if let Some(existing) = self.graph.get(id) {
                if !existing.is_a(kind) {
                    return Err(conflict(id, &existing.entity_type().to_string(), kind));
                }
            }
            if let Some(previous) = claimed.insert(id, kind) {
                if previous != kind {
                    return Err(conflict(id, previous, kind));
                }
            }
        }
        Ok(())
    }

    /// Inserts the action unless the same command line was recorded
    /// before. When another kind of entity holds the command line as its
    /// identifier, the action is stored as `#<command line>`.
    fn add_action(&mut self, action: &Entity) -> bool {
        let mut action = action.clone();
        let taken = self
            .graph
            .get(action.id())
            .map_or(false, |existing| !existing.is_a(types::CREATE_ACTION));
        if taken {
            let id = format!("#{}", action.id());
            action = action.with_id(id);
        }

        match self.graph.get(action.id()) {
            Some(existing) if existing.is_a(types::CREATE_ACTION) => {
                log::debug!("Action '{}' already recorded, leaving it unchanged", action.id());
                false
            }
            Some(_) => {
                log::warn!("Identifier '{}' is in use, action not recorded", action.id());
                false
            }
            None => self.graph.insert_if_absent(action),
        }
    }

    fn update_root(&mut self, update: &RootUpdate) {
        let root = self.graph.root_mut();

        let mut parts = root.links(property::HAS_PART);
        parts.extend(update.has_part.iter().cloned());
        let parts = unique_links(parts.iter().filter(|id| id.as_str() != ROOT_ID));
        root.set_links(property::HAS_PART, &parts);

        root.set(property::DATE_PUBLISHED, update.date_published.as_str());
        if let Some(license) = &update.license {
            root.set(property::LICENSE, license.as_str());
        }
        if root.get_str(property::NAME).map_or(true, str::is_empty) {
            root.set(property::NAME, update.default_name.as_str());
        }
        if root.get_str(property::DESCRIPTION).map_or(true, str::is_empty) {
            root.set(property::DESCRIPTION, update.default_description.as_str());
        }
    }
}

/// Merge for file entities: refresh the measured fields, keep everything
/// else.
fn refresh_file(existing: &mut Entity, new: Entity) {
    for key in [
        property::DESCRIPTION,
        property::CONTENT_SIZE,
        property::ENCODING_FORMAT,
    ] {
        if let Some(value) = new.get(key) {
            existing.set(key, value.clone());
        }
    }
}

fn conflict(id: &str, existing: &str, wanted: &str) -> Error {
    Error::validation(
        id,
        format!("already recorded as {existing}, cannot also record it as {wanted}"),
    )
}
