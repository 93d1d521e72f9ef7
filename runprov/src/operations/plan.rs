//! Plan types for recording operations.
//!
//! A plan lists every graph change a recording will make. All paths have
//! been resolved and all files measured by the time a plan exists, so
//! executing it cannot fail on a bad path.

use crate::graph::vocabulary::types;
use crate::graph::Entity;

/// Changes to the root dataset that close a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RootUpdate {
    /// Data entities to add to `hasPart`, in recording order.
    pub has_part: Vec<String>,
    /// New `datePublished`, the recording's end time.
    pub date_published: String,
    /// License to set, if one was given.
    pub license: Option<String>,
    /// Name used when the root has none yet.
    pub default_name: String,
    /// Description used when the root has none yet.
    pub default_description: String,
}

/// A single change to the provenance graph.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Add the Process Run Crate profile entity and its context.
    ConformToProfile,

    /// Add the software entity unless one with that id exists.
    AddSoftware(Entity),

    /// Add a file entity, or refresh description, size and format of an
    /// existing one.
    UpsertFile(Entity),

    /// Add a directory entity unless one with that id exists.
    AddDirectory(Entity),

    /// Add the person entity unless one with that id exists.
    AddAgent(Entity),

    /// Add the action entity unless one with that id exists.
    AddAction(Entity),

    /// Update the root dataset.
    UpdateRoot(RootUpdate),
}

impl PlanAction {
    /// The entity this action adds under its own identifier, with the type
    /// an existing entity at that identifier must already have. Actions and
    /// root updates claim nothing.
    #[must_use]
    pub fn claimed_entity(&self) -> Option<(&Entity, &'static str)> {
        match self {
            Self::AddSoftware(e) => Some((e, types::SOFTWARE_APPLICATION)),
            Self::UpsertFile(e) => Some((e, types::FILE)),
            Self::AddDirectory(e) => Some((e, types::DATASET)),
            Self::AddAgent(e) => Some((e, types::PERSON)),
            Self::ConformToProfile | Self::AddAction(_) | Self::UpdateRoot(_) => None,
        }
    }

    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ConformToProfile => "Declare conformance to the Process Run Crate profile".to_string(),
            Self::AddSoftware(e) => format!("Add software {}", e.id()),
            Self::UpsertFile(e) => format!("Record file {}", e.id()),
            Self::AddDirectory(e) => format!("Record directory {}", e.id()),
            Self::AddAgent(e) => format!("Add agent {}", e.id()),
            Self::AddAction(e) => format!("Record action {}", e.id()),
            Self::UpdateRoot(update) => format!(
                "Update root dataset ({} parts, published {})",
                update.has_part.len(),
                update.date_published
            ),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use runprov::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Record tool run");
    /// assert_eq!(plan.description, "Record tool run");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use runprov::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_warning("This is a warning");
    ///
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builders;

    #[test]
    fn test_actions_preserve_order() {
        let plan = OperationPlan::new("test")
            .add_action(PlanAction::ConformToProfile)
            .add_action(PlanAction::AddAgent(builders::person("alice")))
            .add_action(PlanAction::UpsertFile(builders::file("a", "", 0, "text/plain")));

        assert_eq!(plan.len(), 3);
        assert!(matches!(plan.actions[0], PlanAction::ConformToProfile));
        assert!(matches!(plan.actions[1], PlanAction::AddAgent(_)));
        assert!(matches!(plan.actions[2], PlanAction::UpsertFile(_)));
    }

    #[test]
    fn test_descriptions_name_the_entity() {
        let action = PlanAction::AddDirectory(builders::directory("results/", "results", ""));
        assert_eq!(action.description(), "Record directory results/");
        assert!(!PlanAction::ConformToProfile.description().is_empty());
    }

    #[test]
    fn test_warnings_preserve_order() {
        let plan = OperationPlan::new("test").add_warning("first").add_warning("second");
        assert_eq!(plan.warnings, vec!["first", "second"]);
    }
}
