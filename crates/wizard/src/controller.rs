//! # Wizard Controller
//!
//! Drives the project wizard: step navigation, technology selections, the
//! entity editor and the calls to the scaffolding service.
//!
//! ## Steps
//!
//! `ProjectDetails → Technology → Architecture → Database → Entities → Review`
//!
//! Advancing requires the current step to be complete. Going back is always
//! allowed.
//!
//! ## Rejections
//!
//! Editor operations never panic and never leave the store half-updated.
//! A rejected operation stores its reason in [`WizardController::message`]
//! and returns `None`/`false`.

use regex::Regex;
use std::sync::LazyLock;
use studio_codegen::render_preview;
use studio_core::{EntityId, StudioError, StudioResult};
use studio_diagram::{DiagramSnapshot, LayoutConfig, build_diagram};
use studio_ir::{
    ColumnDraft, Entity, EntityStore, GenerationRequest, RelationshipDraft, ValidationResult,
    validate_entities,
};

use crate::api::{ApiError, ScaffoldApi, TechnologyOptions, wait_for_job};
use crate::auth::AuthContext;
use crate::config::{ApiConfig, StudioConfig};

/// Allowed project names
pub const PROJECT_NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_-]*$";

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROJECT_NAME_PATTERN).expect("project name pattern is valid"));

/// Check a project name against [`PROJECT_NAME_PATTERN`]
pub fn is_valid_project_name(name: &str) -> bool {
    PROJECT_NAME_RE.is_match(name)
}

// ============================================================================
// WizardStep
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    ProjectDetails,
    Technology,
    Architecture,
    Database,
    Entities,
    Review,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::ProjectDetails,
            WizardStep::Technology,
            WizardStep::Architecture,
            WizardStep::Database,
            WizardStep::Entities,
            WizardStep::Review,
        ]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::ProjectDetails => "Project Details",
            WizardStep::Technology => "Technology",
            WizardStep::Architecture => "Architecture",
            WizardStep::Database => "Database",
            WizardStep::Entities => "Entities",
            WizardStep::Review => "Review",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::all().get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::all()[i])
    }
}

// ============================================================================
// ViewState
// ============================================================================

/// Presentation flags with no bearing on the model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub dark_mode: bool,
    pub entity_modal_open: bool,
    pub fullscreen_diagram: bool,
    pub hovered_entity: Option<EntityId>,
}

impl ViewState {
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_diagram = !self.fullscreen_diagram;
    }

    pub fn hover(&mut self, entity: Option<EntityId>) {
        self.hovered_entity = entity;
    }
}

// ============================================================================
// WizardController
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct WizardController {
    step: WizardStep,

    pub project_name: String,
    pub project_description: String,

    technology: Option<String>,
    architecture: Option<String>,
    design_pattern: Option<String>,
    database: Option<String>,
    pub connection_string: String,

    /// Technologies offered by the service
    pub available_technologies: Vec<String>,

    /// Choices for the selected technology
    pub options: TechnologyOptions,

    store: EntityStore,
    draft: Option<Entity>,

    /// Last user-visible rejection or failure
    pub message: Option<String>,

    /// Download link of the last completed generation
    pub download_url: Option<String>,

    pub view: ViewState,
    pub auth: AuthContext,

    layout: LayoutConfig,
    api_config: ApiConfig,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            layout: config.layout,
            api_config: config.api.clone(),
            ..Self::default()
        }
    }

    /// Restore selections and entities from a saved snapshot
    pub fn load_request(&mut self, request: &GenerationRequest) {
        fn choice(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        self.project_name = request.project_name.clone();
        self.project_description = request.project_description.clone();
        self.technology = choice(&request.technology);
        self.architecture = choice(&request.architecture);
        self.design_pattern = choice(&request.design_pattern);
        self.database = choice(&request.database);
        self.connection_string = request.connection_string.clone();
        self.store = request.to_store();
        self.draft = None;
        tracing::info!(
            "Loaded project '{}' with {} entities",
            self.project_name,
            self.store.len()
        );
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    pub fn architecture(&self) -> Option<&str> {
        self.architecture.as_deref()
    }

    pub fn design_pattern(&self) -> Option<&str> {
        self.design_pattern.as_deref()
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn draft(&self) -> Option<&Entity> {
        self.draft.as_ref()
    }

    // ========================================================================
    // Selections
    // ========================================================================

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn set_project_description(&mut self, description: impl Into<String>) {
        self.project_description = description.into();
    }

    /// Choose a technology; a different choice clears the dependent selections
    pub fn set_technology(&mut self, technology: impl Into<String>) {
        let technology = technology.into();
        if self.technology.as_deref() == Some(technology.as_str()) {
            return;
        }
        tracing::info!("Technology set to '{}'", technology);
        self.technology = Some(technology);
        self.architecture = None;
        self.design_pattern = None;
        self.database = None;
        self.options = TechnologyOptions::default();
    }

    pub fn set_architecture(&mut self, architecture: impl Into<String>) {
        self.architecture = Some(architecture.into());
    }

    pub fn set_design_pattern(&mut self, pattern: impl Into<String>) {
        self.design_pattern = Some(pattern.into());
    }

    pub fn set_database(&mut self, database: impl Into<String>) {
        self.database = Some(database.into());
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Whether `step` has everything it needs
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::ProjectDetails => is_valid_project_name(&self.project_name),
            WizardStep::Technology => self.technology.is_some(),
            WizardStep::Architecture => {
                self.architecture.is_some() && self.design_pattern.is_some()
            }
            WizardStep::Database => self.database.is_some(),
            WizardStep::Entities => !self.store.is_empty(),
            WizardStep::Review => {
                WizardStep::all()
                    .iter()
                    .take_while(|s| **s != WizardStep::Review)
                    .all(|s| self.is_step_complete(*s))
                    && !self.validate().has_errors()
            }
        }
    }

    /// Advance one step if the current one is complete
    pub fn next(&mut self) -> bool {
        if !self.is_step_complete(self.step) {
            self.reject(format!(
                "Complete the {} step before continuing",
                self.step.display_name()
            ));
            return false;
        }
        match self.step.next() {
            Some(step) => {
                self.enter(step);
                true
            }
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.enter(step);
                true
            }
            None => false,
        }
    }

    /// Jump to `step`; moving forward requires every earlier step to be complete
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        if let Some(blocking) = WizardStep::all()[..step.index()]
            .iter()
            .find(|s| !self.is_step_complete(**s))
        {
            self.reject(format!(
                "Complete the {} step first",
                blocking.display_name()
            ));
            return false;
        }
        self.enter(step);
        true
    }

    /// Percentage of completed steps
    pub fn progress(&self) -> u8 {
        let steps = WizardStep::all();
        let done = steps.iter().filter(|s| self.is_step_complete(**s)).count();
        (done * 100 / steps.len()) as u8
    }

    fn enter(&mut self, step: WizardStep) {
        tracing::info!("Wizard step {} -> {}", self.step.display_name(), step.display_name());
        self.step = step;
        self.message = None;
    }

    // ========================================================================
    // Entity editor
    // ========================================================================

    /// Open the editor on a fresh draft
    pub fn new_entity_draft(&mut self) {
        self.draft = Some(self.store.create_entity());
        self.view.entity_modal_open = true;
        self.message = None;
    }

    /// Open the editor on a copy of a committed entity
    pub fn edit_entity(&mut self, id: EntityId) -> bool {
        let found = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| StudioError::EntityNotFound(id.to_string()));
        match self.record(found) {
            Some(entity) => {
                self.draft = Some(entity);
                self.view.entity_modal_open = true;
                true
            }
            None => false,
        }
    }

    pub fn draft_rename(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let result = self.with_draft(|draft| {
            draft.rename(name);
            Ok(())
        });
        self.record(result).is_some()
    }

    /// Returns the new column's index
    pub fn draft_add_column(&mut self, column: ColumnDraft) -> Option<usize> {
        let result = self.with_draft(|draft| draft.add_column(column));
        self.record(result)
    }

    pub fn draft_update_column(&mut self, index: usize, column: ColumnDraft) -> bool {
        let result = self.with_draft(|draft| draft.update_column(index, column));
        self.record(result).is_some()
    }

    pub fn draft_delete_column(&mut self, index: usize) -> bool {
        let result = self.with_draft(|draft| draft.delete_column(index).map(|_| ()));
        self.record(result).is_some()
    }

    pub fn draft_add_relationship(&mut self, relationship: RelationshipDraft) -> bool {
        let target = relationship.to_entity;
        let target_known = self.store.contains(target)
            || self.draft.as_ref().is_some_and(|d| d.id == target);
        let result = if target_known {
            self.with_draft(|draft| draft.add_relationship(relationship))
        } else {
            Err(StudioError::RelationshipValidation(format!(
                "target entity {} does not exist",
                target
            )))
        };
        self.record(result).is_some()
    }

    pub fn draft_remove_relationship(&mut self, to_entity: EntityId) -> bool {
        let result = self.with_draft(|draft| {
            draft
                .remove_relationship(to_entity)
                .map(|_| ())
                .ok_or_else(|| {
                    StudioError::RelationshipValidation("no such relationship".to_string())
                })
        });
        self.record(result).is_some()
    }

    /// Save the draft into the store and close the editor
    ///
    /// A rejected draft stays open so it can be fixed.
    pub fn commit_draft(&mut self) -> Option<EntityId> {
        let result = match self.draft.clone() {
            Some(draft) => self.store.save_entity(draft),
            None => Err(StudioError::NoActiveDraft),
        };
        let id = self.record(result)?;
        self.draft = None;
        self.view.entity_modal_open = false;
        Some(id)
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
        self.view.entity_modal_open = false;
    }

    /// Delete a committed entity; relationships and foreign keys pointing at
    /// it go too, including those in the open draft
    pub fn delete_entity(&mut self, id: EntityId) -> bool {
        let removed = self.store.delete_entity(id).is_some();
        if self.draft.as_ref().is_some_and(|d| d.id == id) {
            self.cancel_draft();
        } else if let Some(draft) = self.draft.as_mut() {
            draft.detach_entity(id);
        }
        if self.view.hovered_entity == Some(id) {
            self.view.hovered_entity = None;
        }
        removed
    }

    pub fn select_entity(&mut self, id: Option<EntityId>) {
        self.store.select_entity(id);
    }

    fn with_draft<T>(
        &mut self,
        op: impl FnOnce(&mut Entity) -> StudioResult<T>,
    ) -> StudioResult<T> {
        match self.draft.as_mut() {
            Some(draft) => op(draft),
            None => Err(StudioError::NoActiveDraft),
        }
    }

    fn record<T>(&mut self, result: StudioResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.message = None;
                Some(value)
            }
            Err(err) => {
                self.reject(err.to_string());
                None
            }
        }
    }

    fn reject(&mut self, message: String) {
        tracing::warn!("Rejected: {}", message);
        self.message = Some(message);
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Positions, connectors and group colors for the committed entities
    pub fn diagram(&self, fullscreen: bool) -> DiagramSnapshot {
        let config = if fullscreen {
            LayoutConfig::fullscreen()
                .with_columns(self.layout.columns)
                .with_base_row_height(self.layout.base_row_height)
        } else {
            self.layout
        };
        build_diagram(self.store.entities(), &config)
    }

    /// Code preview of the selected entity for the chosen technology
    pub fn preview(&self) -> String {
        render_preview(
            self.store.selected_entity(),
            self.store.entities(),
            self.technology.as_deref().unwrap_or_default(),
            &self.project_name,
        )
    }

    pub fn validate(&self) -> ValidationResult {
        validate_entities(self.store.entities())
    }

    /// Snapshot of the wizard as sent to the service
    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest::new(self.project_name.clone())
            .with_description(self.project_description.clone())
            .with_technology(self.technology.clone().unwrap_or_default())
            .with_architecture(self.architecture.clone().unwrap_or_default())
            .with_design_pattern(self.design_pattern.clone().unwrap_or_default())
            .with_database(self.database.clone().unwrap_or_default())
            .with_connection_string(self.connection_string.clone())
            .with_entities_from(&self.store)
    }

    // ========================================================================
    // Service calls
    // ========================================================================

    pub async fn load_technologies(&mut self, api: &dyn ScaffoldApi) -> bool {
        match api.technologies().await {
            Ok(technologies) => {
                self.available_technologies = technologies;
                true
            }
            Err(err) => self.api_failure("load technologies", err),
        }
    }

    /// Fetch architectures, design patterns and databases for the chosen technology
    pub async fn load_options(&mut self, api: &dyn ScaffoldApi) -> bool {
        let Some(technology) = self.technology.clone() else {
            self.reject("Choose a technology first".to_string());
            return false;
        };
        match api.options(&technology).await {
            Ok(options) => {
                self.options = options;
                true
            }
            Err(err) => self.api_failure("load options", err),
        }
    }

    /// Submit the project and wait for the generated archive
    ///
    /// Requires a signed-in user. The entity store is never modified here.
    pub async fn submit_generation(&mut self, api: &dyn ScaffoldApi) -> Option<String> {
        if !self.auth.is_authenticated() {
            self.reject("Sign in to generate a project".to_string());
            return None;
        }
        if let Some(blocking) = WizardStep::all()
            .iter()
            .find(|s| !self.is_step_complete(**s))
        {
            self.reject(format!(
                "Complete the {} step first",
                blocking.display_name()
            ));
            return None;
        }

        let request = self.generation_request();
        let outcome = match api.start_generation(&request).await {
            Ok(job_id) => {
                wait_for_job(
                    api,
                    &job_id,
                    self.api_config.poll_interval(),
                    self.api_config.max_poll_attempts,
                )
                .await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(url) => {
                tracing::info!("Generation finished: {}", url);
                self.message = None;
                self.download_url = Some(url.clone());
                Some(url)
            }
            Err(err) => {
                self.api_failure("generate project", err);
                None
            }
        }
    }

    fn api_failure(&mut self, action: &str, err: ApiError) -> bool {
        tracing::warn!("Failed to {}: {} (retryable: {})", action, err, err.should_retry());
        self.message = Some(format!("Could not {}: {}", action, err));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, JobId, JobStatus};
    use crate::auth::UserProfile;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use studio_codegen::{NO_SELECTION_PLACEHOLDER, UNSUPPORTED_TECHNOLOGY_PLACEHOLDER};
    use studio_core::{ColumnType, RelationType};

    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeApi {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ScaffoldApi for FakeApi {
        async fn technologies(&self) -> ApiResult<Vec<String>> {
            if self.fail {
                return Err(ApiError::Transport("connection refused".into()));
            }
            Ok(vec!["DotNet".into(), "Java".into(), "NodeJs".into()])
        }

        async fn options(&self, technology: &str) -> ApiResult<TechnologyOptions> {
            if self.fail {
                return Err(ApiError::Timeout);
            }
            Ok(TechnologyOptions {
                architectures: vec![format!("{} Clean", technology)],
                design_patterns: vec!["Repository".into()],
                databases: vec!["PostgreSQL".into()],
            })
        }

        async fn start_generation(&self, request: &GenerationRequest) -> ApiResult<JobId> {
            if self.fail {
                return Err(ApiError::Http {
                    status: 500,
                    body: "boom".into(),
                });
            }
            self.requests.lock().unwrap().push(request.clone());
            Ok(JobId("job-1".into()))
        }

        async fn job_status(&self, _job_id: &JobId) -> ApiResult<JobStatus> {
            Ok(JobStatus::completed("https://files.test/shop.zip"))
        }
    }

    fn commit_entity(wizard: &mut WizardController, name: &str) -> EntityId {
        wizard.new_entity_draft();
        assert!(wizard.draft_rename(name));
        wizard.commit_draft().unwrap()
    }

    fn ready_wizard() -> WizardController {
        let mut wizard = WizardController::new()
            .with_auth(AuthContext::signed_in(UserProfile::new("Dev")));
        wizard.set_project_name("Shop");
        wizard.set_technology("DotNet");
        wizard.set_architecture("Clean");
        wizard.set_design_pattern("Repository");
        wizard.set_database("PostgreSQL");
        commit_entity(&mut wizard, "Customer");
        wizard
    }

    #[test]
    fn test_project_name_pattern() {
        assert!(is_valid_project_name("Shop"));
        assert!(is_valid_project_name("my-shop_2"));
        assert!(!is_valid_project_name(""));
        assert!(!is_valid_project_name("2shop"));
        assert!(!is_valid_project_name("my shop"));
    }

    #[test]
    fn test_navigation_requires_complete_steps() {
        let mut wizard = WizardController::new();
        assert!(!wizard.next());
        assert!(wizard.message.is_some());
        assert_eq!(wizard.step(), WizardStep::ProjectDetails);

        wizard.set_project_name("Shop");
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Technology);
        assert!(wizard.message.is_none());

        assert!(!wizard.go_to(WizardStep::Entities));
        assert!(wizard.previous());
        assert!(!wizard.previous());
        assert_eq!(wizard.step(), WizardStep::ProjectDetails);
    }

    #[test]
    fn test_progress() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.progress(), 0);
        wizard.set_project_name("Shop");
        assert_eq!(wizard.progress(), 16);

        let wizard = ready_wizard();
        assert_eq!(wizard.progress(), 100);
    }

    #[test]
    fn test_review_waits_for_earlier_steps() {
        let mut wizard = WizardController::new();
        assert!(!wizard.is_step_complete(WizardStep::Review));

        commit_entity(&mut wizard, "Customer");
        assert!(!wizard.validate().has_errors());
        assert!(!wizard.is_step_complete(WizardStep::Review));

        let mut wizard = ready_wizard();
        assert!(wizard.is_step_complete(WizardStep::Review));
        wizard.set_technology("Java");
        assert!(!wizard.is_step_complete(WizardStep::Review));
    }

    #[test]
    fn test_changing_technology_clears_dependent_choices() {
        let mut wizard = ready_wizard();
        wizard.set_technology("DotNet");
        assert_eq!(wizard.architecture(), Some("Clean"));

        wizard.set_technology("Java");
        assert_eq!(wizard.architecture(), None);
        assert_eq!(wizard.design_pattern(), None);
        assert_eq!(wizard.database(), None);
        assert!(!wizard.is_step_complete(WizardStep::Architecture));
    }

    #[test]
    fn test_rejections_surface_as_message() {
        let mut wizard = WizardController::new();
        assert_eq!(
            wizard.draft_add_column(ColumnDraft::new("Price", ColumnType::Decimal)),
            None
        );
        assert_eq!(
            wizard.message.as_deref(),
            Some("No entity is currently being edited")
        );

        wizard.new_entity_draft();
        assert!(wizard.view.entity_modal_open);
        assert!(!wizard.draft_delete_column(0));
        assert!(wizard.message.as_deref().unwrap().contains("cannot be deleted"));

        // Unnamed drafts cannot be saved and stay open
        assert_eq!(wizard.commit_draft(), None);
        assert!(wizard.draft().is_some());
        assert!(wizard.store().is_empty());
    }

    #[test]
    fn test_editor_round_trip() {
        let mut wizard = WizardController::new();
        let customer = commit_entity(&mut wizard, "Customer");
        let order = commit_entity(&mut wizard, "Order");

        assert!(wizard.edit_entity(order));
        assert_eq!(
            wizard.draft_add_column(
                ColumnDraft::new("CustomerId", ColumnType::Integer).references(customer)
            ),
            Some(2)
        );
        assert!(wizard.draft_add_relationship(RelationshipDraft::new(
            customer,
            RelationType::ManyToOne
        )));
        assert!(!wizard.draft_add_relationship(RelationshipDraft::new(
            customer,
            RelationType::OneToOne
        )));
        assert_eq!(
            wizard.message.as_deref(),
            Some(studio_core::error::DUPLICATE_RELATIONSHIP_MESSAGE)
        );
        assert!(!wizard.draft_add_relationship(RelationshipDraft::new(
            uuid::Uuid::now_v7(),
            RelationType::OneToOne
        )));
        assert_eq!(wizard.commit_draft(), Some(order));
        assert!(!wizard.view.entity_modal_open);

        assert_eq!(wizard.store().relationship_count(), 1);
        assert_eq!(wizard.store().get(order).unwrap().column_count(), 3);

        assert!(wizard.delete_entity(customer));
        assert_eq!(wizard.store().relationship_count(), 0);
        assert!(!wizard.delete_entity(customer));
    }

    #[test]
    fn test_delete_detaches_open_draft() {
        let mut wizard = ready_wizard();
        let customer = wizard.store().get_by_name("Customer").unwrap().id;
        let order = commit_entity(&mut wizard, "Order");

        assert!(wizard.edit_entity(order));
        let fk = ColumnDraft::new("CustomerId", ColumnType::Integer).references(customer);
        assert!(wizard.draft_add_column(fk).is_some());
        assert!(wizard.draft_add_relationship(RelationshipDraft::new(
            customer,
            RelationType::ManyToOne
        )));

        assert!(wizard.delete_entity(customer));
        assert!(wizard.view.entity_modal_open);
        assert_eq!(wizard.commit_draft(), Some(order));

        let order = wizard.store().get(order).unwrap();
        assert!(order.relationships.is_empty());
        assert!(order.columns.iter().all(|c| c.referenced_entity.is_none()));
        assert!(!wizard.validate().has_errors());
        assert!(wizard.is_step_complete(WizardStep::Review));
    }

    #[test]
    fn test_delete_clears_foreign_keys_in_store() {
        let mut wizard = WizardController::new();
        let customer = commit_entity(&mut wizard, "Customer");
        let order = commit_entity(&mut wizard, "Order");
        assert!(wizard.edit_entity(order));
        let fk = ColumnDraft::new("CustomerId", ColumnType::Integer).references(customer);
        assert!(wizard.draft_add_column(fk).is_some());
        assert_eq!(wizard.commit_draft(), Some(order));

        assert!(wizard.delete_entity(customer));
        assert!(!wizard.validate().has_errors());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut wizard = WizardController::new();
        let id = commit_entity(&mut wizard, "Customer");
        assert!(wizard.edit_entity(id));
        assert!(wizard.draft_rename("Client"));
        wizard.cancel_draft();
        assert_eq!(wizard.store().get(id).unwrap().name, "Customer");
        assert!(!wizard.edit_entity(uuid::Uuid::now_v7()));
    }

    #[test]
    fn test_preview_follows_selection_and_technology() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.preview(), UNSUPPORTED_TECHNOLOGY_PLACEHOLDER);

        wizard.set_technology("Java");
        assert_eq!(wizard.preview(), NO_SELECTION_PLACEHOLDER);

        let id = commit_entity(&mut wizard, "Customer");
        assert!(wizard.preview().contains("public class Customer"));

        wizard.select_entity(None);
        assert_eq!(wizard.preview(), NO_SELECTION_PLACEHOLDER);
        wizard.select_entity(Some(id));
        wizard.set_technology("Cobol");
        assert_eq!(wizard.preview(), UNSUPPORTED_TECHNOLOGY_PLACEHOLDER);
    }

    #[test]
    fn test_diagram_views() {
        let mut wizard = WizardController::new();
        let a = commit_entity(&mut wizard, "A");
        commit_entity(&mut wizard, "B");

        let normal = wizard.diagram(false);
        let full = wizard.diagram(true);
        assert_eq!(normal.layout.len(), 2);
        assert_eq!(normal.layout.get(a).unwrap().x, 40.0);
        assert_eq!(full.layout.get(a).unwrap().x, 60.0);
        assert_eq!(normal.groups.group_count(), 2);

        wizard.layout = wizard.layout.with_columns(1).with_base_row_height(300.0);
        let full = wizard.diagram(true);
        assert_eq!(full.layout.get(a).unwrap().height, 300.0);
        assert_eq!(full.layout.get(a).unwrap().column, 0);
    }

    #[tokio::test]
    async fn test_load_technologies_and_options() {
        let api = FakeApi::default();
        let mut wizard = WizardController::new();

        assert!(!wizard.load_options(&api).await);
        assert!(wizard.load_technologies(&api).await);
        assert_eq!(wizard.available_technologies.len(), 3);

        wizard.set_technology("Java");
        assert!(wizard.load_options(&api).await);
        assert_eq!(wizard.options.architectures, vec!["Java Clean"]);
    }

    #[tokio::test]
    async fn test_api_failures_become_messages() {
        let api = FakeApi::failing();
        let mut wizard = ready_wizard();
        let before = wizard.store().len();

        assert!(!wizard.load_technologies(&api).await);
        assert!(wizard.message.as_deref().unwrap().contains("connection refused"));

        assert_eq!(wizard.submit_generation(&api).await, None);
        assert!(wizard.message.as_deref().unwrap().contains("http 500"));
        assert_eq!(wizard.store().len(), before);
    }

    #[tokio::test]
    async fn test_submit_generation() {
        let api = FakeApi::default();

        let mut anonymous = ready_wizard().with_auth(AuthContext::anonymous());
        assert_eq!(anonymous.submit_generation(&api).await, None);
        assert!(api.requests.lock().unwrap().is_empty());

        let mut wizard = ready_wizard();
        let url = wizard.submit_generation(&api).await;
        assert_eq!(url.as_deref(), Some("https://files.test/shop.zip"));
        assert_eq!(wizard.download_url, url);

        let sent = api.requests.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].project_name, "Shop");
        assert_eq!(sent[0].technology, "DotNet");
        assert_eq!(sent[0].entities.len(), 1);
    }

    #[test]
    fn test_load_request_restores_wizard() {
        let source = ready_wizard();
        let request = source.generation_request();

        let mut wizard = WizardController::from_config(&StudioConfig::new());
        wizard.load_request(&request);
        assert_eq!(wizard.project_name, "Shop");
        assert_eq!(wizard.technology(), Some("DotNet"));
        assert_eq!(wizard.database(), Some("PostgreSQL"));
        assert_eq!(wizard.store().len(), 1);
        assert_eq!(wizard.generation_request(), request);

        wizard.load_request(&GenerationRequest::new("Empty"));
        assert_eq!(wizard.technology(), None);
        assert!(!wizard.is_step_complete(WizardStep::Entities));
    }
}
