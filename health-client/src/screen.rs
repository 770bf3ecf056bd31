//! Record management screens.
//!
//! A [`ListScreen`] ties a [`ListController`] to the dialog of the screen
//! and to the mutations of one resource: delete with confirmation, create
//! through a validated form, and spreadsheet import.

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{ImportSummary, Parent, ParentCreate, Staff, StaffCreate, UserAccount};
use shared::{ListQuery, ListResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::api::SchoolHealthApi;
use crate::dialog::{ActiveDialog, DialogState};
use crate::forms::{FormErrors, validate_form};
use crate::http::{HttpClient, UploadFile};
use crate::list::{FetchOutcome, ListController, ListSource, sort_parents_page};
use crate::{ClientConfig, ClientError, ClientResult};

const DELETED: &str = "Deleted successfully.";
const CREATED: &str = "Created successfully.";

/// A row that can be targeted by delete
pub trait ListRecord: Send + Sync {
    fn id(&self) -> &str;
    /// What the confirm dialog calls the record
    fn label(&self) -> &str;
}

impl ListRecord for Staff {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.full_name
    }
}

impl ListRecord for Parent {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.full_name
    }
}

impl ListRecord for UserAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.full_name
    }
}

/// A resource with a list endpoint and a delete endpoint
#[async_trait]
pub trait ManagedResource: Send + Sync + 'static {
    type Record: ListRecord + 'static;

    async fn list(&self, query: &ListQuery) -> ClientResult<ListResponse<Self::Record>>;

    /// Returns the server's confirmation message, if any
    async fn delete(&self, id: &str) -> ClientResult<Option<String>>;
}

#[async_trait]
pub trait CreatableResource: ManagedResource {
    type Create: Validate + Send + Sync;

    /// Dialog that hosts the create form
    fn create_dialog() -> ActiveDialog;

    async fn create(&self, payload: &Self::Create) -> ClientResult<Self::Record>;
}

#[async_trait]
pub trait ImportableResource: ManagedResource {
    async fn import(&self, file: UploadFile) -> ClientResult<ImportSummary>;
}

/// Adapts a [`ManagedResource`] to the list controller
pub struct ResourceSource<R>(Arc<R>);

#[async_trait]
impl<R: ManagedResource> ListSource<R::Record> for ResourceSource<R> {
    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<ListResponse<R::Record>> {
        self.0.list(query).await
    }
}

/// Result of submitting a create form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Saved(T),
    /// The form did not validate; the dialog stays open
    Invalid(FormErrors),
    /// The request failed; an error alert is showing
    Failed,
}

pub struct ListScreen<R: ManagedResource> {
    resource: Arc<R>,
    list: ListController<R::Record, ResourceSource<R>>,
    dialogs: DialogState,
}

impl<R: ManagedResource> ListScreen<R> {
    pub fn new(resource: R, query: ListQuery, config: &ClientConfig) -> Self {
        let resource = Arc::new(resource);
        let source = ResourceSource(Arc::clone(&resource));
        Self {
            resource,
            list: ListController::new(source, query, config.search_debounce()),
            dialogs: DialogState::new(),
        }
    }

    /// Re-order each loaded page locally
    pub fn with_page_sort(
        mut self,
        sort: impl Fn(&mut [R::Record]) + Send + Sync + 'static,
    ) -> Self {
        self.list = self.list.with_page_sort(sort);
        self
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn list(&self) -> &ListController<R::Record, ResourceSource<R>> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<R::Record, ResourceSource<R>> {
        &mut self.list
    }

    pub fn dialogs(&self) -> &DialogState {
        &self.dialogs
    }

    pub async fn load(&mut self) -> FetchOutcome {
        self.list.fetch().await
    }

    /// Open the confirm dialog for a record on the current page
    pub fn request_delete(&mut self, id: &str) -> bool {
        let Some(record) = self.list.items().iter().find(|r| r.id() == id) else {
            warn!(id = %id, "Delete requested for a record not on this page");
            return false;
        };
        self.dialogs.open(ActiveDialog::ConfirmDelete {
            id: record.id().to_string(),
            label: record.label().to_string(),
        });
        true
    }

    /// Close whatever dialog is open
    pub fn cancel(&mut self) {
        self.dialogs.close();
    }

    /// Delete the record named by the confirm dialog, then reload the page
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.dialogs.pending_delete().map(str::to_string) else {
            return false;
        };
        self.dialogs.close();
        match self.resource.delete(&id).await {
            Ok(message) => {
                info!(id = %id, "Record removed from list");
                self.list.fetch().await;
                self.dialogs.success(message.unwrap_or_else(|| DELETED.to_string()));
                true
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Delete failed");
                self.dialogs.error(&e);
                false
            }
        }
    }

    fn report(&mut self, err: &ClientError) {
        warn!(error = %err, "Request failed");
        self.dialogs.error(err);
    }
}

impl<R: CreatableResource> ListScreen<R> {
    pub fn open_create(&mut self) {
        self.dialogs.open(R::create_dialog());
    }

    /// Validate and send the create form. Validation errors never leave the
    /// form; other failures become an alert.
    pub async fn submit_create(&mut self, payload: &R::Create) -> SubmitOutcome<R::Record> {
        if let Err(errors) = validate_form(payload) {
            return SubmitOutcome::Invalid(errors);
        }
        match self.resource.create(payload).await {
            Ok(record) => {
                self.dialogs.close();
                self.list.fetch().await;
                self.dialogs.success(CREATED);
                SubmitOutcome::Saved(record)
            }
            Err(ClientError::Validation(errors)) => SubmitOutcome::Invalid(errors),
            Err(e) => {
                self.report(&e);
                SubmitOutcome::Failed
            }
        }
    }
}

impl<R: ImportableResource> ListScreen<R> {
    /// Import a spreadsheet and show the per-row summary. The list is
    /// reloaded only when at least one row was stored.
    pub async fn import(&mut self, file: UploadFile) -> Option<ImportSummary> {
        match self.resource.import(file).await {
            Ok(summary) => {
                if summary.has_successes() {
                    self.list.fetch().await;
                }
                self.dialogs.open(ActiveDialog::ImportResult(summary.clone()));
                Some(summary)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }
}

// ========== Backend resources ==========

/// Staff accounts
pub struct StaffResource<H>(pub SchoolHealthApi<H>);

/// Parent accounts
pub struct ParentResource<H>(pub SchoolHealthApi<H>);

/// All user accounts
pub struct UserResource<H>(pub SchoolHealthApi<H>);

#[async_trait]
impl<H: HttpClient + 'static> ManagedResource for StaffResource<H> {
    type Record = Staff;

    async fn list(&self, query: &ListQuery) -> ClientResult<ListResponse<Staff>> {
        self.0.staff(query).await
    }

    async fn delete(&self, id: &str) -> ClientResult<Option<String>> {
        self.0.delete_staff(id).await
    }
}

#[async_trait]
impl<H: HttpClient + 'static> CreatableResource for StaffResource<H> {
    type Create = StaffCreate;

    fn create_dialog() -> ActiveDialog {
        ActiveDialog::AddStaff
    }

    async fn create(&self, payload: &StaffCreate) -> ClientResult<Staff> {
        self.0.create_staff(payload).await
    }
}

#[async_trait]
impl<H: HttpClient + 'static> ImportableResource for StaffResource<H> {
    async fn import(&self, file: UploadFile) -> ClientResult<ImportSummary> {
        self.0.import_staff(file).await
    }
}

#[async_trait]
impl<H: HttpClient + 'static> ManagedResource for ParentResource<H> {
    type Record = Parent;

    async fn list(&self, query: &ListQuery) -> ClientResult<ListResponse<Parent>> {
        self.0.parents(query).await
    }

    async fn delete(&self, id: &str) -> ClientResult<Option<String>> {
        self.0.delete_parent(id).await
    }
}

#[async_trait]
impl<H: HttpClient + 'static> CreatableResource for ParentResource<H> {
    type Create = ParentCreate;

    fn create_dialog() -> ActiveDialog {
        ActiveDialog::AddParent
    }

    async fn create(&self, payload: &ParentCreate) -> ClientResult<Parent> {
        self.0.create_parent(payload).await
    }
}

#[async_trait]
impl<H: HttpClient + 'static> ImportableResource for ParentResource<H> {
    async fn import(&self, file: UploadFile) -> ClientResult<ImportSummary> {
        self.0.import_parents(file).await
    }
}

#[async_trait]
impl<H: HttpClient + 'static> ManagedResource for UserResource<H> {
    type Record = UserAccount;

    async fn list(&self, query: &ListQuery) -> ClientResult<ListResponse<UserAccount>> {
        self.0.users(query).await
    }

    async fn delete(&self, id: &str) -> ClientResult<Option<String>> {
        self.0.delete_user(id).await
    }
}

/// Staff management screen, sorted by name on the server
pub fn staff_screen<H: HttpClient + 'static>(
    api: SchoolHealthApi<H>,
    config: &ClientConfig,
) -> ListScreen<StaffResource<H>> {
    let query = ListQuery::new(config.page_size).ordered_by("fullName");
    ListScreen::new(StaffResource(api), query, config)
}

/// Parent management screen; each page is also re-sorted locally by name
/// and relationship
pub fn parent_screen<H: HttpClient + 'static>(
    api: SchoolHealthApi<H>,
    config: &ClientConfig,
) -> ListScreen<ParentResource<H>> {
    let query = ListQuery::new(config.page_size).ordered_by("fullName");
    ListScreen::new(ParentResource(api), query, config).with_page_sort(sort_parents_page)
}

pub fn user_screen<H: HttpClient + 'static>(
    api: SchoolHealthApi<H>,
    config: &ClientConfig,
) -> ListScreen<UserResource<H>> {
    let query = crate::api::users_query(config.page_size, None, None);
    ListScreen::new(UserResource(api), query, config)
}
