//! User accounts.

use shared::models::{ROLE_FILTER, STATUS_FILTER, UserAccount, UserRole, UserStatus};
use shared::{ListQuery, ListResponse};

use super::{SchoolHealthApi, USERS_PATH};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    /// One page of user accounts
    pub async fn users(&self, query: &ListQuery) -> ClientResult<ListResponse<UserAccount>> {
        self.list(USERS_PATH, query).await
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<Option<String>> {
        self.remove(USERS_PATH, id).await
    }
}

/// Default query of the user list: sorted by name, optionally narrowed to
/// a role and a status
pub fn users_query(page_size: u32, role: Option<UserRole>, status: Option<UserStatus>) -> ListQuery {
    let mut query = ListQuery::new(page_size).ordered_by("fullName");
    if let Some(role) = role {
        query.set_filter(ROLE_FILTER, role.as_str());
    }
    if let Some(status) = status {
        query.set_filter(STATUS_FILTER, status.as_str());
    }
    query
}
