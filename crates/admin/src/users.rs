//! User management: server-paginated listing with first-name search and
//! deletion.

use tracing::instrument;

use dessert_lab_core::{User, UserId};

use crate::api::types::UsersPage;
use crate::api::AdminClient;
use crate::error::Result;

/// The user panel state: current page, search term, and the rows last
/// fetched for them.
#[derive(Debug)]
pub struct UserPanel {
    page: u32,
    limit: u32,
    search: String,
    users: Vec<User>,
    total_pages: u32,
}

impl UserPanel {
    /// Create an empty panel with the given page limit.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            users: Vec::new(),
            total_pages: 1,
        }
    }

    /// Rows last fetched.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total pages reported by the last fetch.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Re-fetch the current page; the response is authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails; the
    /// previous rows are kept.
    #[instrument(skip_all, fields(page = self.page, search = %self.search))]
    pub async fn refresh(&mut self, client: &AdminClient) -> Result<()> {
        let page: UsersPage = client.list_users(self.page, self.limit, &self.search).await?;
        self.users = page.users;
        self.total_pages = page.total.max(1);
        Ok(())
    }

    /// Apply a new search term: back to page 1, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails.
    pub async fn search(&mut self, client: &AdminClient, term: &str) -> Result<()> {
        self.search = term.to_string();
        self.page = 1;
        self.refresh(client).await
    }

    /// Advance one page (clamped) and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails.
    pub async fn next_page(&mut self, client: &AdminClient) -> Result<()> {
        if self.page < self.total_pages {
            self.page += 1;
            return self.refresh(client).await;
        }
        Ok(())
    }

    /// Go back one page (clamped) and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails.
    pub async fn prev_page(&mut self, client: &AdminClient) -> Result<()> {
        if self.page > 1 {
            self.page -= 1;
            return self.refresh(client).await;
        }
        Ok(())
    }

    /// Delete a user, then re-fetch the current page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when a call fails.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&mut self, client: &AdminClient, id: &UserId) -> Result<()> {
        client.delete_user(id).await?;
        self.refresh(client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_defaults() {
        let panel = UserPanel::new(3);
        assert_eq!(panel.page(), 1);
        assert_eq!(panel.total_pages(), 1);
        assert!(panel.users().is_empty());
    }

    #[test]
    fn test_zero_limit_clamped() {
        let panel = UserPanel::new(0);
        assert_eq!(panel.limit, 1);
    }

    #[tokio::test]
    async fn test_failed_search_resets_page_but_keeps_rows() {
        let client = AdminClient::new(
            url::Url::parse("http://127.0.0.1:1").expect("valid url"),
        );
        let mut panel = UserPanel::new(3);
        let result = panel.search(&client, "jane").await;
        assert!(result.is_err());
        assert_eq!(panel.page(), 1);
        assert!(panel.users().is_empty());
    }
}
