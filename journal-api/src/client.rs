use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{ApiError, Credentials, EntryDraft, EntryId, JournalEntry, NewUser, User};

/// Endpoints the login flow checks for status only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// `GET /journal`
    Journal,
    /// `GET /admin/all-users`
    AdminUsers,
}

/// The journal backend's HTTP contract.
///
/// Every method is a single round trip: no retry, no timeout beyond the
/// transport's own. Mutations return `()` because callers re-fetch the list
/// rather than trusting the echoed body.
#[async_trait]
pub trait JournalApi: Send + Sync {
    /// `GET /journal`. An empty journal comes back as [`ApiError::NotFound`].
    async fn list_entries(&self, credentials: &Credentials)
        -> Result<Vec<JournalEntry>, ApiError>;

    /// `GET /journal/id/{id}`
    async fn get_entry(
        &self,
        credentials: &Credentials,
        id: &EntryId,
    ) -> Result<JournalEntry, ApiError>;

    /// `POST /journal`
    async fn create_entry(
        &self,
        credentials: &Credentials,
        draft: &EntryDraft,
    ) -> Result<(), ApiError>;

    /// `PUT /journal/id/{id}`
    async fn update_entry(
        &self,
        credentials: &Credentials,
        id: &EntryId,
        draft: &EntryDraft,
    ) -> Result<(), ApiError>;

    /// `DELETE /journal/id/{id}`
    async fn delete_entry(&self, credentials: &Credentials, id: &EntryId)
        -> Result<(), ApiError>;

    /// `POST /public/create_user`, unauthenticated.
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError>;

    /// `GET /admin/all-users`
    async fn all_users(&self, credentials: &Credentials) -> Result<Vec<User>, ApiError>;

    /// Issue the probe's request and look only at the status. A success
    /// status is enough; the body is never parsed.
    async fn probe(&self, credentials: &Credentials, probe: Probe) -> Result<(), ApiError>;

    /// `POST /admin/create-admin-user`
    async fn create_admin(&self, credentials: &Credentials, user: &NewUser)
        -> Result<(), ApiError>;

    /// `GET /public/healthCheck`
    async fn health_check(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpJournalClient {
    client: Client,
    base_url: Url,
}

impl HttpJournalClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Join path segments onto the base URL. Segments are percent-encoded,
    /// so user-typed ids cannot escape their path slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.header(AUTHORIZATION, credentials.authorization_header())
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to call {}: {}", call_name, e)))?;

        let status = response.status();
        debug!(call = call_name, status = status.as_u16(), "journal api call");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response.json::<T>().await.map_err(|e| {
            ApiError::Parsing(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }
}

#[async_trait]
impl JournalApi for HttpJournalClient {
    async fn list_entries(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<JournalEntry>, ApiError> {
        self.get_json(
            self.authorized(self.client.get(self.endpoint(&["journal"])?), credentials),
            "GET /journal",
        )
        .await
    }

    async fn get_entry(
        &self,
        credentials: &Credentials,
        id: &EntryId,
    ) -> Result<JournalEntry, ApiError> {
        self.get_json(
            self.authorized(
                self.client
                    .get(self.endpoint(&["journal", "id", id.as_str()])?),
                credentials,
            ),
            "GET /journal/id/:id",
        )
        .await
    }

    async fn create_entry(
        &self,
        credentials: &Credentials,
        draft: &EntryDraft,
    ) -> Result<(), ApiError> {
        self.send_without_body(
            self.authorized(
                self.client.post(self.endpoint(&["journal"])?).json(draft),
                credentials,
            ),
            "POST /journal",
        )
        .await
    }

    async fn update_entry(
        &self,
        credentials: &Credentials,
        id: &EntryId,
        draft: &EntryDraft,
    ) -> Result<(), ApiError> {
        self.send_without_body(
            self.authorized(
                self.client
                    .put(self.endpoint(&["journal", "id", id.as_str()])?)
                    .json(draft),
                credentials,
            ),
            "PUT /journal/id/:id",
        )
        .await
    }

    async fn delete_entry(&self, credentials: &Credentials, id: &EntryId) -> Result<(), ApiError> {
        self.send_without_body(
            self.authorized(
                self.client
                    .delete(self.endpoint(&["journal", "id", id.as_str()])?),
                credentials,
            ),
            "DELETE /journal/id/:id",
        )
        .await
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.send_without_body(
            self.client
                .post(self.endpoint(&["public", "create_user"])?)
                .json(user),
            "POST /public/create_user",
        )
        .await
    }

    async fn all_users(&self, credentials: &Credentials) -> Result<Vec<User>, ApiError> {
        self.get_json(
            self.authorized(
                self.client.get(self.endpoint(&["admin", "all-users"])?),
                credentials,
            ),
            "GET /admin/all-users",
        )
        .await
    }

    async fn probe(&self, credentials: &Credentials, probe: Probe) -> Result<(), ApiError> {
        let (segments, call_name): (&[&str], &str) = match probe {
            Probe::Journal => (&["journal"], "GET /journal (probe)"),
            Probe::AdminUsers => (&["admin", "all-users"], "GET /admin/all-users (probe)"),
        };
        self.send_without_body(
            self.authorized(self.client.get(self.endpoint(segments)?), credentials),
            call_name,
        )
        .await
    }

    async fn create_admin(&self, credentials: &Credentials, user: &NewUser) -> Result<(), ApiError> {
        self.send_without_body(
            self.authorized(
                self.client
                    .post(self.endpoint(&["admin", "create-admin-user"])?)
                    .json(user),
                credentials,
            ),
            "POST /admin/create-admin-user",
        )
        .await
    }

    async fn health_check(&self) -> Result<String, ApiError> {
        let response = self
            .send(
                self.client.get(self.endpoint(&["public", "healthCheck"])?),
                "GET /public/healthCheck",
            )
            .await?;
        response
            .text()
            .await
            .map_err(|e| ApiError::Parsing(format!("Failed to read health check body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_onto_base_path() {
        let client = HttpJournalClient::new("http://localhost:8080/").unwrap();
        assert_eq!(
            client.endpoint(&["journal"]).unwrap().as_str(),
            "http://localhost:8080/journal"
        );

        let client = HttpJournalClient::new("http://example.com/api").unwrap();
        assert_eq!(
            client.endpoint(&["admin", "all-users"]).unwrap().as_str(),
            "http://example.com/api/admin/all-users"
        );
    }

    #[test]
    fn entry_ids_are_percent_encoded() {
        let client = HttpJournalClient::new("http://localhost:8080").unwrap();
        let url = client.endpoint(&["journal", "id", "../admin all"]).unwrap();

        assert_eq!(url.path(), "/journal/id/..%2Fadmin%20all");
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(
            HttpJournalClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpJournalClient::new("mailto:someone@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
