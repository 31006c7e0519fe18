use chrono::Utc;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::error::{Result, SyncApiError};
use crate::models::{AuthUser, DisplayProject, HistoryEntry, UserData, UserDataParams};

/// REST path of the per-user account table.
const USER_DATA_TABLE: &str = "/rest/v1/user_data";

// ---------------------------------------------------------------------------
// Internal request handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
#[derive(Clone)]
struct BaseClient {
    base_url: String,
    http: Client,
}

impl BaseClient {
    fn new(base_url: &str, api_key: &str, access_token: Option<&str>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let key_val =
            reqwest::header::HeaderValue::from_str(api_key).map_err(|e| SyncApiError::Api {
                status: 0,
                message: format!("Invalid API key header value: {e}"),
            })?;
        headers.insert("apikey", key_val);

        // Requests run as the signed-in user when a token is present,
        // otherwise under the public key.
        let bearer = access_token.unwrap_or(api_key);
        let auth_val = reqwest::header::HeaderValue::from_str(&format!("Bearer {bearer}"))
            .map_err(|e| SyncApiError::Api {
                status: 0,
                message: format!("Invalid token header value: {e}"),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, auth_val);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the full URL for a given endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Send a request and handle status-code → error mapping.
    fn handle_response(&self, response: Response) -> Result<Option<serde_json::Value>> {
        let status = response.status().as_u16();

        if status == 204 {
            return Ok(None);
        }

        // Try to parse JSON body; fall back to empty object on failure.
        let data: serde_json::Value = response
            .json()
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));

        if (200..300).contains(&status) {
            return Ok(Some(data));
        }

        // PostgREST reports under "message", the identity endpoints under
        // "msg" or "error_description".
        let msg = ["message", "msg", "error_description"]
            .iter()
            .find_map(|k| data.get(k).and_then(|v| v.as_str()))
            .unwrap_or("")
            .to_string();

        match status {
            401 => Err(SyncApiError::Authentication {
                message: if msg.is_empty() {
                    "Unauthenticated".into()
                } else {
                    msg
                },
            }),
            403 => Err(SyncApiError::PermissionDenied {
                message: if msg.is_empty() {
                    "Permission denied".into()
                } else {
                    msg
                },
            }),
            404 => Err(SyncApiError::NotFound {
                message: if msg.is_empty() {
                    "Not found".into()
                } else {
                    msg
                },
            }),
            _ => Err(SyncApiError::Api {
                status,
                message: if msg.is_empty() {
                    format!("HTTP {status}")
                } else {
                    msg
                },
            }),
        }
    }

    // ---- convenience wrappers for common HTTP verbs -----------------------

    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Option<serde_json::Value>> {
        let resp = self.http.get(self.url(endpoint)).query(query).send()?;
        self.handle_response(resp)
    }

    /// POST with upsert semantics: conflicts on the key column merge into the
    /// existing row and the final representation is returned.
    fn upsert(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>> {
        let resp = self
            .http
            .post(self.url(endpoint))
            .query(query)
            .header(
                "Prefer",
                "resolution=merge-duplicates,return=representation",
            )
            .json(body)
            .send()?;
        self.handle_response(resp)
    }

    fn post_empty(&self, endpoint: &str) -> Result<Option<serde_json::Value>> {
        let resp = self.http.post(self.url(endpoint)).send()?;
        self.handle_response(resp)
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Entry point for the remote account store.
///
/// Constructed explicitly and passed where needed; there is no implicit
/// global. Every operation is a single request/response round trip and
/// surfaces failures as error values; callers decide whether a failure is
/// fatal to the current interaction.
///
/// ```no_run
/// use hackswipe::SyncClient;
///
/// let client = SyncClient::new("https://acme.example.co", "public-anon-key").unwrap();
/// let data = client.user_data().load_user_data("user-uuid").unwrap();
/// println!("{} liked projects", data.liked_projects.len());
/// ```
#[derive(Clone)]
pub struct SyncClient {
    base_url: String,
    api_key: String,
    base: BaseClient,
}

impl SyncClient {
    /// Create a new client.
    ///
    /// * `base_url` – backend root, e.g. `https://acme.example.co`
    /// * `api_key`  – the public (anonymous) API key
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base: BaseClient::new(base_url, api_key, None)?,
        })
    }

    /// Adopt a user access token obtained from the redirect sign-in flow.
    /// Subsequent requests run as that user.
    pub fn set_access_token(&mut self, token: &str) -> Result<()> {
        self.base = BaseClient::new(&self.base_url, &self.api_key, Some(token))?;
        Ok(())
    }

    // -- sub-client accessors ------------------------------------------------

    pub fn user_data(&self) -> UserDataClient<'_> {
        UserDataClient { base: &self.base }
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient { base: &self.base }
    }
}

// ===========================================================================
// Sub-clients
// ===========================================================================

// ---- User data ------------------------------------------------------------

pub struct UserDataClient<'a> {
    base: &'a BaseClient,
}

/// Field-scoped row shapes for the narrow load operations.
#[derive(Deserialize)]
struct LikedProjectsRow {
    #[serde(default)]
    liked_projects: Vec<DisplayProject>,
}

#[derive(Deserialize)]
struct HistoryRow {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

impl UserDataClient<'_> {
    /// Wholesale upsert of the user's record, keyed by identity. Last write
    /// wins; there is no merge.
    pub fn save_user_data(&self, user_id: &str, params: &UserDataParams) -> Result<UserData> {
        let body = serde_json::json!([{
            "user_id": user_id,
            "user_email": params.email,
            "liked_projects": params.liked,
            "history": params.history,
            "current_index": params.position,
            "passed_projects": params.passed,
            "updated_at": Utc::now(),
        }]);
        let data = self.upsert_rows(&body)?;
        let rows: Vec<UserData> = deserialize(data)?;
        rows.into_iter().next().ok_or_else(|| SyncApiError::Api {
            status: 0,
            message: "Empty upsert response".into(),
        })
    }

    /// Fetch the user's full record. A user with no record yet gets the
    /// defined empty default rather than an error.
    pub fn load_user_data(&self, user_id: &str) -> Result<UserData> {
        let query = [("user_id", format!("eq.{user_id}")), ("select", "*".into())];
        let data = self.base.get(USER_DATA_TABLE, &query)?;
        let rows: Vec<UserData> = deserialize(data)?;
        Ok(rows.into_iter().next().unwrap_or_else(|| UserData {
            user_id: user_id.to_string(),
            ..UserData::default()
        }))
    }

    /// Upsert only the liked-projects field.
    pub fn save_liked_projects(&self, user_id: &str, projects: &[DisplayProject]) -> Result<()> {
        let body = serde_json::json!([{
            "user_id": user_id,
            "liked_projects": projects,
            "updated_at": Utc::now(),
        }]);
        self.upsert_rows(&body)?;
        Ok(())
    }

    /// Fetch only the liked-projects field; missing record → empty list.
    pub fn load_liked_projects(&self, user_id: &str) -> Result<Vec<DisplayProject>> {
        let query = [
            ("user_id", format!("eq.{user_id}")),
            ("select", "liked_projects".into()),
        ];
        let data = self.base.get(USER_DATA_TABLE, &query)?;
        let rows: Vec<LikedProjectsRow> = deserialize(data)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|r| r.liked_projects)
            .unwrap_or_default())
    }

    /// Upsert only the view-history log.
    pub fn save_history(&self, user_id: &str, history: &[HistoryEntry]) -> Result<()> {
        let body = serde_json::json!([{
            "user_id": user_id,
            "history": history,
            "updated_at": Utc::now(),
        }]);
        self.upsert_rows(&body)?;
        Ok(())
    }

    /// Fetch only the view-history log; missing record → empty list.
    pub fn load_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>> {
        let query = [
            ("user_id", format!("eq.{user_id}")),
            ("select", "history".into()),
        ];
        let data = self.base.get(USER_DATA_TABLE, &query)?;
        let rows: Vec<HistoryRow> = deserialize(data)?;
        Ok(rows.into_iter().next().map(|r| r.history).unwrap_or_default())
    }

    fn upsert_rows(&self, body: &serde_json::Value) -> Result<Option<serde_json::Value>> {
        self.base.upsert(
            USER_DATA_TABLE,
            &[("on_conflict", "user_id".into())],
            body,
        )
    }
}

// ---- Auth -----------------------------------------------------------------

pub struct AuthClient<'a> {
    base: &'a BaseClient,
}

impl AuthClient<'_> {
    /// URL of the redirect-based third-party sign-in flow. The browser lands
    /// back on `redirect_to` carrying the access token.
    pub fn authorize_url(&self, provider: &str, redirect_to: &str) -> String {
        format!(
            "{}?provider={provider}&redirect_to={redirect_to}",
            self.base.url("/auth/v1/authorize")
        )
    }

    /// The current authenticated principal, or `None` when no valid session
    /// token is held.
    pub fn user(&self) -> Result<Option<AuthUser>> {
        match self.base.get("/auth/v1/user", &[]) {
            Ok(data) => {
                let user: AuthUser = deserialize(data)?;
                Ok(Some(user))
            }
            Err(SyncApiError::Authentication { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Revoke the current session token.
    pub fn sign_out(&self) -> Result<()> {
        self.base.post_empty("/auth/v1/logout")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------

fn deserialize<T: serde::de::DeserializeOwned>(data: Option<serde_json::Value>) -> Result<T> {
    serde_json::from_value(data.unwrap_or_default()).map_err(|e| SyncApiError::Api {
        status: 0,
        message: format!("Deserialization error: {e}"),
    })
}
