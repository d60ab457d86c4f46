//! API connection: endpoint flavour, credential and transport.

use bridge_traits::HttpClient;
use core_runtime::config::{CoreConfig, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT};
use core_runtime::logging::redact_if_sensitive;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Microsoft Graph v1.0 root
pub const GRAPH_ROOT: &str = "https://graph.microsoft.com/v1.0";

const SHAREPOINT_PROFILE_PATH: &str = "_api/SP.UserProfiles.PeopleManager/GetMyProperties";

/// Whose drive a graph connection addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphTarget {
    /// The signed-in user
    Me,
    /// Another user, by id or principal name
    User(String),
    /// A SharePoint site's default drive.
    ///
    /// A site has no owning account, so account lookups (`email_url`,
    /// `user_url`) resolve to the signed-in user.
    Site(String),
}

/// Which API flavour a connection talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFlavor {
    /// SharePoint-backed business endpoint; `resource_url` is the tenant root
    /// (e.g. `https://contoso-my.sharepoint.com/`)
    Business { resource_url: String },
    /// Unified graph endpoint
    Graph(GraphTarget),
}

/// An authenticated session against one drive endpoint.
///
/// Immutable once built; share it as `Arc<Connection>` between resource
/// handles and iterators.
pub struct Connection {
    flavor: ApiFlavor,
    access_token: String,
    http_client: Arc<dyn HttpClient>,
    page_size: u32,
    request_timeout: Duration,
}

impl Connection {
    /// Create a connection with default page size and timeout
    pub fn new(
        flavor: ApiFlavor,
        access_token: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            flavor,
            access_token: access_token.into(),
            http_client,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Create a connection using the transport and settings of a validated config
    pub fn from_config(
        flavor: ApiFlavor,
        access_token: impl Into<String>,
        config: &CoreConfig,
    ) -> Self {
        Self {
            flavor,
            access_token: access_token.into(),
            http_client: Arc::clone(&config.http_client),
            page_size: config.page_size,
            request_timeout: config.request_timeout,
        }
    }

    /// Graph connection for the signed-in user
    pub fn graph(access_token: impl Into<String>, http_client: Arc<dyn HttpClient>) -> Self {
        Self::new(ApiFlavor::Graph(GraphTarget::Me), access_token, http_client)
    }

    /// Business connection for a SharePoint tenant
    pub fn business(
        resource_url: impl Into<String>,
        access_token: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self::new(
            ApiFlavor::Business {
                resource_url: resource_url.into(),
            },
            access_token,
            http_client,
        )
    }

    pub fn flavor(&self) -> &ApiFlavor {
        &self.flavor
    }

    pub fn is_business(&self) -> bool {
        matches!(self.flavor, ApiFlavor::Business { .. })
    }

    pub fn is_graph(&self) -> bool {
        matches!(self.flavor, ApiFlavor::Graph(_))
    }

    /// Root every drive path is appended to
    pub fn base_url(&self) -> String {
        match &self.flavor {
            ApiFlavor::Business { .. } => GRAPH_ROOT.to_string(),
            ApiFlavor::Graph(GraphTarget::Me) => format!("{}/me", GRAPH_ROOT),
            ApiFlavor::Graph(GraphTarget::User(user)) => {
                format!("{}/users/{}", GRAPH_ROOT, urlencoding::encode(user))
            }
            ApiFlavor::Graph(GraphTarget::Site(site)) => {
                format!("{}/sites/{}", GRAPH_ROOT, site)
            }
        }
    }

    /// Endpoint describing the account owner; the signed-in user for site drives
    pub fn email_url(&self) -> String {
        match &self.flavor {
            ApiFlavor::Business { resource_url } => {
                if resource_url.ends_with('/') {
                    format!("{}{}", resource_url, SHAREPOINT_PROFILE_PATH)
                } else {
                    format!("{}/{}", resource_url, SHAREPOINT_PROFILE_PATH)
                }
            }
            ApiFlavor::Graph(GraphTarget::User(user)) => {
                format!("{}/users/{}", GRAPH_ROOT, urlencoding::encode(user))
            }
            ApiFlavor::Graph(_) => format!("{}/me", GRAPH_ROOT),
        }
    }

    /// Graph user resource for this connection; `/me` unless it targets another user
    pub fn user_url(&self) -> String {
        match &self.flavor {
            ApiFlavor::Graph(GraphTarget::User(user)) => {
                format!("{}/users/{}", GRAPH_ROOT, urlencoding::encode(user))
            }
            _ => format!("{}/me", GRAPH_ROOT),
        }
    }

    /// Items requested per collection page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }

    pub(crate) fn http_client(&self) -> &dyn HttpClient {
        self.http_client.as_ref()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("flavor", &self.flavor)
            .field(
                "access_token",
                &redact_if_sensitive("access_token", &self.access_token),
            )
            .field("page_size", &self.page_size)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
