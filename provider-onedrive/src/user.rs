//! The account behind a connection.

use std::sync::Arc;

use crate::connection::Connection;
use crate::error::Result;
use crate::metadata::{Hydrate, HydrateContext, UserMetadata};
use crate::request::ApiRequest;

#[derive(Debug, Clone)]
pub struct User {
    connection: Arc<Connection>,
}

impl User {
    /// The user the connection acts for
    pub fn me(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    pub async fn user(&self) -> Result<UserMetadata> {
        let json = ApiRequest::get(&self.connection, self.connection.user_url())
            .send_json()
            .await?;
        UserMetadata::hydrate(&json, &HydrateContext::root(self.connection.clone()))
    }
}
