//! Friend location sharing
//!
//! When location sharing is on, every position update is published to the
//! friend server in the background. Each response replaces the friends list
//! through the command channel; the latest response to arrive wins.

use crate::core::command::MinimapCommand;
use crate::core::geo::Vector2;
use crate::runtime::AsyncSpawner;
use crate::{MinimapError, Result};
use async_trait::async_trait;
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Another player sharing their location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendData {
    pub name: String,
    pub position: Vector2,
}

impl FriendData {
    pub fn new(name: impl Into<String>, position: Vector2) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[derive(Debug, Serialize)]
struct LocationReport<'a> {
    name: &'a str,
    position: Vector2,
}

#[async_trait]
pub trait FriendLocationService: Send + Sync {
    /// Publishes our position. Resolves to the friends currently visible to
    /// us, or `None` when the server has nothing to report.
    async fn update_friend_location(
        &self,
        server_url: &str,
        player_name: &str,
        position: Vector2,
    ) -> Result<Option<Vec<FriendData>>>;
}

/// Friend server client over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpFriendLocationService {
    client: reqwest::Client,
}

impl HttpFriendLocationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FriendLocationService for HttpFriendLocationService {
    async fn update_friend_location(
        &self,
        server_url: &str,
        player_name: &str,
        position: Vector2,
    ) -> Result<Option<Vec<FriendData>>> {
        let response = self
            .client
            .post(server_url)
            .json(&LocationReport {
                name: player_name,
                position,
            })
            .send()
            .await
            .map_err(MinimapError::from)?
            .error_for_status()
            .map_err(MinimapError::from)?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let friends = response
            .json::<Option<Vec<FriendData>>>()
            .await
            .map_err(MinimapError::from)?;
        Ok(friends)
    }
}

/// Fire-and-forget publisher feeding responses back as commands.
#[derive(Clone)]
pub struct FriendSync {
    service: Arc<dyn FriendLocationService>,
    spawner: Arc<dyn AsyncSpawner>,
    commands: Sender<MinimapCommand>,
}

impl FriendSync {
    pub fn new(
        service: Arc<dyn FriendLocationService>,
        spawner: Arc<dyn AsyncSpawner>,
        commands: Sender<MinimapCommand>,
    ) -> Self {
        Self {
            service,
            spawner,
            commands,
        }
    }

    /// Starts a publish and returns immediately. Failures are logged and
    /// dropped.
    pub fn publish(&self, server_url: &str, player_name: &str, position: Vector2) {
        let service = self.service.clone();
        let commands = self.commands.clone();
        let server_url = server_url.to_string();
        let player_name = player_name.to_string();

        let task = async move {
            match service
                .update_friend_location(&server_url, &player_name, position)
                .await
            {
                Ok(friends) => {
                    if commands.send(MinimapCommand::SetFriends(friends)).is_err() {
                        log::debug!("friend response arrived after the minimap was dropped");
                    }
                }
                Err(e) => log::warn!("friend location update to {} failed: {}", server_url, e),
            }
        };

        // Detached; the handle is not needed.
        let _ = self.spawner.spawn_boxed(Box::pin(task));
    }
}

impl std::fmt::Debug for FriendSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FriendSync").finish_non_exhaustive()
    }
}
