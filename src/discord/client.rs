//! Reqwest-backed Discord REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serenity::builder::{CreateCommand, CreateMessage, CreateScheduledEvent, EditScheduledEvent};

use crate::discord::api::{ApiError, DiscordApi, RateLimitInfo};
use crate::model::discord::{GuildInfo, GuildMember, ScheduledEvent};

const API_BASE: &str = "https://discord.com/api/v10";

/// Fixed per-call transport timeout. Orthogonal to retry backoff, which the
/// scheduler owns.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Discord REST client authenticated with the bot token.
pub struct RestClient {
    http: Client,
    token: String,
    application_id: u64,
}

impl RestClient {
    /// Creates a client with the fixed per-call timeout applied.
    pub fn new(token: String, application_id: u64) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            token,
            application_id,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", API_BASE, path))
            .header("Authorization", format!("Bot {}", self.token))
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        check_response(endpoint, response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(endpoint, request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DiscordApi for RestClient {
    async fn get_guild(&self, guild_id: u64) -> Result<GuildInfo, ApiError> {
        let path = format!("/guilds/{}", guild_id);
        self.send_json("get_guild", self.request(Method::GET, &path))
            .await
    }

    async fn get_guild_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<GuildMember, ApiError> {
        let path = format!("/guilds/{}/members/{}", guild_id, user_id);
        self.send_json("get_guild_member", self.request(Method::GET, &path))
            .await
    }

    async fn create_scheduled_event(
        &self,
        guild_id: u64,
        event: &CreateScheduledEvent,
    ) -> Result<ScheduledEvent, ApiError> {
        let path = format!("/guilds/{}/scheduled-events", guild_id);
        self.send_json(
            "create_scheduled_event",
            self.request(Method::POST, &path).json(event),
        )
        .await
    }

    async fn update_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
        event: &EditScheduledEvent,
    ) -> Result<ScheduledEvent, ApiError> {
        let path = format!("/guilds/{}/scheduled-events/{}", guild_id, event_id);
        self.send_json(
            "update_scheduled_event",
            self.request(Method::PATCH, &path).json(event),
        )
        .await
    }

    async fn delete_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/guilds/{}/scheduled-events/{}", guild_id, event_id);
        self.send("delete_scheduled_event", self.request(Method::DELETE, &path))
            .await?;
        Ok(())
    }

    async fn get_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
    ) -> Result<ScheduledEvent, ApiError> {
        let path = format!("/guilds/{}/scheduled-events/{}", guild_id, event_id);
        self.send_json("get_scheduled_event", self.request(Method::GET, &path))
            .await
    }

    async fn send_channel_message(
        &self,
        channel_id: u64,
        message: &CreateMessage,
    ) -> Result<(), ApiError> {
        let path = format!("/channels/{}/messages", channel_id);
        self.send(
            "send_channel_message",
            self.request(Method::POST, &path).json(message),
        )
        .await?;
        Ok(())
    }

    async fn create_global_command(&self, command: &CreateCommand) -> Result<(), ApiError> {
        let path = format!("/applications/{}/commands", self.application_id);
        self.send(
            "create_global_command",
            self.request(Method::POST, &path).json(command),
        )
        .await?;
        Ok(())
    }
}

/// Wire shape of a 429 body.
#[derive(Debug, Default, Deserialize)]
struct RateLimitBody {
    #[serde(default)]
    retry_after: f64,
    #[serde(default)]
    global: bool,
}

/// Wire shape of a Discord JSON error body.
#[derive(Debug, Default, Deserialize)]
struct DiscordErrorBody {
    #[serde(default)]
    code: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

async fn check_response(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
    };
    let bucket = header("X-RateLimit-Bucket");
    let scope = header("X-RateLimit-Scope");
    let body = response.text().await.unwrap_or_default();

    Err(classify_failure(endpoint, status, bucket, scope, &body))
}

/// Maps a non-success response onto the error taxonomy.
///
/// A 429 yields [`ApiError::RateLimited`] with the retry-after value and
/// global flag read from the body; everything else is terminal.
fn classify_failure(
    endpoint: &str,
    status: StatusCode,
    bucket: Option<String>,
    scope: Option<String>,
    body: &str,
) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let parsed: RateLimitBody = serde_json::from_str(body).unwrap_or_default();
        return ApiError::RateLimited(RateLimitInfo {
            retry_after_secs: parsed.retry_after,
            global: parsed.global,
            bucket,
            scope,
        });
    }

    let parsed: DiscordErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::FORBIDDEN => ApiError::PermissionDenied {
            endpoint: endpoint.to_string(),
            message,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound {
            endpoint: endpoint.to_string(),
            message,
        },
        _ => ApiError::Response {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            code: parsed.code,
            message,
        },
    }
}
