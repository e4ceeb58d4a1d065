use super::*;
use crate::error::bridge::BridgeError;

#[tokio::test]
async fn create_succeeds_without_retry() {
    let h = harness(MockDiscordApi::new()).await;
    link(&h, Permissions::all(), true).await;

    let remote_id = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await
        .unwrap();

    assert!(!remote_id.is_empty());
    assert_eq!(h.api.created_event_count(), 1);
    assert_eq!(h.scheduler.queue_status().count, 0);
}

/// The caller's future resolves only once the queued retry succeeds; the
/// intermediate rate-limited attempt is invisible to it.
#[tokio::test]
async fn create_retries_after_rate_limit() {
    let api = MockDiscordApi::new();
    api.fail_next_create_event(rate_limited(1.0));
    let h = harness(api).await;
    link(&h, Permissions::all(), true).await;

    let remote_id = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await
        .unwrap();

    assert!(!remote_id.is_empty());
    assert_eq!(h.api.created_event_count(), 1);
    assert_eq!(h.scheduler.queue_status().count, 0);
}

#[tokio::test]
async fn update_retries_after_rate_limit() {
    let api = MockDiscordApi::new();
    let h = harness(api).await;
    link(&h, Permissions::all(), true).await;

    // Seed a remote event so the mock can answer the update.
    let remote_id = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await
        .unwrap();

    h.api.fail_next_update_event(rate_limited(0.5));

    h.bridge
        .update_event_with_retry(&remote_id, &test_event(1), GUILD_ID)
        .await
        .unwrap();

    assert_eq!(h.api.updated_events.lock().unwrap().len(), 1);
    assert_eq!(h.scheduler.queue_status().count, 0);
}

/// A permission shortfall is returned to the caller directly; nothing ever
/// reaches the retry queue or the API.
#[tokio::test]
async fn missing_permissions_are_not_retried() {
    let h = harness(MockDiscordApi::new()).await;
    link(&h, Permissions::SEND_MESSAGES, true).await;

    let result = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await;

    assert!(matches!(
        result,
        Err(BridgeError::MissingPermissions { .. })
    ));
    assert_eq!(h.api.created_event_count(), 0);
    assert_eq!(h.scheduler.queue_status().count, 0);
}

#[tokio::test]
async fn unlinked_guild_is_rejected() {
    let h = harness(MockDiscordApi::new()).await;

    let result = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await;

    assert!(matches!(
        result,
        Err(BridgeError::GuildNotLinked { guild_id }) if guild_id == GUILD_ID
    ));
}

/// Sustained rate limiting exhausts the budget (one inline attempt plus
/// three queued attempts) and surfaces as a terminal failure.
#[tokio::test]
async fn retries_exhaust_after_budget() {
    let api = MockDiscordApi::new();
    for _ in 0..4 {
        api.fail_next_create_event(rate_limited(0.2));
    }
    let h = harness(api).await;
    link(&h, Permissions::all(), true).await;

    let result = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await;

    assert!(matches!(result, Err(BridgeError::RetriesExhausted { .. })));
    assert_eq!(h.api.created_event_count(), 0);
    assert_eq!(h.scheduler.queue_status().count, 0);
}

/// A non-retryable failure mid-retry resolves the caller's future with that
/// failure instead of retrying further.
#[tokio::test]
async fn non_retryable_failure_mid_retry_resolves_future() {
    let api = MockDiscordApi::new();
    api.fail_next_create_event(rate_limited(0.5));
    api.fail_next_create_event(server_error());
    let h = harness(api).await;
    link(&h, Permissions::all(), true).await;

    let result = h
        .bridge
        .create_event_with_retry(&test_event(1), GUILD_ID)
        .await;

    assert!(matches!(
        result,
        Err(BridgeError::Api(ApiError::Response { status: 500, .. }))
    ));
    assert_eq!(h.api.created_event_count(), 0);
    assert_eq!(h.scheduler.queue_status().count, 0);
}

/// Deletion has no retry-wrapped form: a rate-limited delete surfaces
/// directly to the caller.
#[tokio::test]
async fn delete_surfaces_rate_limit_directly() {
    let api = MockDiscordApi::new();
    api.fail_next_delete_event(rate_limited(2.0));
    let h = harness(api).await;
    link(&h, Permissions::all(), true).await;

    let result = h.bridge.delete_event("9001", GUILD_ID).await;

    assert!(matches!(
        result,
        Err(BridgeError::Api(ApiError::RateLimited(_)))
    ));
    assert_eq!(h.scheduler.queue_status().count, 0);
}
