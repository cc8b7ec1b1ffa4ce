//! `/api/admin/guilds/{guild}/panels` handlers.

use super::{AdminUser, ApiJson, ApiState};
use crate::{
    audit::{AdminAction, AdminEvent},
    core::{
        panel::{self, NewPanel, PanelChanges, category_ids},
        panel_message::get_panel_messages,
        publish::{post_panel, prepare_panel},
        render::CategoryResolution,
        sync::{MessageUpdate, refresh_panel_messages, remove_panel_messages},
    },
    entities::{PanelType, panel as panel_entity, panel_message},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

/// A posted message as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelMessageView {
    pub id: i64,
    pub channel_id: String,
    pub message_id: String,
}

/// A panel as returned by the API, with its category IDs decoded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub id: i64,
    pub guild_id: String,
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub panel_type: PanelType,
    pub categories: Vec<i64>,
    pub created_at: chrono::NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<PanelMessageView>>,
}

impl PanelView {
    fn new(panel: &panel_entity::Model, messages: Option<&[panel_message::Model]>) -> Result<Self> {
        Ok(Self {
            id: panel.id,
            guild_id: panel.guild_id.clone(),
            name: panel.name.clone(),
            title: panel.title.clone(),
            description: panel.description.clone(),
            image: panel.image.clone(),
            thumbnail: panel.thumbnail.clone(),
            panel_type: panel.panel_type,
            categories: category_ids(panel)?,
            created_at: panel.created_at,
            messages: messages.map(|messages| {
                messages
                    .iter()
                    .map(|m| PanelMessageView {
                        id: m.id,
                        channel_id: m.channel_id.clone(),
                        message_id: m.message_id.clone(),
                    })
                    .collect()
            }),
        })
    }
}

/// Response of a panel update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePanelResponse {
    pub panel: PanelView,
    pub message_updates: Vec<MessageUpdate>,
    pub deleted_messages: u64,
}

#[derive(Debug, Deserialize)]
pub struct DeletePanelRequest {
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPanelRequest {
    pub panel_id: Option<i64>,
    pub channel_id: Option<String>,
}

/// Response of a successful send.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPanelResponse {
    pub success: bool,
    pub message_id: String,
    pub channel_id: String,
}

/// `GET` - every panel of the guild with its posted messages, newest first.
#[instrument(skip(state, _admin))]
pub async fn list_panels(
    State(state): State<ApiState>,
    _admin: AdminUser,
    Path(guild_id): Path<String>,
) -> Result<Json<Vec<PanelView>>> {
    panel::get_panels_with_messages(&state.database, &guild_id)
        .await?
        .iter()
        .map(|(panel, messages)| PanelView::new(panel, Some(messages)))
        .collect::<Result<Vec<_>>>()
        .map(Json)
}

/// `POST` - creates a panel.
#[instrument(skip(state, body))]
pub async fn create_panel(
    State(state): State<ApiState>,
    AdminUser(user_id): AdminUser,
    Path(guild_id): Path<String>,
    ApiJson(body): ApiJson<NewPanel>,
) -> Result<Json<PanelView>> {
    let panel = panel::create_panel(&state.database, &guild_id, body).await?;
    state.cache.invalidate(&guild_id).await;
    state
        .audit
        .record(AdminEvent::panel(AdminAction::Create, &panel, &user_id));
    Ok(Json(PanelView::new(&panel, None)?))
}

/// `PUT` - applies a partial update and re-renders every posted instance.
#[instrument(skip(state, body))]
pub async fn update_panel(
    State(state): State<ApiState>,
    AdminUser(user_id): AdminUser,
    Path(guild_id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<UpdatePanelResponse>> {
    let panel_id = body
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::validation("Panel ID is required"))?;
    let changes: PanelChanges = serde_json::from_value(body)
        .map_err(|e| Error::validation(format!("Invalid panel fields: {e}")))?;

    let updated = panel::update_panel(&state.database, &guild_id, panel_id, changes).await?;
    state.cache.invalidate(&guild_id).await;

    let prepared = prepare_panel(
        &state.database,
        state.platform.as_ref(),
        &state.locales,
        &updated,
        CategoryResolution::Lenient,
    )
    .await?;
    let records = get_panel_messages(&state.database, updated.id).await?;
    let report = refresh_panel_messages(
        &state.database,
        state.platform.as_ref(),
        &records,
        &prepared.rendered,
    )
    .await?;

    state
        .audit
        .record(AdminEvent::panel(AdminAction::Update, &updated, &user_id));

    let remaining = get_panel_messages(&state.database, updated.id).await?;
    Ok(Json(UpdatePanelResponse {
        panel: PanelView::new(&updated, Some(&remaining))?,
        message_updates: report.updates,
        deleted_messages: report.deleted_messages,
    }))
}

/// `DELETE` - deletes the panel and every posted instance of it.
#[instrument(skip(state, body))]
pub async fn delete_panel(
    State(state): State<ApiState>,
    AdminUser(user_id): AdminUser,
    Path(guild_id): Path<String>,
    ApiJson(body): ApiJson<DeletePanelRequest>,
) -> Result<Json<Value>> {
    let panel_id = body
        .id
        .ok_or_else(|| Error::validation("Panel ID is required"))?;
    let existing = panel::get_panel(&state.database, &guild_id, panel_id)
        .await?
        .ok_or(Error::PanelNotFound { id: panel_id })?;

    let records = get_panel_messages(&state.database, existing.id).await?;
    remove_panel_messages(state.platform.as_ref(), &records).await;

    let deleted = panel::delete_panel(&state.database, &guild_id, existing.id).await?;
    state.cache.invalidate(&guild_id).await;
    state
        .audit
        .record(AdminEvent::panel(AdminAction::Delete, &deleted, &user_id));

    Ok(Json(serde_json::json!({ "success": true })))
}

/// `POST .../send` - posts a panel to a channel.
#[instrument(skip(state, body))]
pub async fn send_panel(
    State(state): State<ApiState>,
    AdminUser(user_id): AdminUser,
    Path(guild_id): Path<String>,
    ApiJson(body): ApiJson<SendPanelRequest>,
) -> Result<Json<SendPanelResponse>> {
    let panel_id = body
        .panel_id
        .ok_or_else(|| Error::validation("Panel ID is required"))?;
    let channel_id = body
        .channel_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::validation("Channel ID is required"))?;

    let panel = panel::get_panel(&state.database, &guild_id, panel_id)
        .await?
        .ok_or(Error::PanelNotFound { id: panel_id })?;
    let channel = state
        .platform
        .fetch_channel(&channel_id)
        .await
        .ok_or(Error::ChannelNotFound { id: channel_id })?;

    let prepared = prepare_panel(
        &state.database,
        state.platform.as_ref(),
        &state.locales,
        &panel,
        CategoryResolution::Lenient,
    )
    .await?;
    if prepared.categories.is_empty() {
        return Err(Error::validation("Panel has no valid categories"));
    }

    let record = post_panel(
        &state.database,
        state.platform.as_ref(),
        &panel,
        &channel,
        &prepared.rendered,
    )
    .await?;

    state
        .audit
        .record(AdminEvent::panel(AdminAction::Send, &panel, &user_id));

    Ok(Json(SendPanelResponse {
        success: true,
        message_id: record.message_id,
        channel_id: record.channel_id,
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::api::{USER_ID_HEADER, create_router};
    use crate::cache::PanelCache;
    use crate::core::panel_message::record_panel_message;
    use crate::core::render::{ButtonStyle, PanelComponents};
    use crate::entities::{PanelMessage, category};
    use crate::test_utils::*;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApi {
        router: Router,
        db: DatabaseConnection,
        platform: Arc<MockPlatform>,
        audit: Arc<RecordingAuditSink>,
        billing: category::Model,
        tech: category::Model,
    }

    async fn setup_api() -> Result<TestApi> {
        init_test_tracing();
        let db = setup_test_db().await?;
        create_test_guild(&db, TEST_GUILD).await?;
        let billing = create_test_category(&db, TEST_GUILD, "Billing", "💰").await?;
        let tech = create_test_category(&db, TEST_GUILD, "Tech", "🔧").await?;
        let platform = Arc::new(MockPlatform::default());
        let audit = Arc::new(RecordingAuditSink::default());
        let router = create_router(ApiState {
            database: db.clone(),
            platform: platform.clone(),
            cache: Arc::new(PanelCache::default()),
            locales: Arc::new(test_locales()),
            audit: audit.clone(),
        });
        Ok(TestApi {
            router,
            db,
            platform,
            audit,
            billing,
            tech,
        })
    }

    fn panels_uri(guild_id: &str) -> String {
        format!("/api/admin/guilds/{guild_id}/panels")
    }

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, "42");
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_create_panel_validation_and_conflict() -> Result<()> {
        let api = setup_api().await?;
        let uri = panels_uri(TEST_GUILD);

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "categories": [1] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Panel name is required");

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "name": "general", "categories": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "At least one category is required");

        let request = json!({ "name": "general", "categories": [api.billing.id], "title": "Support" });
        let (status, body) = call(&api.router, Method::POST, &uri, Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "general");
        assert_eq!(body["type"], "BUTTON");
        assert_eq!(body["categories"], json!([api.billing.id]));

        let (status, body) = call(&api.router, Method::POST, &uri, Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "A panel with this name already exists");

        let events = api.audit.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, AdminAction::Create);
        assert_eq!(events[0].user_id, "42");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_admin_identity_is_rejected() -> Result<()> {
        let api = setup_api().await?;
        let response = api
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(panels_uri(TEST_GUILD))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_bad_requests() -> Result<()> {
        let api = setup_api().await?;
        let uri = panels_uri(TEST_GUILD);

        let (status, body) = call(
            &api.router,
            Method::POST,
            &uri,
            Some(json!({ "name": "x", "categories": [1], "type": "FOO" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("unknown variant"));

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "name": "x", "categories": "1" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = call(&api.router, Method::DELETE, &uri, Some(json!({ "id": "7" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        // Not JSON at all
        let response = api
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(&uri)
                    .header(USER_ID_HEADER, "42")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(panel::get_panel_summaries(&api.db, TEST_GUILD).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_panels_includes_messages() -> Result<()> {
        let api = setup_api().await?;
        let older = create_test_panel(&api.db, TEST_GUILD, "older", PanelType::Button, &[api.billing.id]).await?;
        let newer = create_test_panel(&api.db, TEST_GUILD, "newer", PanelType::Select, &[api.tech.id]).await?;
        record_panel_message(&api.db, older.id, "100", "200").await?;

        let (status, body) = call(&api.router, Method::GET, &panels_uri(TEST_GUILD), None).await;
        assert_eq!(status, StatusCode::OK);
        let panels = body.as_array().unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0]["id"], newer.id);
        assert_eq!(panels[0]["messages"], json!([]));
        assert_eq!(panels[1]["id"], older.id);
        assert_eq!(panels[1]["messages"][0]["channelId"], "100");
        assert_eq!(panels[1]["messages"][0]["messageId"], "200");

        let (_, body) = call(&api.router, Method::GET, &panels_uri(OTHER_GUILD), None).await;
        assert_eq!(body, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_rerenders_every_posted_message() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(
            &api.db,
            TEST_GUILD,
            "general",
            PanelType::Button,
            &[api.billing.id, api.tech.id],
        )
        .await?;
        for message_id in ["500", "501"] {
            let message = api.platform.add_message("100", message_id);
            record_panel_message(&api.db, panel.id, &message.channel_id, &message.id).await?;
        }

        let (status, body) = call(
            &api.router,
            Method::PUT,
            &panels_uri(TEST_GUILD),
            Some(json!({ "id": panel.id, "categories": [api.billing.id] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["panel"]["categories"], json!([api.billing.id]));
        assert_eq!(body["deletedMessages"], 0);
        assert_eq!(body["messageUpdates"].as_array().unwrap().len(), 2);
        assert_eq!(body["messageUpdates"][0]["status"], "updated");

        for message_id in ["500", "501"] {
            let rendered = api.platform.rendered(message_id).unwrap();
            let Some(PanelComponents::Buttons(buttons)) = rendered.components else {
                panic!("expected a single button");
            };
            assert_eq!(buttons.len(), 1);
            assert_eq!(buttons[0].style, ButtonStyle::Primary);
            assert_eq!(
                buttons[0].custom_id,
                format!("{{\"action\":\"create\",\"target\":{}}}", api.billing.id)
            );
        }
        assert_eq!(api.audit.events()[0].action, AdminAction::Update);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_prunes_messages_in_deleted_channels() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Select, &[api.billing.id, api.tech.id]).await?;
        let live = api.platform.add_message("100", "500");
        record_panel_message(&api.db, panel.id, &live.channel_id, &live.id).await?;
        let gone = api.platform.add_message("101", "501");
        record_panel_message(&api.db, panel.id, &gone.channel_id, &gone.id).await?;
        api.platform.remove_channel("101");

        let (status, body) = call(
            &api.router,
            Method::PUT,
            &panels_uri(TEST_GUILD),
            Some(json!({ "id": panel.id, "type": "MESSAGE" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deletedMessages"], 1);
        assert_eq!(body["panel"]["messages"].as_array().unwrap().len(), 1);
        // Switching to MESSAGE clears the controls of live messages
        assert_eq!(api.platform.rendered("500").unwrap().components, None);
        assert_eq!(PanelMessage::find().count(&api.db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_only_unknown_categories_clears_controls() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Button, &[api.billing.id]).await?;
        let message = api.platform.add_message("100", "500");
        record_panel_message(&api.db, panel.id, &message.channel_id, &message.id).await?;

        let (status, body) = call(
            &api.router,
            Method::PUT,
            &panels_uri(TEST_GUILD),
            Some(json!({ "id": panel.id, "categories": [4242] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["messageUpdates"][0]["status"], "updated");
        assert_eq!(api.platform.rendered("500").unwrap().components, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_errors() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Button, &[api.billing.id]).await?;
        create_test_panel(&api.db, TEST_GUILD, "taken", PanelType::Button, &[api.billing.id]).await?;
        let uri = panels_uri(TEST_GUILD);

        let (status, _) = call(&api.router, Method::PUT, &uri, Some(json!({ "name": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&api.router, Method::PUT, &uri, Some(json!({ "id": 9999 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Panel not found");

        let (status, _) = call(&api.router, Method::PUT, &panels_uri(OTHER_GUILD), Some(json!({ "id": panel.id }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&api.router, Method::PUT, &uri, Some(json!({ "id": panel.id, "name": "taken" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(api.audit.events().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_rows_even_when_live_deletes_fail() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Button, &[api.billing.id]).await?;
        for message_id in ["500", "501"] {
            let message = api.platform.add_message("100", message_id);
            api.platform.fail_writes_to(message_id);
            record_panel_message(&api.db, panel.id, &message.channel_id, &message.id).await?;
        }
        let uri = panels_uri(TEST_GUILD);

        let (status, _) = call(&api.router, Method::DELETE, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&api.router, Method::DELETE, &panels_uri(OTHER_GUILD), Some(json!({ "id": panel.id }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&api.router, Method::DELETE, &uri, Some(json!({ "id": panel.id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert!(panel::get_panel(&api.db, TEST_GUILD, panel.id).await?.is_none());
        assert_eq!(PanelMessage::find().count(&api.db).await?, 0);
        // The live messages could not be deleted but that did not block anything
        assert_eq!(api.platform.message_count(), 2);
        assert_eq!(api.audit.events()[0].action, AdminAction::Delete);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_live_messages() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Button, &[api.billing.id]).await?;
        let message = api.platform.add_message("100", "500");
        record_panel_message(&api.db, panel.id, &message.channel_id, &message.id).await?;

        let (status, _) = call(&api.router, Method::DELETE, &panels_uri(TEST_GUILD), Some(json!({ "id": panel.id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!api.platform.has_message("500"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_panel() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Button, &[api.billing.id, api.tech.id]).await?;
        api.platform.add_channel("100");
        let uri = format!("{}/send", panels_uri(TEST_GUILD));

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "panelId": panel.id, "channelId": "100" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["channelId"], "100");
        let message_id = body["messageId"].as_str().unwrap();
        let rendered = api.platform.rendered(message_id).unwrap();
        assert!(matches!(rendered.components, Some(PanelComponents::Buttons(ref b)) if b.len() == 2));

        let records = get_panel_messages(&api.db, panel.id).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message_id, message_id);
        assert_eq!(api.audit.events()[0].action, AdminAction::Send);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_panel_errors() -> Result<()> {
        let api = setup_api().await?;
        let panel = create_test_panel(&api.db, TEST_GUILD, "general", PanelType::Button, &[api.billing.id]).await?;
        let orphan = create_test_panel(&api.db, TEST_GUILD, "orphan", PanelType::Button, &[4242]).await?;
        api.platform.add_channel("100");
        let uri = format!("{}/send", panels_uri(TEST_GUILD));

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "channelId": "100" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Panel ID is required");

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "panelId": panel.id }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Channel ID is required");

        let (status, _) = call(&api.router, Method::POST, &uri, Some(json!({ "panelId": 9999, "channelId": "100" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "panelId": panel.id, "channelId": "404" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Channel not found");

        let (status, body) = call(&api.router, Method::POST, &uri, Some(json!({ "panelId": orphan.id, "channelId": "100" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Panel has no valid categories");

        assert_eq!(api.platform.message_count(), 0);
        assert!(api.audit.events().is_empty());
        Ok(())
    }
}
