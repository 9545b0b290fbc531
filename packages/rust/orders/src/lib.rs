//! Typed operations over the SliceVote backend resources.
//!
//! One method per backend endpoint, built on the generic verbs of
//! [`slicevote_api::ApiClient`]. Team-scoped reads (vote mode, freeze) are
//! addressed by team name and need no authentication; order settings are
//! admin-only and carry the per-call bearer token. Write acknowledgement
//! bodies are discarded — the backend answers most writes with 204.

use serde_json::Value;

use slicevote_api::{ApiClient, Body, Payload, ResourceRef};
use slicevote_shared::{
    FreezeState, Ingredient, OrderKind, OrderSize, OrderType, Pork, Result, Team, Template,
    Vegetarian, VoteMode, VoteModeKind,
};

// Backend resource paths, relative to the API base.
const TEAMS: &str = "teams";
const INGREDIENTS: &str = "ingredients";
const TEMPLATES: &str = "templates";
const ORDER_SIZE: &str = "order/size";
const ORDER_TYPE: &str = "order/type";
const ORDER_VEGETARIAN: &str = "order/vegetarian";
const ORDER_PORK: &str = "order/pork";
const ORDER_VOTE_MODE: &str = "order/voteMode";
const ORDER_FREEZE: &str = "order/freeze";

/// High-level client for the ordering/voting backend.
#[derive(Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

impl OrdersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying generic client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // -- teams --------------------------------------------------------------

    /// All registered teams.
    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        self.client.get(&ResourceRef::path(TEAMS), None, None).await
    }

    /// Register a new team. Returns the created resource when the backend
    /// echoes it back.
    pub async fn create_team(&self, name: &str) -> Result<Option<Team>> {
        let body = Body::json(&serde_json::json!({ "name": name }))?;
        let payload: Payload<Team> = self
            .client
            .post(&ResourceRef::path(TEAMS), body, None)
            .await?;
        Ok(payload.into_json())
    }

    /// Delete a team via its self link.
    pub async fn delete_team(&self, team: &Team, token: &str) -> Result<()> {
        let _: Payload<Value> = self
            .client
            .delete(&ResourceRef::resource(team), Some(token))
            .await?;
        Ok(())
    }

    // -- catalog ------------------------------------------------------------

    /// All selectable pizza ingredients.
    pub async fn get_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.client
            .get(&ResourceRef::path(INGREDIENTS), None, None)
            .await
    }

    /// All predefined pizza templates.
    pub async fn get_templates(&self) -> Result<Vec<Template>> {
        self.client
            .get(&ResourceRef::path(TEMPLATES), None, None)
            .await
    }

    // -- team-scoped vote state ---------------------------------------------

    /// Current vote mode of a team.
    pub async fn get_vote_mode(&self, team: &str) -> Result<VoteMode> {
        self.client
            .get(&ResourceRef::path(format!("{TEAMS}/{team}/voteMode")), None, None)
            .await
    }

    /// Whether a team's order is frozen.
    pub async fn get_freeze(&self, team: &str) -> Result<FreezeState> {
        self.client
            .get(&ResourceRef::path(format!("{TEAMS}/{team}/freeze")), None, None)
            .await
    }

    // -- admin order settings (bearer token identifies the team) ------------

    /// Switch the vote mode of the token's team.
    pub async fn patch_vote_mode(&self, token: &str, mode: VoteModeKind) -> Result<()> {
        self.patch_setting(ORDER_VOTE_MODE, &VoteMode { vote_mode: mode }, token)
            .await
    }

    /// Freeze or unfreeze the token's team order.
    pub async fn patch_freeze(&self, token: &str, freeze: bool) -> Result<()> {
        self.patch_setting(ORDER_FREEZE, &FreezeState { freeze }, token)
            .await
    }

    /// Current order size.
    pub async fn get_size(&self, token: &str) -> Result<OrderSize> {
        self.client
            .get(&ResourceRef::path(ORDER_SIZE), None, Some(token))
            .await
    }

    /// Set the order size.
    pub async fn patch_size(&self, token: &str, size: u32) -> Result<()> {
        self.patch_setting(ORDER_SIZE, &OrderSize { size }, token).await
    }

    /// Current order size unit (persons or pizza pieces).
    pub async fn get_order_type(&self, token: &str) -> Result<OrderType> {
        self.client
            .get(&ResourceRef::path(ORDER_TYPE), None, Some(token))
            .await
    }

    /// Set the order size unit.
    pub async fn patch_order_type(&self, token: &str, kind: OrderKind) -> Result<()> {
        self.patch_setting(ORDER_TYPE, &OrderType { kind }, token).await
    }

    /// Current number of vegetarian portions.
    pub async fn get_vegetarian(&self, token: &str) -> Result<Vegetarian> {
        self.client
            .get(&ResourceRef::path(ORDER_VEGETARIAN), None, Some(token))
            .await
    }

    /// Set the number of vegetarian portions.
    pub async fn patch_vegetarian(&self, token: &str, vegetarian: u32) -> Result<()> {
        self.patch_setting(ORDER_VEGETARIAN, &Vegetarian { vegetarian }, token)
            .await
    }

    /// Current number of pork-free portions.
    pub async fn get_pork(&self, token: &str) -> Result<Pork> {
        self.client
            .get(&ResourceRef::path(ORDER_PORK), None, Some(token))
            .await
    }

    /// Set the number of pork-free portions.
    pub async fn patch_pork(&self, token: &str, no_pork: u32) -> Result<()> {
        self.patch_setting(ORDER_PORK, &Pork { no_pork }, token).await
    }

    /// PATCH a single setting resource, discarding the acknowledgement body.
    async fn patch_setting<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<()> {
        let _: Payload<Value> = self
            .client
            .patch(&ResourceRef::path(path), Body::json(body)?, None, Some(token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use slicevote_api::RecordingNotifier;
    use slicevote_shared::ApiConfig;

    async fn api(server: &wiremock::MockServer) -> (OrdersApi, Arc<RecordingNotifier>) {
        let recorder = Arc::new(RecordingNotifier::new());
        let config = ApiConfig::new(&server.uri()).unwrap();
        let client = ApiClient::with_notifier(config, recorder.clone()).unwrap();
        (OrdersApi::new(client), recorder)
    }

    #[tokio::test]
    async fn list_teams_parses_resources() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/teams/"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([
                {"name": "backend", "_links": "teams/backend"},
                {"name": "frontend", "_links": "teams/frontend"}
            ])))
            .mount(&server)
            .await;

        let (api, _) = api(&server).await;
        let teams = api.list_teams().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].name, "frontend");
    }

    #[tokio::test]
    async fn delete_team_follows_self_link() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("DELETE"))
            .and(wiremock::matchers::path("/teams/backend/"))
            .and(wiremock::matchers::header("authorization", "Bearer tok"))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (api, recorder) = api(&server).await;
        let team = Team {
            name: "backend".into(),
            links: Some("teams/backend".into()),
        };
        api.delete_team(&team, "tok").await.unwrap();

        // Exactly the one deletion success notice.
        assert_eq!(recorder.notes().len(), 1);
    }

    #[tokio::test]
    async fn get_vote_mode_addresses_team_by_name() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/teams/backend/voteMode/"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(json!({"voteMode": "std"})),
            )
            .mount(&server)
            .await;

        let (api, _) = api(&server).await;
        let mode = api.get_vote_mode("backend").await.unwrap();
        assert_eq!(mode.vote_mode, VoteModeKind::Std);
    }

    #[tokio::test]
    async fn patch_size_sends_token_and_json_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("PATCH"))
            .and(wiremock::matchers::path("/order/size/"))
            .and(wiremock::matchers::header("authorization", "Bearer tok"))
            .and(wiremock::matchers::body_json(json!({"size": 12})))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (api, recorder) = api(&server).await;
        api.patch_size("tok", 12).await.unwrap();
        assert!(recorder.notes().is_empty());
    }

    #[tokio::test]
    async fn patch_pork_uses_no_pork_wire_field() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("PATCH"))
            .and(wiremock::matchers::path("/order/pork/"))
            .and(wiremock::matchers::body_json(json!({"noPork": 3})))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (api, _) = api(&server).await;
        api.patch_pork("tok", 3).await.unwrap();
    }

    #[tokio::test]
    async fn frozen_team_patch_surfaces_backend_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("PATCH"))
            .and(wiremock::matchers::path("/order/freeze/"))
            .respond_with(wiremock::ResponseTemplate::new(403).set_body_json(
                json!({"message": "order is frozen", "path": "/order/freeze"}),
            ))
            .mount(&server)
            .await;

        let (api, recorder) = api(&server).await;
        let err = api.patch_freeze("tok", false).await.unwrap_err();
        assert!(matches!(
            err,
            slicevote_shared::SliceVoteError::Backend { .. }
        ));
        assert_eq!(recorder.notes().len(), 1);
        assert!(recorder.notes()[0].message.contains("order is frozen"));
    }
}
