//! REST client for the game server. Every call goes through the browser
//! Fetch API with the session cookie attached; bodies are JSON both ways.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::error::ClientError;
use crate::model::{
    AutoGenerateResponse, BattleResponse, BuildResponse, BuyUpgradeResponse, CasesResponse,
    CaseOpenResponse, ClickResponse, CombatOverview, CraftResponse, Economy, EconomyResponse,
    GameStateResponse, Inventory, InventoryResponse, LeaderEntry, MarketResponse, PlayerEquipment,
    QuestResponse, RitualResponse, SellResponse, StoryData, TempleResponse, TempleSnapshot,
};

/// Largest single trade the market accepts.
pub const MAX_TRADE_AMOUNT: f64 = 1_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiClient {
    base: String,
}

fn js_err(value: JsValue) -> ClientError {
    ClientError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Turns a raw HTTP status and body into a typed payload or an error.
/// Non-2xx bodies contribute their `error` text; 2xx bodies with
/// `"success": false` are rejections.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    let ok = (200..300).contains(&status);
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) if !ok => {
            return Err(ClientError::Http {
                status,
                message: String::new(),
            });
        }
        Err(e) => return Err(ClientError::Decode(e)),
    };
    let error_text = || {
        value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    if !ok {
        return Err(ClientError::Http {
            status,
            message: error_text(),
        });
    }
    if value.get("success") == Some(&Value::Bool(false)) {
        return Err(ClientError::Rejected(error_text()));
    }
    Ok(serde_json::from_value(value)?)
}

impl ApiClient {
    /// Empty base means same origin as the page.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<(u16, String), ClientError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_credentials(RequestCredentials::SameOrigin);
        if let Some(body) = body {
            let headers = Headers::new().map_err(js_err)?;
            headers.set("Content-Type", "application/json").map_err(js_err)?;
            opts.set_headers(&headers);
            opts.set_body(&JsValue::from_str(&body));
        }
        let request = Request::new_with_str_and_init(&self.url(path), &opts).map_err(js_err)?;
        let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        Ok((response.status(), text.as_string().unwrap_or_default()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let (status, body) = self.send("GET", path, None).await?;
        decode_response(status, &body)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T, ClientError> {
        let body = serde_json::to_string(payload)?;
        let (status, text) = self.send("POST", path, Some(body)).await?;
        decode_response(status, &text)
    }

    pub async fn game_state(&self) -> Result<GameStateResponse, ClientError> {
        self.get("/api/game-state").await
    }

    pub async fn click(&self) -> Result<ClickResponse, ClientError> {
        self.post("/api/click", &json!({})).await
    }

    pub async fn auto_generate(&self) -> Result<AutoGenerateResponse, ClientError> {
        self.post("/api/auto-generate", &json!({})).await
    }

    pub async fn buy_upgrade(&self, upgrade_type: &str) -> Result<BuyUpgradeResponse, ClientError> {
        self.post("/api/buy-upgrade", &json!({ "upgrade_type": upgrade_type })).await
    }

    pub async fn craft_equipment(&self, equipment_id: &str) -> Result<CraftResponse, ClientError> {
        self.post("/api/craft-equipment", &json!({ "equipment_id": equipment_id })).await
    }

    pub async fn build_building(&self, building_type: &str) -> Result<BuildResponse, ClientError> {
        self.post("/api/build-building", &json!({ "building_type": building_type })).await
    }

    pub async fn complete_quest(&self, quest_id: &str) -> Result<QuestResponse, ClientError> {
        self.post("/api/complete-quest", &json!({ "quest_id": quest_id })).await
    }

    pub async fn market_rates(&self) -> Result<Economy, ClientError> {
        let res: EconomyResponse = self.get("/api/currency-market").await?;
        Ok(res.economy)
    }

    pub async fn market_trade(
        &self,
        currency: &str,
        action: TradeAction,
        amount: f64,
    ) -> Result<MarketResponse, ClientError> {
        let payload = json!({ "currency": currency, "action": action.as_str(), "amount": amount });
        self.post("/api/currency-market", &payload).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderEntry>, ClientError> {
        self.get("/api/leaderboard").await
    }

    pub async fn story_data(&self) -> Result<StoryData, ClientError> {
        self.get("/api/story-data").await
    }

    pub async fn cases(&self) -> Result<CasesResponse, ClientError> {
        self.get("/api/cases").await
    }

    pub async fn open_case(&self, case_id: &str) -> Result<CaseOpenResponse, ClientError> {
        self.post("/api/cases/open", &json!({ "case_id": case_id })).await
    }

    pub async fn combat_overview(&self) -> Result<CombatOverview, ClientError> {
        self.get("/api/combat/overview").await
    }

    pub async fn pvp_battle(&self, opponent: &str) -> Result<BattleResponse, ClientError> {
        self.post("/api/combat/pvp", &json!({ "opponent": opponent })).await
    }

    pub async fn campaign_battle(&self, monster_id: &str) -> Result<BattleResponse, ClientError> {
        self.post("/api/combat/campaign-battle", &json!({ "monster_id": monster_id })).await
    }

    pub async fn temple_status(&self) -> Result<TempleSnapshot, ClientError> {
        let res: TempleResponse = self.get("/api/temple/status").await?;
        Ok(res.temple)
    }

    pub async fn temple_fight(&self, room_id: &str) -> Result<BattleResponse, ClientError> {
        self.post("/api/temple/fight", &json!({ "room_id": room_id })).await
    }

    pub async fn temple_ritual(&self, blessing_id: &str) -> Result<RitualResponse, ClientError> {
        self.post("/api/temple/ritual", &json!({ "blessing_id": blessing_id })).await
    }

    pub async fn inventory(&self) -> Result<Inventory, ClientError> {
        let res: InventoryResponse = self.get("/api/inventory").await?;
        Ok(res.inventory)
    }

    pub async fn sell_item(&self, instance_id: i64) -> Result<SellResponse, ClientError> {
        self.post("/api/inventory/sell", &json!({ "instance_id": instance_id })).await
    }

    pub async fn player_equipment(&self, username: &str) -> Result<PlayerEquipment, ClientError> {
        self.get(&player_equipment_path(username)).await
    }
}

/// Percent-encodes everything outside the URL-unreserved set.
pub fn encode_path_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
            other => format!("%{other:02X}"),
        })
        .collect()
}

pub fn player_equipment_path(username: &str) -> String {
    format!("/api/player-equipment/{}", encode_path_segment(username.trim()))
}

/// Client-side guard mirroring the server's trade validation.
pub fn validate_trade_amount(amount: f64) -> Result<f64, String> {
    if !amount.is_finite() || amount <= 0.0 {
        Err("Enter a positive amount.".to_string())
    } else if amount > MAX_TRADE_AMOUNT {
        Err("That trade is too large.".to_string())
    } else {
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_decodes() {
        let res: ClickResponse =
            decode_response(200, r#"{"gooncoins": 12.5, "click_value": 1.5, "total_clicks": 9}"#).unwrap();
        assert_eq!(res.gooncoins, 12.5);
        assert_eq!(res.total_clicks, 9);
    }

    #[test]
    fn arrays_decode_without_success_flag() {
        let board: Vec<LeaderEntry> =
            decode_response(200, r#"[{"username": "a", "gooncoins": 5, "total_clicks": 2}]"#).unwrap();
        assert_eq!(board[0].username, "a");
    }

    #[test]
    fn success_false_is_a_rejection() {
        let err = decode_response::<BuildResponse>(200, r#"{"success": false, "error": "Already built"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(ref m) if m == "Already built"));
    }

    #[test]
    fn error_status_carries_server_message() {
        let err = decode_response::<TempleResponse>(400, r#"{"success": false, "error": "Wait for recovery", "cooldown_seconds": 30}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 400, ref message } if message == "Wait for recovery"));

        let err = decode_response::<TempleResponse>(502, "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 502, ref message } if message.is_empty()));
    }

    #[test]
    fn garbage_success_body_is_decode_error() {
        let err = decode_response::<ClickResponse>(200, "not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn trade_amount_bounds() {
        assert!(validate_trade_amount(0.0).is_err());
        assert!(validate_trade_amount(f64::NAN).is_err());
        assert!(validate_trade_amount(2_000_000.0).is_err());
        assert_eq!(validate_trade_amount(25.0), Ok(25.0));
    }

    #[test]
    fn base_url_joins_cleanly() {
        assert_eq!(ApiClient::new("http://localhost:5000/").url("/api/click"), "http://localhost:5000/api/click");
        assert_eq!(ApiClient::default().url("/api/click"), "/api/click");
    }

    #[test]
    fn player_lookup_path_is_escaped() {
        assert_eq!(player_equipment_path("vlasta"), "/api/player-equipment/vlasta");
        assert_eq!(player_equipment_path(" a b/c "), "/api/player-equipment/a%20b%2Fc");
        assert_eq!(encode_path_segment("Že"), "%C5%BDe");
    }

    #[test]
    fn unknown_player_is_http_error() {
        let err = decode_response::<PlayerEquipment>(404, r#"{"error": "User not found"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 404, ref message } if message == "User not found"));
    }

    #[test]
    fn inventory_envelope_unwraps() {
        let res: InventoryResponse =
            decode_response(200, r#"{"success": true, "inventory": {"items": [{"instance_id": 4, "equipment_id": "x"}]}}"#)
                .unwrap();
        assert_eq!(res.inventory.items[0].instance_id, 4);
    }
}
