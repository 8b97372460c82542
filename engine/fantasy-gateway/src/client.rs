//! HTTP client for the fantasy service JSON API

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    Account, Ack, ComputeReport, CreateLeagueRequest, GameweekSpec, JoinLeagueRequest,
    LeagueCreated, LeagueId, LeagueJoined, LineupSubmission, PlayerStatLine, RegisterRequest,
    RegisteredUser, SquadSubmission, Standings, StatsUpload, UserId,
};
use crate::service::FantasyService;
use player_catalog::Player;
use reqwest::{Method, StatusCode};
use roster_engine::Gameweek;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Header carrying the acting user's id
const USER_HEADER: &str = "X-User";

/// Fantasy service API client
#[derive(Debug, Clone)]
pub struct HttpFantasyClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFantasyClient {
    /// Create a new client from gateway configuration
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { base_url: config.api_base_url.trim_end_matches('/').to_string(), client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to load its demo data. Callers usually ignore failures.
    pub async fn seed_demo(&self) -> GatewayResult<Ack> {
        self.send(Method::POST, "/demo/seed_all", None, None::<&()>).await
    }

    /// Register an account and return its id
    pub async fn register(&self, name: &str, email: &str) -> GatewayResult<UserId> {
        let body = RegisterRequest { name, email };
        let user: RegisteredUser =
            decode(self.send(Method::POST, "/register", None, Some(&body)).await?)?;
        info!("Registered {} as user {}", email, user.id);
        Ok(user.id)
    }

    pub async fn me(&self, user: UserId) -> GatewayResult<Account> {
        decode(self.send(Method::GET, "/me", Some(user), None::<&()>).await?)
    }

    /// Create a league and enter it with a team
    pub async fn create_league(
        &self,
        user: UserId,
        name: &str,
        team_name: &str,
    ) -> GatewayResult<LeagueCreated> {
        let body = CreateLeagueRequest { name, team_name };
        decode(self.send(Method::POST, "/league/create", Some(user), Some(&body)).await?)
    }

    pub async fn join_league(
        &self,
        user: UserId,
        league_id: LeagueId,
        team_name: &str,
    ) -> GatewayResult<LeagueJoined> {
        let body = JoinLeagueRequest { league_id, team_name };
        decode(self.send(Method::POST, "/league/join", Some(user), Some(&body)).await?)
    }

    pub async fn create_gameweek(&self, user: UserId, spec: &GameweekSpec) -> GatewayResult<Ack> {
        self.send(Method::POST, "/gameweeks/create", Some(user), Some(spec)).await
    }

    pub async fn upload_stats(
        &self,
        user: UserId,
        gameweek: Gameweek,
        stats: &[PlayerStatLine],
    ) -> GatewayResult<Ack> {
        let body = StatsUpload { gameweek, stats };
        self.send(Method::POST, "/stats/upload", Some(user), Some(&body)).await
    }

    /// Have the service score a gameweek
    pub async fn compute_gameweek(&self, gameweek: Gameweek) -> GatewayResult<ComputeReport> {
        let path = format!("/compute/{}", gameweek.get());
        decode(self.send(Method::POST, &path, None, None::<&()>).await?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        user: Option<UserId>,
        body: Option<&B>,
    ) -> GatewayResult<Ack> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);
        if let Some(user) = user {
            request = request.header(USER_HEADER, user.to_string());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = rejection_message(status, &text);
            warn!("Fantasy service rejected {}: {}", url, message);
            return Err(GatewayError::Rejected { status: status.as_u16(), message });
        }

        // Success responses without a JSON body are still acknowledgements
        let body = serde_json::from_str::<Value>(&text).ok();
        Ok(Ack { status: status.as_u16(), body })
    }
}

#[async_trait::async_trait]
impl FantasyService for HttpFantasyClient {
    async fn fetch_players(&self) -> GatewayResult<Vec<Player>> {
        let players: Vec<Player> =
            decode(self.send(Method::GET, "/players", None, None::<&()>).await?)?;
        info!("Fetched {} players", players.len());
        Ok(players)
    }

    async fn submit_squad(&self, user: UserId, submission: &SquadSubmission) -> GatewayResult<Ack> {
        self.send(Method::POST, "/squad/set", Some(user), Some(submission)).await
    }

    async fn submit_lineup(
        &self,
        user: UserId,
        submission: &LineupSubmission,
    ) -> GatewayResult<Ack> {
        self.send(Method::POST, "/lineup/set", Some(user), Some(submission)).await
    }

    async fn fetch_standings(&self, league: LeagueId) -> GatewayResult<Standings> {
        let path = format!("/standings/{league}");
        decode(self.send(Method::GET, &path, None, None::<&()>).await?)
    }
}

fn decode<T: DeserializeOwned>(ack: Ack) -> GatewayResult<T> {
    Ok(serde_json::from_value(ack.body.unwrap_or(Value::Null))?)
}

/// Error text for a failed response: the service's `detail`, else the JSON
/// body, else the status line
fn rejection_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            detail_message(&map).unwrap_or_else(|| Value::Object(map).to_string())
        }
        Ok(value) => value.to_string(),
        Err(_) => {
            let reason = status.canonical_reason().unwrap_or_default();
            format!("{} {}", status.as_u16(), reason).trim_end().to_string()
        }
    }
}

fn detail_message(map: &Map<String, Value>) -> Option<String> {
    match map.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        detail @ (Value::Array(_) | Value::Object(_)) => Some(detail.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_catalog::PlayerId;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one HTTP request with a canned response; the handle yields the raw request
    async fn serve_once(
        status_line: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (HttpFantasyClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = GatewayConfig {
            api_base_url: format!("http://{}", listener.local_addr().unwrap()),
            ..GatewayConfig::default()
        };

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
                if let Some(end) = request.windows(4).position(|window| window == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: {content_type}\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (HttpFantasyClient::new(&config).unwrap(), server)
    }

    #[tokio::test]
    async fn test_authenticated_call_sends_user_header() {
        let (client, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"id": 7, "name": "Marc", "email": "marc@example.com"}"#,
        )
        .await;

        let account = client.me(UserId(7)).await.unwrap();
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(account.id, UserId(7));
        assert!(request.starts_with("get /me "));
        assert!(request.contains("x-user: 7\r\n"));
    }

    #[tokio::test]
    async fn test_plain_text_success_is_an_empty_ack() {
        let (client, server) = serve_once("200 OK", "text/plain", "seeded").await;

        let ack = client.seed_demo().await.unwrap();
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(ack, Ack { status: 200, body: None });
        assert!(request.starts_with("post /demo/seed_all "));
        assert!(!request.contains("x-user:"));
    }

    #[tokio::test]
    async fn test_refused_submission_surfaces_detail() {
        let (client, server) =
            serve_once("400 Bad Request", "application/json", r#"{"detail": "Deadline passed"}"#)
                .await;
        let submission = SquadSubmission {
            gameweek: Gameweek::new(3).unwrap(),
            player_ids: vec![PlayerId(4), PlayerId(9)],
        };

        let result = client.submit_squad(UserId(11), &submission).await;
        let request = server.await.unwrap();

        match result {
            Err(GatewayError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Deadline passed");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(request.to_lowercase().contains("x-user: 11\r\n"));
        assert!(request.ends_with(r#"{"gameweek":3,"player_ids":[4,9]}"#));
    }

    #[test]
    fn test_rejection_prefers_detail() {
        let message =
            rejection_message(StatusCode::BAD_REQUEST, r#"{"detail": "Deadline passed for GW3"}"#);
        assert_eq!(message, "Deadline passed for GW3");
    }

    #[test]
    fn test_rejection_structured_detail() {
        let message = rejection_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "player_ids"], "msg": "too short"}]}"#,
        );
        assert_eq!(message, r#"[{"loc":["body","player_ids"],"msg":"too short"}]"#);
    }

    #[test]
    fn test_rejection_without_detail_uses_body() {
        let message = rejection_message(StatusCode::CONFLICT, r#"{"error": "squad locked"}"#);
        assert_eq!(message, r#"{"error":"squad locked"}"#);
    }

    #[test]
    fn test_rejection_without_json_uses_status_line() {
        assert_eq!(
            rejection_message(StatusCode::BAD_GATEWAY, "<html>upstream down</html>"),
            "502 Bad Gateway"
        );
        assert_eq!(rejection_message(StatusCode::NOT_FOUND, ""), "404 Not Found");
    }

    #[test]
    fn test_decode_empty_ack_fails() {
        let ack = Ack { status: 200, body: None };
        assert!(matches!(decode::<Account>(ack), Err(GatewayError::Serialization(_))));
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = GatewayConfig {
            api_base_url: "http://localhost:8000/".to_string(),
            ..GatewayConfig::default()
        };
        let client = HttpFantasyClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
