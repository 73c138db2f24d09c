use super::arena_harness::{ScriptedEnvironmentFactory, read_json_lines};
use serde_json::json;
use tempfile::TempDir;
use werewolf_arena::{ArenaConfig, BackendRegistry, Campaign, GameResult};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn network_config(port: u16) -> ArenaConfig {
    let toml = format!(
        r#"
[game]
seed = 5

[game.roles]
werewolf = 1
villager = 2

[agents.werewolf]
backend = "gpt"
params = {{ host = "127.0.0.1", port = {port}, model = "wolf-7b" }}

[agents.villager]
backend = "gpt"
params = {{ host = "127.0.0.1", port = {port}, model = "wolf-7b" }}
"#
    );
    ArenaConfig::from_toml(&toml).unwrap()
}

async fn mock_chat_server(expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer EMPTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"vote\": 1}"}}]
        })))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn network_seats_share_one_descriptor_and_reach_endpoint() {
    // Three seats, six turns.
    let server = mock_chat_server(6).await;
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");

    let registry = BackendRegistry::with_builtin_backends().unwrap();
    let mut campaign =
        Campaign::prepare(registry, &network_config(server.address().port()), 0, &output).unwrap();
    assert_eq!(campaign.descriptor_builds(), 1);

    let outcomes = campaign
        .run(1, &ScriptedEnvironmentFactory::new(3, 1))
        .await
        .unwrap();
    assert_eq!(outcomes[0].result, GameResult::WerewolfWin);
    assert_eq!(campaign.descriptor_builds(), 1);

    let log = read_json_lines(&output.join("game_1").join("Player_1.jsonl"));
    assert_eq!(log.len(), 2);
    assert_eq!(log[0]["action"], json!({"vote": 1}));
    assert_eq!(log[0]["prompt"][0]["role"], "system");
}

#[tokio::test]
async fn rank_offset_reaches_shifted_port() {
    let server = mock_chat_server(6).await;
    let port = server.address().port();
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_2");

    let registry = BackendRegistry::with_builtin_backends().unwrap();
    let mut campaign = Campaign::prepare(registry, &network_config(port - 2), 2, &output).unwrap();
    let outcomes = campaign
        .run(1, &ScriptedEnvironmentFactory::new(3, -1))
        .await
        .unwrap();
    assert_eq!(outcomes[0].result, GameResult::VillagerWin);
}

#[tokio::test]
async fn unreachable_backend_records_error_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");

    let registry = BackendRegistry::with_builtin_backends().unwrap();
    let mut campaign =
        Campaign::prepare(registry, &network_config(server.address().port()), 0, &output).unwrap();
    let outcomes = campaign
        .run(2, &ScriptedEnvironmentFactory::new(3, 1))
        .await
        .unwrap();
    assert!(outcomes.iter().all(|o| o.result == GameResult::Error));
}
