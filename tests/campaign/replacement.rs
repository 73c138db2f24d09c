use super::arena_harness::{
    SIX_SEAT_CONFIG, ScriptedEnvironmentFactory, offline_registry, read_json, read_json_lines,
};
use tempfile::TempDir;
use werewolf_arena::{ArenaConfig, Campaign, GameResult};

fn config_with(replace: &str) -> ArenaConfig {
    let toml = format!(
        "{SIX_SEAT_CONFIG}\n[agents.replace]\nbackend = \"candidate\"\n\n[replace]\n{replace}\n"
    );
    ArenaConfig::from_toml(&toml).unwrap()
}

fn seat_labels(game_dir: &std::path::Path) -> Vec<String> {
    (1..=6)
        .map(|seat| {
            let log = read_json_lines(&game_dir.join(format!("Player_{seat}.jsonl")));
            log[0]["action"]["by"].as_str().unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn last_werewolf_is_played_by_substitute() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let config = config_with("target = \"werewolf\"\nstrategy = \"last\"\nsubstitute = \"replace\"");
    let mut campaign = Campaign::prepare(offline_registry(), &config, 0, &output).unwrap();

    let outcomes = campaign
        .run(2, &ScriptedEnvironmentFactory::new(6, 1))
        .await
        .unwrap();
    assert!(outcomes.iter().all(|o| o.result == GameResult::WerewolfWin));

    for game_id in 1..=2 {
        let game_dir = output.join(format!("game_{game_id}"));
        let meta = read_json(&game_dir.join("meta_info.json"));
        let roles: Vec<&str> = meta["roles"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_str().unwrap())
            .collect();
        let last_wolf = roles.iter().rposition(|r| *r == "Werewolf").unwrap();

        let labels = seat_labels(&game_dir);
        for (idx, label) in labels.iter().enumerate() {
            let expected = if idx == last_wolf { "candidate" } else { "scripted" };
            assert_eq!(label, expected, "game {game_id} seat {}", idx + 1);
        }
    }
}

#[tokio::test]
async fn villager_target_replaces_requested_count() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let config = config_with(
        "target = \"villager\"\nsubstitute = \"replace\"\ncount = 3\neligibility = \"plain-villager\"",
    );
    let mut campaign = Campaign::prepare(offline_registry(), &config, 0, &output).unwrap();
    campaign
        .run(1, &ScriptedEnvironmentFactory::new(6, -1))
        .await
        .unwrap();

    let game_dir = output.join("game_1");
    let meta = read_json(&game_dir.join("meta_info.json"));
    let labels = seat_labels(&game_dir);
    assert_eq!(labels.iter().filter(|l| *l == "candidate").count(), 3);
    for (idx, label) in labels.iter().enumerate() {
        if label == "candidate" {
            assert_eq!(meta["roles"][idx], "Villager");
        }
    }
}

#[tokio::test]
async fn unrecognized_target_keeps_standard_assignment() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let config = config_with("target = \"seer\"\nsubstitute = \"replace\"");
    let mut campaign = Campaign::prepare(offline_registry(), &config, 0, &output).unwrap();

    let outcomes = campaign
        .run(1, &ScriptedEnvironmentFactory::new(6, 1))
        .await
        .unwrap();
    assert_eq!(outcomes[0].result, GameResult::WerewolfWin);
    assert!(seat_labels(&output.join("game_1")).iter().all(|l| l == "scripted"));
}
