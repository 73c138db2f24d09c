use super::arena_harness::{
    SIX_SEAT_CONFIG, ScriptedEnvironmentFactory, offline_registry, read_json, six_seat_config,
};
use tempfile::TempDir;
use werewolf_arena::{ArenaConfig, Campaign, GameResult};

#[tokio::test]
async fn failed_game_is_recorded_and_next_game_runs() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let mut campaign = Campaign::prepare(offline_registry(), &six_seat_config(), 0, &output).unwrap();

    let environments = ScriptedEnvironmentFactory::new(6, -1).failing_on(&[1]);
    let outcomes = campaign.run(2, &environments).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].result, GameResult::Error);
    assert_eq!(outcomes[1].result, GameResult::VillagerWin);
    assert_eq!(environments.created(), 2);

    let first = read_json(&output.join("game_1").join("meta_info.json"));
    let second = read_json(&output.join("game_2").join("meta_info.json"));
    assert_eq!(first["result"], "Error");
    assert_eq!(first["role_map"].as_object().unwrap().len(), 6);
    assert_eq!(second["result"], "Villager win");
}

#[tokio::test]
async fn replacement_failure_aborts_only_that_game() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let toml = format!(
        "{SIX_SEAT_CONFIG}\n[agents.replace]\nbackend = \"candidate\"\n\n[replace]\n\
         target = \"villager\"\nsubstitute = \"replace\"\ncount = 5\n\
         eligibility = \"plain-villager\"\n"
    );
    let config = ArenaConfig::from_toml(&toml).unwrap();
    let mut campaign = Campaign::prepare(offline_registry(), &config, 0, &output).unwrap();

    let environments = ScriptedEnvironmentFactory::new(6, 1);
    let outcomes = campaign.run(2, &environments).await.unwrap();

    assert!(outcomes.iter().all(|o| o.result == GameResult::Error));
    assert_eq!(environments.created(), 0, "no engine is started for a failed setup");
    assert!(output.join("game_2").join("meta_info.json").exists());
}

#[tokio::test]
async fn restarted_campaign_skips_recorded_games() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");

    let mut first = Campaign::prepare(offline_registry(), &six_seat_config(), 0, &output).unwrap();
    first
        .run(2, &ScriptedEnvironmentFactory::new(6, -1))
        .await
        .unwrap();
    let recorded = std::fs::read_to_string(output.join("game_1").join("meta_info.json")).unwrap();

    let mut second = Campaign::prepare(offline_registry(), &six_seat_config(), 0, &output).unwrap();
    let environments = ScriptedEnvironmentFactory::new(6, 1);
    let outcomes = second.run(3, &environments).await.unwrap();

    assert_eq!(environments.created(), 1, "only the unrecorded game is played");
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].game_id, 3);
    assert_eq!(outcomes[0].result, GameResult::WerewolfWin);

    let third = read_json(&output.join("game_3").join("meta_info.json"));
    assert_eq!(third["result"], "Werewolf win");
    assert_eq!(
        std::fs::read_to_string(output.join("game_1").join("meta_info.json")).unwrap(),
        recorded
    );
}

#[cfg(unix)]
#[tokio::test]
async fn unwritable_record_does_not_abort_campaign() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let game_dir = output.join("game_1");
    std::fs::create_dir_all(&game_dir).unwrap();
    // Dangling link: not an existing record, but creating the file fails.
    std::os::unix::fs::symlink(tmp.path().join("missing"), game_dir.join("meta_info.json"))
        .unwrap();

    let mut campaign = Campaign::prepare(offline_registry(), &six_seat_config(), 0, &output).unwrap();
    let environments = ScriptedEnvironmentFactory::new(6, -1);
    let outcomes = campaign.run(2, &environments).await.unwrap();

    assert_eq!(environments.created(), 2);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].result, GameResult::VillagerWin);
    assert!(output.join("game_2").join("meta_info.json").is_file());
}
