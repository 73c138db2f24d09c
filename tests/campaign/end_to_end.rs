use super::arena_harness::{
    ScriptedEnvironment, ScriptedEnvironmentFactory, offline_registry, read_json,
    read_json_lines, six_seat_config,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tempfile::TempDir;
use werewolf_arena::agents::Agent;
use werewolf_arena::backends::BackendDescriptor;
use werewolf_arena::config::SNAPSHOT_FILE;
use werewolf_arena::game::{Role, compute_roles};
use werewolf_arena::{Campaign, GameResult, run_game};

#[tokio::test]
async fn six_seat_game_ends_in_villager_win() {
    let config = six_seat_config();
    let roles = compute_roles(&config.game.roles, &mut StdRng::seed_from_u64(1));
    assert_eq!(roles.len(), 6);
    assert_eq!(roles.indices_of(Role::Werewolf).len(), 2);

    let tmp = TempDir::new().unwrap();
    let registry = offline_registry();
    let descriptor = Arc::new(BackendDescriptor::human("scripted"));
    let mut agents: Vec<Box<dyn Agent>> = (1..=6)
        .map(|seat| {
            registry
                .build_agent(
                    "scripted",
                    seat,
                    Arc::clone(&descriptor),
                    &tmp.path().join(format!("Player_{seat}.jsonl")),
                )
                .unwrap()
        })
        .collect();

    let mut env = ScriptedEnvironment::new(6, 12, -1);
    let result = run_game(&mut env, &mut agents, &roles).await.unwrap();
    assert_eq!(result, GameResult::VillagerWin);
}

#[tokio::test]
async fn campaign_persists_outcome_and_seat_logs() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let mut campaign = Campaign::prepare(offline_registry(), &six_seat_config(), 0, &output).unwrap();

    let outcomes = campaign
        .run(1, &ScriptedEnvironmentFactory::new(6, -1))
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].result, GameResult::VillagerWin);
    assert_eq!(outcomes[0].game_id, 1);

    let game_dir = output.join("game_1");
    let meta = read_json(&game_dir.join("meta_info.json"));
    assert_eq!(meta["result"], "Villager win");
    assert_eq!(meta["game_id"], 1);
    assert_eq!(meta["rank"], 0);
    assert!(meta["duration"].as_f64().unwrap() >= 0.0);

    let roles = meta["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 6);
    assert_eq!(roles.iter().filter(|r| *r == "Werewolf").count(), 2);
    assert_eq!(roles.iter().filter(|r| *r == "Villager").count(), 4);
    for seat in 1..=6 {
        assert_eq!(meta["role_map"][format!("Player_{seat}")], roles[seat - 1]);

        let log = read_json_lines(&game_dir.join(format!("Player_{seat}.jsonl")));
        assert_eq!(log.len(), 2, "every seat acts twice in a 12-turn game");
        assert!(log.iter().all(|record| record["seat"] == seat));
    }

    assert!(tmp.path().join(SNAPSHOT_FILE).exists());
}

#[tokio::test]
async fn games_are_numbered_from_one() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("rank_0");
    let mut campaign = Campaign::prepare(offline_registry(), &six_seat_config(), 0, &output).unwrap();

    let outcomes = campaign
        .run(3, &ScriptedEnvironmentFactory::new(6, 1))
        .await
        .unwrap();
    let ids: Vec<usize> = outcomes.iter().map(|o| o.game_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    for id in 1..=3 {
        assert!(output.join(format!("game_{id}")).join("meta_info.json").exists());
    }
    assert!(outcomes.iter().all(|o| o.result == GameResult::WerewolfWin));
}

#[tokio::test]
async fn seeded_campaigns_shuffle_identically() {
    let tmp = TempDir::new().unwrap();
    let mut first =
        Campaign::prepare(offline_registry(), &six_seat_config(), 0, &tmp.path().join("a")).unwrap();
    let mut second =
        Campaign::prepare(offline_registry(), &six_seat_config(), 0, &tmp.path().join("b")).unwrap();

    let a = first.run(2, &ScriptedEnvironmentFactory::new(6, 0)).await.unwrap();
    let b = second.run(2, &ScriptedEnvironmentFactory::new(6, 0)).await.unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.roles, y.roles);
        assert_eq!(x.result, GameResult::Draw);
    }
}
