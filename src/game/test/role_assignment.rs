//! Tests for role assignment across all supported player counts.

use super::test_utils::*;
use crate::game::{LevelPreset, Loyalty, Role, StateKind};

fn roles_of(game: &crate::game::Game) -> Vec<Role> {
    let inner = game.inner.lock().unwrap();
    inner.players.all().iter().map(|p| p.role().unwrap()).collect()
}

#[test]
fn every_player_count_deals_the_preset_distribution() {
    for player_count in 5..=10 {
        let game = create_started_game(player_count, 42);
        let preset = LevelPreset::new(player_count).unwrap();
        let roles = roles_of(&game);

        let good = roles.iter().filter(|r| r.loyalty() == Loyalty::Good).count();
        let evil = roles.iter().filter(|r| r.loyalty() == Loyalty::Evil).count();
        assert_eq!(good, preset.good_count(), "{} players", player_count);
        assert_eq!(evil, preset.evil_count(), "{} players", player_count);
        assert_eq!(good + evil, player_count);
    }
}

#[test]
fn merlin_and_assassin_are_always_dealt() {
    for player_count in 5..=10 {
        let game = create_started_game(player_count, 7);
        let roles = roles_of(&game);
        assert!(roles.contains(&Role::Merlin), "{} players", player_count);
        assert!(roles.contains(&Role::Assassin), "{} players", player_count);
    }
}

#[test]
fn roles_are_pairwise_unique() {
    for player_count in 5..=10 {
        let game = create_started_game(player_count, 3);
        let mut roles = roles_of(&game);
        roles.sort_by_key(|r| format!("{:?}", r));
        roles.dedup();
        assert_eq!(roles.len(), player_count, "{} players", player_count);
    }
}

#[test]
fn exactly_one_leader_and_one_assassin() {
    for player_count in 5..=10 {
        let game = create_started_game(player_count, 11);
        let inner = game.inner.lock().unwrap();
        let leaders = inner.players.all().iter().filter(|p| p.is_leader()).count();
        let assassins = inner.players.all().iter().filter(|p| p.is_assassin()).count();
        assert_eq!(leaders, 1, "{} players", player_count);
        assert_eq!(assassins, 1, "{} players", player_count);
    }
}

#[test]
fn the_assassin_flag_sits_on_the_assassin_role() {
    let game = create_started_game(8, 21);
    let inner = game.inner.lock().unwrap();
    let assassin = inner.players.assassin().unwrap();
    assert_eq!(assassin.role(), Some(Role::Assassin));
}

#[test]
fn optional_roles_are_dealt_when_requested() {
    let game = create_game_with_players(7, 5);
    game.start(&[Role::Percival, Role::Morgana, Role::Mordred]).unwrap();
    let roles = roles_of(&game);
    assert!(roles.contains(&Role::Percival));
    assert!(roles.contains(&Role::Morgana));
    assert!(roles.contains(&Role::Mordred));
    assert!(!roles.contains(&Role::Oberon));
}

#[test]
fn optional_roles_are_absent_by_default() {
    let game = create_started_game(10, 9);
    let roles = roles_of(&game);
    for role in [Role::Percival, Role::Morgana, Role::Mordred, Role::Oberon] {
        assert!(!roles.contains(&role), "{:?} must not be dealt", role);
    }
}

#[test]
fn optional_evil_roles_are_capped_by_the_evil_slots() {
    // Five players leave one evil slot beside the assassin, so only the
    // first requested optional evil role makes the cut.
    let game = create_game_with_players(5, 13);
    game.start(&[Role::Morgana, Role::Mordred, Role::Oberon]).unwrap();
    let roles = roles_of(&game);
    assert!(roles.contains(&Role::Assassin));
    assert!(roles.contains(&Role::Morgana));
    assert!(!roles.contains(&Role::Mordred));
    assert!(!roles.contains(&Role::Oberon));
}

#[test]
fn the_deal_is_deterministic_for_a_seed() {
    let first = roles_of(&create_started_game(7, 77));
    let second = roles_of(&create_started_game(7, 77));
    assert_eq!(first, second);
}

#[test]
fn different_seeds_shuffle_differently() {
    let first = roles_of(&create_started_game(7, 1));
    let second = roles_of(&create_started_game(7, 2));
    assert_ne!(first, second, "different seeds should deal different hands");
}

#[test]
fn starting_enters_team_proposition() {
    let game = create_started_game(5, 1);
    assert_eq!(game.state(), StateKind::TeamProposition);
    assert!(game.snapshot().started_at.is_some());
}
