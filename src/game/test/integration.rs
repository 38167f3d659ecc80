//! End-to-end command scenarios, driven through the public surface only.

use super::test_utils::*;
use crate::error::GameError;
use crate::game::{Player, Role, StateKind};

#[test]
fn an_underpopulated_game_cannot_start() {
    let game = create_game_with_players(4, 51);
    let result = game.start(&[]);
    assert_eq!(result.unwrap_err(), GameError::IncorrectNumberOfPlayers);
    assert_eq!(game.state(), StateKind::Preparation);
    assert!(game.snapshot().started_at.is_none());
}

#[test]
fn an_overpopulated_roster_is_rejected() {
    let game = create_game_with_players(10, 52);
    let result = game.add_player(Player::new("player10"));
    assert_eq!(result.unwrap_err(), GameError::MaximumPlayersReached);
    assert_eq!(game.snapshot().players_manager.players.len(), 10);
}

#[test]
fn a_game_starts_only_once() {
    let game = create_started_game(5, 53);
    assert_eq!(game.start(&[]).unwrap_err(), GameError::AlreadyStarted);
    assert_eq!(
        game.add_player(Player::new("latecomer")).unwrap_err(),
        GameError::AlreadyStarted
    );
}

#[tokio::test(start_paused = true)]
async fn the_happy_path_reaches_the_assassination() {
    let game = create_started_game(7, 54);
    game.reveal_roles(10).wait().await;
    assert!(!game.roles_are_revealed());

    for _ in 0..3 {
        run_quest(&game, true);
    }
    assert_eq!(game.state(), StateKind::Assassination);
}

#[test]
fn the_assassin_wins_the_game_by_naming_merlin() {
    let game = create_started_game(7, 55);
    advance_to_assassination(&game);
    let assassin = player_with_role(&game, Role::Assassin);
    let merlin = player_with_role(&game, Role::Merlin);

    game.assassinate(&assassin, &merlin).unwrap();
    let snapshot = game.snapshot();
    assert_eq!(snapshot.state, StateKind::Finish);
    assert_eq!(
        snapshot.quests_manager.assassination_status,
        Some(crate::game::AssassinationStatus::Success)
    );
}

#[test]
fn the_assassin_loses_the_game_by_missing_merlin() {
    let game = create_started_game(7, 56);
    advance_to_assassination(&game);
    let assassin = player_with_role(&game, Role::Assassin);
    let decoy = player_with_role(&game, Role::Servant2);

    game.assassinate(&assassin, &decoy).unwrap();
    let snapshot = game.snapshot();
    assert_eq!(snapshot.state, StateKind::Finish);
    assert_eq!(
        snapshot.quests_manager.assassination_status,
        Some(crate::game::AssassinationStatus::Fail)
    );
}

#[test]
fn the_fifth_team_vote_is_forced_through() {
    let game = create_started_game(7, 57);

    // Four rejected propositions: leadership rotates, the round advances.
    for round in 0..4 {
        let before = leader(&game);
        propose_and_submit(&game);
        vote_team(&game, false);
        assert_eq!(game.state(), StateKind::TeamProposition);
        assert_ne!(leader(&game), before, "a rejection hands the leadership on");
        let inner = game.inner.lock().unwrap();
        assert_eq!(inner.quests.current_quest().team_voting_round_index(), round + 1);
    }

    // The fifth submission needs no ballots: the machine approves them all.
    propose_and_submit(&game);
    assert_eq!(game.state(), StateKind::QuestVoting);
    let snapshot = game.snapshot();
    assert!(snapshot.quests_manager.team_voting_rounds_exhausted);

    let leader = leader(&game);
    let vote = game.vote_for_team(&leader, false);
    assert_eq!(vote.unwrap_err(), GameError::NoVotingTime);
}

#[test]
fn a_rejected_vote_does_not_change_the_round() {
    let game = create_started_game(5, 58);
    propose_and_submit(&game);
    let leader = leader(&game);
    game.vote_for_team(&leader, true).unwrap();

    // Voting twice in the same round is refused before any mutation.
    let again = game.vote_for_team(&leader, false);
    assert_eq!(again.unwrap_err(), GameError::NoRightToVote);
    let inner = game.inner.lock().unwrap();
    let quest = inner.quests.current_quest();
    assert_eq!(quest.team_voting_round_index(), 0);
    assert!(!quest.current_round_complete());
}

#[test]
fn outsiders_cannot_join_the_quest_vote() {
    let game = create_started_game(5, 59);
    propose_and_submit(&game);
    vote_team(&game, true);
    assert_eq!(game.state(), StateKind::QuestVoting);

    let outsider = usernames(&game)
        .into_iter()
        .find(|u| !proposed(&game).contains(u))
        .unwrap();
    let vote = game.vote_for_quest(&outsider, false);
    assert_eq!(vote.unwrap_err(), GameError::NoRightToVote);
}

#[test]
fn non_leaders_cannot_propose_or_submit() {
    let game = create_started_game(5, 60);
    let leader = leader(&game);
    let follower = usernames(&game).into_iter().find(|u| *u != leader).unwrap();

    assert_eq!(
        game.toggle_is_proposed(&follower, &leader).unwrap_err(),
        GameError::NoRightToPropose
    );
    assert_eq!(game.submit_team(&follower).unwrap_err(), GameError::NoRightToSubmitTeam);
}

#[test]
fn a_team_of_the_wrong_size_cannot_be_submitted() {
    let game = create_started_game(5, 61);
    let leader = leader(&game);
    game.toggle_is_proposed(&leader, &leader).unwrap();
    game.toggle_is_proposed(&leader, &leader).unwrap();
    // No one proposed: quest one wants two players.
    assert_eq!(game.submit_team(&leader).unwrap_err(), GameError::IncorrectNumberOfPlayers);
}

#[test]
fn error_kinds_are_stable_strings() {
    assert_eq!(GameError::AlreadyStarted.kind(), "GAME_ALREADY_STARTED");
    assert_eq!(GameError::IncorrectNumberOfPlayers.kind(), "INCORRECT_NUMBER_OF_PLAYERS");
    assert_eq!(GameError::UsernameAlreadyExists.kind(), "USERNAME_ALREADY_EXISTS");
    assert_eq!(GameError::MaximumPlayersReached.kind(), "MAXIMUM_PLAYERS_REACHED");
    assert_eq!(GameError::NoRightToPropose.kind(), "NO_RIGHT_TO_PROPOSE");
    assert_eq!(GameError::NoPropositionTime.kind(), "NO_PROPOSITION_TIME");
    assert_eq!(GameError::NoRightToSubmitTeam.kind(), "NO_RIGHT_TO_SUBMIT_TEAM");
    assert_eq!(GameError::NoVotingTime.kind(), "NO_VOTING_TIME");
    assert_eq!(GameError::NoRightToVote.kind(), "NO_RIGHT_TO_VOTE");
    assert_eq!(GameError::NoAssassinationTime.kind(), "NO_ASSASSINATION_TIME");
    assert_eq!(GameError::NoRightToAssassinate.kind(), "NO_RIGHT_TO_ASSASSINATE");
    assert_eq!(GameError::NoActionTime.kind(), "NO_ACTION_TIME");
}

#[test]
fn usernames_survive_a_full_game_unchanged() {
    let game = create_started_game(6, 62);
    let before = usernames(&game);
    for _ in 0..3 {
        run_quest(&game, false);
    }
    assert_eq!(usernames(&game), before);
    assert_eq!(game.state(), StateKind::Finish);
}
