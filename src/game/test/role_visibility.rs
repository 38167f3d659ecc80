//! Tests for the static role visibility table.

use crate::game::{Loyalty, Role};

const EVIL_ROLES: [Role; 7] = [
    Role::Assassin,
    Role::Morgana,
    Role::Mordred,
    Role::Oberon,
    Role::Minion1,
    Role::Minion2,
    Role::Minion3,
];

const GOOD_ROLES: [Role; 7] = [
    Role::Merlin,
    Role::Percival,
    Role::Servant1,
    Role::Servant2,
    Role::Servant3,
    Role::Servant4,
    Role::Servant5,
];

#[test]
fn loyalties_are_split_between_good_and_evil() {
    for role in GOOD_ROLES {
        assert_eq!(role.loyalty(), Loyalty::Good);
    }
    for role in EVIL_ROLES {
        assert_eq!(role.loyalty(), Loyalty::Evil);
    }
}

#[test]
fn merlin_sees_all_evil_except_mordred() {
    for role in EVIL_ROLES {
        let expected = role != Role::Mordred;
        assert_eq!(Role::Merlin.can_see(role), expected, "Merlin vs {:?}", role);
    }
    for role in GOOD_ROLES {
        assert!(!Role::Merlin.can_see(role), "Merlin must not see {:?}", role);
    }
}

#[test]
fn percival_sees_merlin_and_morgana_only() {
    for role in GOOD_ROLES.into_iter().chain(EVIL_ROLES) {
        let expected = matches!(role, Role::Merlin | Role::Morgana);
        assert_eq!(Role::Percival.can_see(role), expected, "Percival vs {:?}", role);
    }
}

#[test]
fn evil_see_each_other_except_oberon() {
    for viewer in EVIL_ROLES {
        for target in EVIL_ROLES {
            let expected = viewer != Role::Oberon && target != Role::Oberon;
            assert_eq!(viewer.can_see(target), expected, "{:?} vs {:?}", viewer, target);
        }
    }
}

#[test]
fn evil_do_not_see_good() {
    for viewer in EVIL_ROLES {
        for target in GOOD_ROLES {
            assert!(!viewer.can_see(target), "{:?} must not see {:?}", viewer, target);
        }
    }
}

#[test]
fn servants_see_no_one() {
    for viewer in [Role::Servant1, Role::Servant2, Role::Servant3] {
        for target in GOOD_ROLES.into_iter().chain(EVIL_ROLES) {
            assert!(!viewer.can_see(target));
        }
    }
}

#[test]
fn visibility_is_antisymmetric_for_merlin_and_assassin() {
    assert!(Role::Merlin.can_see(Role::Assassin));
    assert!(!Role::Assassin.can_see(Role::Merlin));
}

#[test]
fn players_delegate_visibility_to_their_roles() {
    use super::test_utils::create_started_game;

    let game = create_started_game(7, 71);
    let inner = game.inner.lock().unwrap();
    let merlin = inner.players.all().iter().find(|p| p.role() == Some(Role::Merlin)).unwrap();
    let assassin = inner.players.assassin().unwrap();
    assert!(merlin.can_see(assassin));
    assert!(!assassin.can_see(merlin));
}

#[test]
fn undealt_players_see_nothing() {
    use crate::game::Player;

    let alice = Player::new("alice");
    let bob = Player::new("bob");
    assert!(!alice.can_see(&bob));
}
