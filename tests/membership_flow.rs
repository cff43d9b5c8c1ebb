//! End-to-end walk through the application/cancellation penalty flow,
//! driven against the fixture catalog with explicit timestamps.

use chrono::{DateTime, TimeZone, Utc};
use geosporty::error::AppError;
use geosporty::fixtures;
use geosporty::session::{Action, Notice, Session};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn join(id: &str, code: Option<&str>) -> Action {
    Action::RequestJoin {
        activity_id: id.to_string(),
        access_code: code.map(str::to_string),
    }
}

fn cancel(id: &str) -> Action {
    Action::CancelApplication {
        activity_id: id.to_string(),
    }
}

#[test]
fn repeated_cancellations_open_a_cooldown_that_blocks_all_joins() {
    let mut session = Session::new("me");
    session.load_groups(fixtures::catalog());

    // Apply to the padel match (policy: apply).
    let notices = session.apply(join("2", None), at(0)).unwrap();
    assert!(matches!(notices[0], Notice::ApplicationSent { .. }));
    assert!(session.membership().is_applied("2"));

    // Cancel within a second: applied set empties, counter reads 1.
    let notices = session.apply(cancel("2"), at(1)).unwrap();
    assert!(matches!(
        notices[0],
        Notice::ApplicationCancelled { count: 1, limit: 3, .. }
    ));
    assert!(!session.membership().is_applied("2"));
    assert_eq!(session.cooldown().cancellation_count(), 1);

    // Apply and cancel twice more.
    session.apply(join("2", None), at(2)).unwrap();
    session.apply(cancel("2"), at(3)).unwrap();
    session.apply(join("2", None), at(4)).unwrap();
    let notices = session.apply(cancel("2"), at(5)).unwrap();
    assert_eq!(session.cooldown().cancellation_count(), 3);
    assert!(notices
        .iter()
        .any(|n| matches!(n, Notice::CooldownStarted { until } if *until == at(35))));

    // An immediate join attempt on any activity is rejected with the
    // remaining lockout time.
    let err = session.apply(join("1", None), at(5)).unwrap_err();
    let AppError::CooldownActive { remaining_secs } = err else {
        panic!("expected cooldown rejection, got {err:?}");
    };
    assert_eq!(remaining_secs, 30);

    // The cancelled application never shows up as joined.
    assert!(!session.membership().is_joined("2"));

    // After the lockout passes, the counter reads 0 again and joins work.
    let notices = session.apply(join("1", None), at(36)).unwrap();
    assert!(matches!(notices[0], Notice::Joined { .. }));
    assert_eq!(session.cooldown().cancellation_count(), 0);
}

#[test]
fn private_fixture_join_with_the_published_code() {
    let mut session = Session::new("me");
    session.load_groups(fixtures::catalog());

    let notices = session
        .apply(join("6", Some(fixtures::FIXTURE_ACCESS_CODE)), at(0))
        .unwrap();
    assert!(matches!(notices[0], Notice::Joined { .. }));
    assert!(session.membership().is_joined("6"));

    // One system-authored welcome message in the provisioned channel.
    let messages = session.chats().messages("6");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender_id, "system");
}

#[test]
fn direct_chats_from_either_side_meet_in_the_same_conversation() {
    let mut me = Session::new("me");
    me.load_groups(fixtures::catalog());
    let mut peer = Session::new("u7");
    peer.load_groups(fixtures::catalog());

    let mine = me
        .apply(
            Action::OpenDirectChat {
                target_user_id: "u7".to_string(),
            },
            at(0),
        )
        .unwrap();
    let theirs = peer
        .apply(
            Action::OpenDirectChat {
                target_user_id: "me".to_string(),
            },
            at(0),
        )
        .unwrap();

    let Notice::DirectChatReady { conversation_id: a } = &mine[0] else {
        panic!("expected conversation id");
    };
    let Notice::DirectChatReady { conversation_id: b } = &theirs[0] else {
        panic!("expected conversation id");
    };
    assert_eq!(a, b);
}
