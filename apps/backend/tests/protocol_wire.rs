//! Wire-format tests for the realtime protocol.

use jokenpo_backend::entities::matches::MatchStatus;
use jokenpo_backend::entities::plays::Choice;
use jokenpo_backend::entities::rooms::{GameMode, RoomStatus};
use jokenpo_backend::repos::matches::Match;
use jokenpo_backend::repos::plays::Play;
use jokenpo_backend::repos::results::RoundResult;
use jokenpo_backend::ws::protocol::{ClientMsg, PlayerSnapshot, RoomSnapshot, ServerMsg};
use time::OffsetDateTime;

fn sample_match() -> Match {
    Match {
        id: 5,
        room_id: 1,
        game_mode: GameMode::Extended,
        status: MatchStatus::Finished,
        winner_id: Some(10),
        loser_id: Some(20),
        is_draw: false,
        player1_score: 1,
        player2_score: 0,
        created_at: OffsetDateTime::UNIX_EPOCH,
        finished_at: Some(OffsetDateTime::UNIX_EPOCH),
    }
}

fn sample_play(player_id: i64, choice: Choice) -> Play {
    Play {
        id: 0,
        match_id: 5,
        player_id,
        choice,
        round_no: 1,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn inbound_commands_use_kebab_case_tags() {
    let cases = [
        (r#"{"type":"join-room","room_id":1,"user_id":10}"#, 1),
        (r#"{"type":"leave-room","room_id":2,"user_id":10}"#, 2),
        (r#"{"type":"player-ready","room_id":3,"user_id":10}"#, 3),
        (r#"{"type":"rematch","room_id":4,"user_id":10}"#, 4),
    ];
    for (raw, room_id) in cases {
        let msg: ClientMsg = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.room_id(), room_id);
    }
}

#[test]
fn choices_travel_in_screaming_snake_case() {
    let msg: ClientMsg =
        serde_json::from_str(r#"{"type":"make-play","room_id":1,"user_id":10,"choice":"SPOCK"}"#)
            .unwrap();
    assert_eq!(
        msg,
        ClientMsg::MakePlay {
            room_id: 1,
            user_id: 10,
            choice: Choice::Spock
        }
    );

    assert!(serde_json::from_str::<ClientMsg>(
        r#"{"type":"make-play","room_id":1,"user_id":10,"choice":"spock"}"#
    )
    .is_err());
}

#[test]
fn match_finished_nests_match_result_and_plays() {
    let result = RoundResult {
        id: 1,
        match_id: 5,
        winner_id: Some(10),
        loser_id: Some(20),
        is_draw: false,
        player1_choice: Choice::Lizard,
        player2_choice: Choice::Spock,
        player1_score: 1,
        player2_score: 0,
        round_no: 1,
        created_at: OffsetDateTime::UNIX_EPOCH,
    };
    let msg = ServerMsg::MatchFinished {
        game_match: sample_match(),
        result,
        plays: vec![
            sample_play(10, Choice::Lizard),
            sample_play(20, Choice::Spock),
        ],
    };

    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "match-finished");
    assert_eq!(json["match"]["id"], 5);
    assert_eq!(json["match"]["game_mode"], "EXTENDED");
    assert_eq!(json["match"]["status"], "FINISHED");
    assert_eq!(json["result"]["winner_id"], 10);
    assert_eq!(json["result"]["player1_choice"], "LIZARD");
    assert_eq!(json["plays"].as_array().unwrap().len(), 2);
}

#[test]
fn room_snapshots_merge_membership_and_readiness() {
    let msg = ServerMsg::RoomUpdated {
        room: RoomSnapshot {
            id: 1,
            invite_code: "ABC123".to_string(),
            game_mode: GameMode::Classic,
            status: RoomStatus::Ready,
            match_id: None,
            players: vec![
                PlayerSnapshot {
                    user_id: 10,
                    name: Some("Ana".to_string()),
                    ready: true,
                },
                PlayerSnapshot {
                    user_id: 20,
                    name: None,
                    ready: false,
                },
            ],
        },
    };

    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "room-updated");
    assert_eq!(json["room"]["status"], "READY");
    assert_eq!(json["room"]["players"][0]["ready"], true);
    assert_eq!(json["room"]["players"][1]["name"], serde_json::Value::Null);
}

#[test]
fn play_made_never_reveals_the_choice() {
    let json = serde_json::to_value(ServerMsg::PlayMade {
        player_id: 10,
        round_no: 1,
    })
    .unwrap();
    assert_eq!(json["type"], "play-made");
    assert!(json.get("choice").is_none());
}
