use std::io::Cursor;

use message_tracker::replay::{apply, handle_line, replay, Command, Reply};
use message_tracker::{MessageRecord, MessageTracker};

fn replies(output: &[u8]) -> Vec<Reply> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).expect("reply json"))
        .collect()
}

#[test]
fn parses_tagged_commands() {
    let cmd: Command = serde_json::from_str(r#"{"op":"get","id":"m1"}"#).unwrap();
    assert_eq!(cmd, Command::Get { id: "m1".into() });

    let cmd: Command = serde_json::from_str(r#"{"op":"list"}"#).unwrap();
    assert_eq!(cmd, Command::List);

    let cmd: Command =
        serde_json::from_str(r#"{"op":"add","message":{"id":"m2","content":"hi"}}"#).unwrap();
    assert_eq!(
        cmd,
        Command::Add {
            message: MessageRecord::new("m2", "hi")
        }
    );
}

#[test]
fn add_reports_eviction_and_duplicates() {
    let mut tracker = MessageTracker::new(1);
    let first = apply(
        &mut tracker,
        Command::Add {
            message: MessageRecord::new("a", ""),
        },
    );
    assert_eq!(first.result.unwrap()["status"], "stored");

    let second = apply(
        &mut tracker,
        Command::Add {
            message: MessageRecord::new("b", ""),
        },
    );
    let result = second.result.unwrap();
    assert_eq!(result["status"], "stored");
    assert_eq!(result["evicted"], "a");

    let dup = apply(
        &mut tracker,
        Command::Add {
            message: MessageRecord::new("b", "other"),
        },
    );
    assert_eq!(dup.result.unwrap()["status"], "duplicate");
}

#[test]
fn missing_ids_yield_not_found() {
    let mut tracker = MessageTracker::new(2);
    let reply = apply(&mut tracker, Command::Delete { id: "nope".into() });
    assert!(!reply.ok);
    assert_eq!(reply.error.as_deref(), Some("message not found"));

    let reply = apply(&mut tracker, Command::Get { id: "nope".into() });
    assert_eq!(reply.error.as_deref(), Some("message not found"));
}

#[test]
fn malformed_and_blank_lines() {
    let mut tracker = MessageTracker::new(2);
    assert!(handle_line(&mut tracker, "   ").is_none());

    let reply = handle_line(&mut tracker, r#"{"op":"explode"}"#).expect("reply");
    assert!(!reply.ok);
    assert!(reply.error.unwrap().starts_with("invalid command"));
}

#[test]
fn replays_capacity_two_scenario() {
    let input = r#"
{"op":"add","message":{"id":"a"}}
{"op":"add","message":{"id":"b"}}
{"op":"add","message":{"id":"c"}}
{"op":"add","message":{"id":"b","content":"ignored"}}
{"op":"delete","id":"b"}
{"op":"get","id":"a"}
not json
{"op":"list"}
"#;
    let mut tracker = MessageTracker::new(2);
    let mut output = Vec::new();
    let handled = replay(&mut tracker, Cursor::new(input), &mut output).unwrap();
    assert_eq!(handled, 8);

    let replies = replies(&output);
    assert_eq!(replies.len(), 8);
    assert_eq!(replies[2].result.as_ref().unwrap()["evicted"], "a");
    assert_eq!(replies[3].result.as_ref().unwrap()["status"], "duplicate");
    assert_eq!(replies[4].result.as_ref().unwrap()["message"]["id"], "b");
    assert!(!replies[5].ok);
    assert!(!replies[6].ok);

    let listed = &replies[7].result.as_ref().unwrap()["messages"];
    let ids: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["c"]);
}
