use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::message::MessageRecord;
use crate::tracker::{Admission, MessageTracker};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Add { message: MessageRecord },
    Delete { id: String },
    Get { id: String },
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    fn ok(result: JsonValue) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(message.into()),
        }
    }
}

pub fn apply(tracker: &mut MessageTracker<MessageRecord>, command: Command) -> Reply {
    match command {
        Command::Add { message } => {
            let id = message.id.clone();
            let result = match tracker.add(message) {
                Admission::Stored => json!({ "id": id, "status": "stored" }),
                Admission::Evicted(oldest) => {
                    json!({ "id": id, "status": "stored", "evicted": oldest.id })
                }
                Admission::Duplicate(_) => json!({ "id": id, "status": "duplicate" }),
                Admission::Discarded(_) => json!({ "id": id, "status": "discarded" }),
            };
            Reply::ok(result)
        }
        Command::Delete { id } => match tracker.delete(&id) {
            Ok(message) => Reply::ok(json!({ "message": message })),
            Err(err) => Reply::error(err.to_string()),
        },
        Command::Get { id } => match tracker.message(&id) {
            Ok(message) => Reply::ok(json!({ "message": message })),
            Err(err) => Reply::error(err.to_string()),
        },
        Command::List => Reply::ok(json!({ "messages": tracker.messages() })),
    }
}

/// Parses and applies one line. Blank lines yield `None`.
pub fn handle_line(tracker: &mut MessageTracker<MessageRecord>, line: &str) -> Option<Reply> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let reply = match serde_json::from_str::<Command>(line) {
        Ok(command) => apply(tracker, command),
        Err(err) => {
            log::warn!("replay: rejecting malformed command: {}", err);
            Reply::error(format!("invalid command: {err}"))
        }
    };
    Some(reply)
}

/// Feeds every line of `input` through the tracker, writing one JSON reply
/// per command to `output`. Returns the number of commands handled.
///
/// Each line is one command object tagged by `op`:
///
/// ```text
/// {"op":"add","message":{"id":"m1","content":"hi"}}
/// {"op":"get","id":"m1"}
/// {"op":"delete","id":"m1"}
/// {"op":"list"}
/// ```
///
/// Bad lines yield an error reply and the run carries on.
pub fn replay<R: BufRead, W: Write>(
    tracker: &mut MessageTracker<MessageRecord>,
    input: R,
    mut output: W,
) -> io::Result<usize> {
    let mut handled = 0;
    for line in input.lines() {
        let line = line?;
        let Some(reply) = handle_line(tracker, &line) else {
            continue;
        };
        serde_json::to_writer(&mut output, &reply).map_err(io::Error::other)?;
        output.write_all(b"\n")?;
        handled += 1;
    }
    output.flush()?;
    log::debug!("replay: handled {} commands, {} messages tracked", handled, tracker.len());
    Ok(handled)
}
