use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Anything a [`MessageTracker`](crate::tracker::MessageTracker) can hold.
///
/// The id is the only thing the tracker looks at. It must stay the same for
/// as long as the value is tracked.
pub trait Tracked {
    fn id(&self) -> &str;
}

impl<T: Tracked + ?Sized> Tracked for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T: Tracked + ?Sized> Tracked for std::sync::Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T: Tracked + ?Sized> Tracked for std::rc::Rc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<JsonValue>,
}

impl MessageRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: String::new(),
            destination: String::new(),
            content: content.into(),
            timestamp: 0,
            fields: None,
        }
    }
}

impl Tracked for MessageRecord {
    fn id(&self) -> &str {
        &self.id
    }
}
