use serde::{Deserialize, Serialize};

/// One row in a Dashing list widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub label: String,
    pub value: String,
}

impl ListItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Body for a list widget. `items` are in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPayload {
    pub auth_token: String,
    pub title: String,
    pub items: Vec<ListItem>,
}

/// Body for a text widget (title line plus "more info" footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub auth_token: String,
    pub text: String,
    pub moreinfo: String,
}

/// Either payload shape. Serializes as the bare inner object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    List(WidgetPayload),
    Notification(NotificationPayload),
}

impl From<WidgetPayload> for Payload {
    fn from(p: WidgetPayload) -> Self {
        Payload::List(p)
    }
}

impl From<NotificationPayload> for Payload {
    fn from(p: NotificationPayload) -> Self {
        Payload::Notification(p)
    }
}

/// A payload bound to the widget it is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub widget: String,
    pub payload: Payload,
}

impl Delivery {
    pub fn new(widget: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            widget: widget.into(),
            payload: payload.into(),
        }
    }
}
