use serde::{Deserialize, Serialize};

use crate::types::publisher::PublisherSummary;
use crate::types::user::JournalistSummary;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTarget {
    Journalist,
    Publisher,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RToggle {
    pub item_id: Option<i32>,
    pub item_type: Option<String>,
}

impl RToggle {
    pub fn target(&self) -> Option<(SubscriptionTarget, i32)> {
        let target = match self.item_type.as_deref()? {
            "journalist" => SubscriptionTarget::Journalist,
            "publisher" => SubscriptionTarget::Publisher,
            _ => return None,
        };
        Some((target, self.item_id?))
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ToggleRes {
    pub subscribed: bool,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct ManageSubscriptions {
    pub journalists: Vec<JournalistSummary>,
    pub publishers: Vec<PublisherSummary>,
}
