use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct AdminIndex {
    pub users: u64,
    pub publishers: u64,
    pub articles: u64,
    pub articles_by_status: BTreeMap<String, u64>,
}
