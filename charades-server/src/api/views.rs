//! JSON views shared by the item and session endpoints

use charades_common::{Item, ItemKey};
use serde::Serialize;

/// One row of the reveal panel
#[derive(Debug, Clone, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Serialized item: the catalog fields plus its composite key and reveal rows
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub key: ItemKey,
    #[serde(flatten)]
    pub item: Item,
    pub reveal: Vec<DetailRow>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            key: item.key(),
            item: item.clone(),
            reveal: item
                .reveal_details()
                .into_iter()
                .map(|(label, value)| DetailRow { label, value })
                .collect(),
        }
    }
}
