//! Draw result model.

use crate::model::family::FamilyId;
use serde::{Deserialize, Serialize};

/// Units a single family has to bring, as produced by one draw.
///
/// `items` holds unit labels such as `"Soda (2)"`, in draw order. It may be
/// empty when families outnumber units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub family_id: FamilyId,
    pub family_name: String,
    pub items: Vec<String>,
}

impl Assignment {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
