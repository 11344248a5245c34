//! Translation rows and the owner identity they hang off.

use serde::{Deserialize, Serialize};

/// Polymorphic reference to the record that owns a set of translations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub owner_type: String,
    pub owner_id: i64,
}

impl OwnerRef {
    pub fn new(owner_type: impl Into<String>, owner_id: i64) -> Self {
        Self {
            owner_type: owner_type.into(),
            owner_id,
        }
    }
}

/// One persisted translation: the value of `key` in `locale` for an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TranslationRow {
    pub id: i64,
    pub translatable_type: String,
    pub translatable_id: i64,
    pub key: String,
    pub locale: String,
    pub value: Option<String>,
}

impl TranslationRow {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.translatable_type.clone(), self.translatable_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> TranslationRow {
        TranslationRow {
            id: 7,
            translatable_type: "post".to_string(),
            translatable_id: 42,
            key: "title".to_string(),
            locale: "en".to_string(),
            value: Some("Hello".to_string()),
        }
    }

    #[test]
    fn test_row_owner() {
        assert_eq!(row().owner(), OwnerRef::new("post", 42));
    }

    #[test]
    fn test_row_serializes() {
        let json = serde_json::to_value(row()).expect("serialize");
        assert_eq!(json["key"], "title");
        assert_eq!(json["value"], "Hello");
    }
}
