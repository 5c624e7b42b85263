use serde::{Deserialize, Serialize};

use crate::lenient;

/// A physical site of the institution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headquarters {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub department: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_headquarters() {
        let hq: Headquarters = serde_json::from_str(
            r#"{"id": "2", "name": "North campus", "address": "Cra 5 #10-20", "city": null}"#,
        )
        .unwrap();
        assert_eq!(hq.id, "2");
        assert_eq!(hq.name, "North campus");
        assert_eq!(hq.address.as_deref(), Some("Cra 5 #10-20"));
        assert_eq!(hq.city, None);
        assert_eq!(hq.department, None);
    }
}
