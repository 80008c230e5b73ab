use crate::{id::UserId, imei::ImeiSelection};

/// A user record as returned by the backend
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub imei: ImeiSelection,
}

impl User {
    pub fn same_id(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mongo_style_id() {
        // Arrange
        let input = r#"{"_id":"65f1","name":"Ann","email":"ann@clinic.com","imei":["111","222"],"createdAt":"2024-01-01T00:00:00Z"}"#;

        // Act
        let actual: User = serde_json::from_str(input).unwrap();

        // Assert
        assert_eq!(actual.id.as_ref(), "65f1");
        assert_eq!(actual.name, "Ann");
        assert_eq!(actual.imei.as_slice().len(), 2);
    }

    #[test]
    fn missing_imei_is_none() {
        let actual: User = serde_json::from_str(r#"{"id":"7","name":"Bo","email":"b@c.d"}"#).unwrap();
        assert!(actual.imei.is_empty());
    }
}
