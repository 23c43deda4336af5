use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const CLIENT_NOT_FOUND: &str = "Cliente não encontrado!";
pub const CLIENT_DELETED: &str = "Cliente deletado com sucesso!";

/// Stored client row. `cpf` and `email` carry UNIQUE constraints in the table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub address: Option<String>,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub date_added: Option<NaiveDate>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ClientPayload {
    pub name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub address: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_added: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub address: Option<String>,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub date_added: Option<NaiveDate>,
}

impl ClientPayload {
    pub fn validate(self) -> AppResult<NewClient> {
        let name = self.name.ok_or_else(|| AppError::missing_field("name"))?;
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("O campo name não pode ser vazio".to_string()));
        }

        Ok(NewClient {
            name,
            birthdate: self.birthdate,
            address: self.address,
            cpf: self.cpf.ok_or_else(|| AppError::missing_field("cpf"))?,
            phone: self.phone.ok_or_else(|| AppError::missing_field("phone"))?,
            email: self.email.ok_or_else(|| AppError::missing_field("email"))?,
            date_added: self.date_added,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full() -> serde_json::Value {
        json!({
            "name": "Maria Silva",
            "birthdate": "1990-05-17",
            "address": "Rua das Flores, 10",
            "cpf": "12345678901",
            "phone": "11999990000",
            "email": "maria@example.com",
            "date_added": "2024-01-02",
        })
    }

    #[test]
    fn validate_accepts_full_payload() {
        let payload: ClientPayload = serde_json::from_value(full()).unwrap();
        let new = payload.validate().unwrap();
        assert_eq!(new.cpf, "12345678901");
        assert_eq!(new.birthdate, NaiveDate::from_ymd_opt(1990, 5, 17));
    }

    #[test]
    fn each_required_field_is_checked() {
        for field in ["name", "cpf", "phone", "email"] {
            let mut value = full();
            value.as_object_mut().unwrap().remove(field);
            let payload: ClientPayload = serde_json::from_value(value).unwrap();
            let err = payload.validate().unwrap_err();
            assert!(
                matches!(err, AppError::BadRequest(ref msg) if msg.contains(field)),
                "missing {} should be reported",
                field
            );
        }
    }

    #[test]
    fn serializes_dates_as_iso_strings() {
        let client = Client {
            id: 1,
            name: "Maria".to_string(),
            birthdate: NaiveDate::from_ymd_opt(1990, 5, 17),
            address: None,
            cpf: "12345678901".to_string(),
            phone: "11999990000".to_string(),
            email: "maria@example.com".to_string(),
            date_added: None,
        };
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["birthdate"], "1990-05-17");
        assert_eq!(value["date_added"], serde_json::Value::Null);
        assert_eq!(value["address"], serde_json::Value::Null);
    }
}
