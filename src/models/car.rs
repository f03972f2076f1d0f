// src/models/car.rs

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 1886 é o ano do primeiro automóvel; nada anterior a isso faz sentido.
pub fn validate_car_year(year: i32) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    if year < 1886 || year > current_year {
        let mut err = ValidationError::new("range");
        err.message = Some("O ano deve estar entre 1886 e o ano atual.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub make: String,
    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: String,
    #[validate(custom(function = validate_car_year))]
    pub year: i32,
    #[validate(length(min = 1, message = "A placa é obrigatória."))]
    pub license_plate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ano_do_carro_respeita_os_limites() {
        assert!(validate_car_year(1885).is_err());
        assert!(validate_car_year(1886).is_ok());
        assert!(validate_car_year(2020).is_ok());
        assert!(validate_car_year(Utc::now().year() + 1).is_err());
    }

    // O derive passa o campo por valor; o payload completo precisa acionar
    // a mesma checagem de ano.
    #[test]
    fn payload_de_carro_rejeita_ano_invalido() {
        let payload = CarPayload {
            make: "Fiat".into(),
            model: "Uno".into(),
            year: 1700,
            license_plate: "AB-123-CD".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("year"));

        let payload = CarPayload {
            make: "Fiat".into(),
            model: "Uno".into(),
            year: 2020,
            license_plate: "AB-123-CD".into(),
        };
        assert!(payload.validate().is_ok());
    }
}
