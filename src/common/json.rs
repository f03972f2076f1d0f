// src/common/json.rs

use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::common::error::AppError;

// Invólucro do extractor Json do axum: um corpo ausente, malformado ou com
// campo obrigatório faltando vira 400 com o corpo {"error": ...}, no lugar
// do 422 padrão do axum. Nas respostas, delega direto ao Json do axum.
#[derive(Debug)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(AppError::from)?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        #[allow(dead_code)]
        scheduled_at: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn corpo_sem_campo_obrigatorio_vira_400() {
        let err = Json::<Payload>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn corpo_malformado_vira_400() {
        let err = Json::<Payload>::from_request(json_request("{nao-e-json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn corpo_valido_extrai_normalmente() {
        let Json(payload) =
            Json::<Payload>::from_request(json_request(r#"{"scheduledAt":"x"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.scheduled_at, "x");
    }
}
