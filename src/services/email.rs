// src/services/email.rs

use serde_json::{json, Value};
use std::time::Duration;

use crate::common::error::AppError;

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

// Serviço de e-mail transacional via API HTTP da Brevo.
// A chave de API é opcional no startup: só o caminho de envio precisa dela.
#[derive(Clone)]
pub struct EmailService {
    client: reqwest::Client,
    api_key: Option<String>,
    sender_email: String,
    sender_name: String,
}

impl EmailService {
    pub fn new(api_key: Option<String>, sender_email: String, sender_name: String) -> Self {
        // Timeout limitado: um provedor lento não pode segurar uma resposta
        // de agendamento indefinidamente.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Falha ao construir o cliente HTTP de e-mail");

        Self {
            client,
            api_key,
            sender_email,
            sender_name,
        }
    }

    // Monta o corpo que a API transacional da Brevo espera.
    fn build_payload(&self, to_email: &str, subject: &str, html: &str) -> Value {
        json!({
            "sender": { "name": self.sender_name, "email": self.sender_email },
            "to": [{ "email": to_email }],
            "subject": subject,
            "htmlContent": html,
        })
    }

    pub async fn send(&self, to_email: &str, subject: &str, html: &str) -> Result<(), AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::EmailDispatch("BREVO_API_KEY não configurada".into()))?;

        let payload = self.build_payload(to_email, subject, html);

        let response = self
            .client
            .post(BREVO_ENDPOINT)
            .header("api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::EmailDispatch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::EmailDispatch(format!(
                "Brevo respondeu {}: {}",
                status, body
            )));
        }

        tracing::info!("📧 E-mail enviado para {}", to_email);
        Ok(())
    }
}

// ---
// Templates (HTML simples, como o time sempre fez)
// ---

pub fn password_reset_html(name: &str, reset_url: &str) -> String {
    format!(
        r#"<h1>Redefinição da sua senha</h1>
<p>Olá {name},</p>
<p>Clique no link abaixo para redefinir sua senha:</p>
<a href="{reset_url}">Redefinir minha senha</a>
<p>Este link expira em uma hora.</p>"#
    )
}

pub fn appointment_confirmation_html(
    name: &str,
    scheduled_at_human: &str,
    status: &str,
    garage_name: &str,
    service_name: &str,
    specific_service_name: &str,
) -> String {
    format!(
        r#"<h1>Agendamento recebido</h1>
<p>Olá {name},</p>
<p>Seu agendamento foi registrado com os seguintes dados:</p>
<ul>
  <li><strong>Data e hora:</strong> {scheduled_at_human}</li>
  <li><strong>Status:</strong> {status}</li>
  <li><strong>Garagem:</strong> {garage_name}</li>
  <li><strong>Serviço:</strong> {service_name}</li>
  <li><strong>Serviço específico:</strong> {specific_service_name}</li>
</ul>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_da_brevo_tem_o_formato_esperado() {
        let service = EmailService::new(
            Some("chave".into()),
            "contato@mecafixpro.com".into(),
            "MecaFixPro".into(),
        );
        let payload = service.build_payload("a@x.com", "Assunto", "<p>oi</p>");

        assert_eq!(payload["sender"]["email"], "contato@mecafixpro.com");
        assert_eq!(payload["to"][0]["email"], "a@x.com");
        assert_eq!(payload["subject"], "Assunto");
        assert_eq!(payload["htmlContent"], "<p>oi</p>");
    }

    #[tokio::test]
    async fn envio_sem_chave_falha_com_erro_de_dispatch() {
        let service = EmailService::new(None, "contato@mecafixpro.com".into(), "MecaFixPro".into());
        let result = service.send("a@x.com", "Assunto", "<p>oi</p>").await;
        assert!(matches!(result, Err(AppError::EmailDispatch(_))));
    }

    #[test]
    fn confirmacao_de_agendamento_inclui_todos_os_dados() {
        let html = appointment_confirmation_html(
            "Ana",
            "01/09/2026 às 14:30",
            "pending",
            "Garagem Central",
            "Revisão",
            "Troca de óleo",
        );
        for fragment in [
            "Ana",
            "01/09/2026 às 14:30",
            "pending",
            "Garagem Central",
            "Revisão",
            "Troca de óleo",
        ] {
            assert!(html.contains(fragment), "faltou '{}' no template", fragment);
        }
    }
}
