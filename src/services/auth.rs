// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CarRepository, RoleRepository, UserClientRepository},
    models::{
        auth::{Claims, CurrentUser, RoleName, UserClient},
        car::Car,
    },
    services::email::{self, EmailService},
};

const TOKEN_EXPIRATION_HOURS: i64 = 24;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

// Limite do loop de geração de placas. Sem limite, uma taxa patológica de
// colisões viraria um loop infinito dentro da transação de registro.
const PLATE_MAX_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserClientRepository,
    role_repo: RoleRepository,
    car_repo: CarRepository,
    email_service: EmailService,
    jwt_secret: String,
    base_url: String,
    pool: PgPool,
}

impl AuthService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: UserClientRepository,
        role_repo: RoleRepository,
        car_repo: CarRepository,
        email_service: EmailService,
        jwt_secret: String,
        base_url: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            car_repo,
            email_service,
            jwt_secret,
            base_url,
            pool,
        }
    }

    // Registro: conta + carro padrão numa única transação (tudo ou nada).
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, UserClient, Car), AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 2. Resolve o papel "client" (seed garante a existência no startup)
        let client_role = self
            .role_repo
            .find_by_name(RoleName::Client)
            .await?
            .ok_or(AppError::RoleMissing("client"))?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 3. Cria a conta com valores padrão de perfil.
        // A violação de e-mail único vira EmailAlreadyExists no repositório,
        // e o rollback acontece sozinho no drop da tx.
        let new_user = self
            .user_repo
            .create(
                &mut *tx,
                email,
                &hashed_password,
                "Nome padrão",
                "Sobrenome padrão",
                Some("0123456789"),
                Some("Endereço padrão"),
                client_role.id,
            )
            .await?;

        // 4. Gera uma placa livre para o carro padrão, com limite de tentativas
        let mut plate: Option<String> = None;
        for _ in 0..PLATE_MAX_ATTEMPTS {
            let candidate = generate_license_plate();
            if !self
                .car_repo
                .license_plate_exists(&mut *tx, &candidate)
                .await?
            {
                plate = Some(candidate);
                break;
            }
        }
        let plate = plate.ok_or(AppError::PlateGenerationExhausted)?;

        // 5. Cria o carro padrão na MESMA transação
        let new_car = self
            .car_repo
            .create(&mut *tx, "Marca padrão", "Modelo padrão", 2020, &plate, new_user.id)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        // 6. Gera o token de sessão
        let token = create_token(&self.jwt_secret, new_user.id, &new_user.email)?;
        Ok((token, new_user, new_car))
    }

    // Login: conta inexistente e senha errada produzem EXATAMENTE o mesmo
    // erro, para não vazar quais e-mails estão cadastrados.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, UserClient), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação bcrypt numa thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = create_token(&self.jwt_secret, user.id, &user.email)?;
        Ok((token, user))
    }

    // Valida o token E re-resolve a conta no banco: um token assinado para
    // uma conta já apagada não autentica ninguém.
    pub async fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let role = self
            .role_repo
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("papel {} referenciado não existe", user.role_id))?;

        Ok(CurrentUser {
            user,
            role: role.name,
        })
    }

    // Esqueci minha senha: responde Ok mesmo para e-mail desconhecido, para
    // não revelar quais contas existem. Se o envio do e-mail falhar, o token
    // persistido continua válido para uma nova tentativa.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            tracing::debug!("forgot-password para e-mail desconhecido, respondendo 200");
            return Ok(());
        };

        let reset_token = generate_reset_token();
        let expires = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        self.user_repo
            .set_reset_token(user.id, &reset_token, expires)
            .await?;

        let reset_url = format!("{}/reset-password?token={}", self.base_url, reset_token);
        let html = email::password_reset_html(&user.name, &reset_url);
        self.email_service
            .send(&user.email, "Redefinição de senha", &html)
            .await?;

        Ok(())
    }

    // Uso único: a senha é gravada e o token limpo num único UPDATE.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_reset_token(token)
            .await?
            .ok_or(AppError::InvalidResetToken)?;

        if !reset_token_usable(user.reset_password_expires, Utc::now()) {
            return Err(AppError::InvalidResetToken);
        }

        let password_clone = new_password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .update_password_and_clear_token(user.id, &hashed_password)
            .await?;

        Ok(())
    }
}

// ---
// Funções puras do serviço de token (testáveis sem banco)
// ---

pub fn create_token(jwt_secret: &str, user_id: Uuid, email: &str) -> Result<String, AppError> {
    create_token_at(jwt_secret, user_id, email, Utc::now())
}

// Recebe o "agora" como argumento para os testes controlarem o relógio.
fn create_token_at(
    jwt_secret: &str,
    user_id: Uuid,
    email: &str,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let expires_at = now + Duration::hours(TOKEN_EXPIRATION_HOURS);

    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

// Distingue expiração de malformação: o cliente recebe mensagens diferentes,
// mas ambas mapeiam para 401.
pub fn decode_token(jwt_secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })
}

// A janela de validade do token de redefinição: sem validade registrada
// não há token utilizável, e a expiração é estrita (now == expires já falha).
pub fn reset_token_usable(expires: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(expires, Some(expires) if now < expires)
}

// 32 bytes aleatórios (256 bits de entropia) em hex: inadivinhável.
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

// Placa no formato "AB-123-CD" para o carro padrão do registro.
pub fn generate_license_plate() -> String {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::rng();
    let letters: Vec<char> = (0..4)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect();
    let digits: u16 = rng.random_range(0..1000);

    format!(
        "{}{}-{:03}-{}{}",
        letters[0], letters[1], digits, letters[2], letters[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn token_roundtrip_preserva_id_e_email() {
        let id = Uuid::new_v4();
        let token = create_token(SECRET, id, "a@x.com").unwrap();
        let claims = decode_token(SECRET, &token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_expirado_falha_com_token_expired() {
        // Emitido 48h no passado: expirou há 24h, bem além do leeway.
        let past = Utc::now() - Duration::hours(48);
        let token = create_token_at(SECRET, Uuid::new_v4(), "a@x.com", past).unwrap();

        let err = decode_token(SECRET, &token).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn token_malformado_falha_com_invalid_token() {
        let err = decode_token(SECRET, "isto.nao.e-um-jwt").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn token_com_segredo_errado_falha_com_invalid_token() {
        let token = create_token(SECRET, Uuid::new_v4(), "a@x.com").unwrap();
        let err = decode_token("outro-segredo", &token).unwrap_err();
        // Assinatura inválida NÃO é expiração.
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn janela_do_reset_token_e_respeitada() {
        let now = Utc::now();

        // Dentro da validade: utilizável.
        assert!(reset_token_usable(Some(now + Duration::minutes(30)), now));

        // Expirado (mesmo que por pouco): inutilizável.
        assert!(!reset_token_usable(Some(now - Duration::seconds(1)), now));
        assert!(!reset_token_usable(Some(now), now));

        // Conta sem validade registrada nunca tem token utilizável.
        assert!(!reset_token_usable(None, now));
    }

    #[test]
    fn reset_token_tem_256_bits_em_hex() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        // Dois tokens consecutivos nunca colidem na prática.
        assert_ne!(token, generate_reset_token());
    }

    #[test]
    fn placa_gerada_tem_o_formato_esperado() {
        for _ in 0..50 {
            let plate = generate_license_plate();
            let parts: Vec<&str> = plate.split('-').collect();
            assert_eq!(parts.len(), 3, "placa fora do formato: {}", plate);
            assert!(parts[0].len() == 2 && parts[0].chars().all(|c| c.is_ascii_uppercase()));
            assert!(parts[1].len() == 3 && parts[1].chars().all(|c| c.is_ascii_digit()));
            assert!(parts[2].len() == 2 && parts[2].chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}
