// src/models/auth.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::common::{dates, lenient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Comum,
    Gestor,
    Administrador,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Comum => "Comum",
            UserRole::Gestor => "Gestor",
            UserRole::Administrador => "Administrador",
        }
    }
}

// Papel desconhecido ou ausente vira `comum`: nunca concede privilégio por engano.
fn role<'de, D>(deserializer: D) -> Result<UserRole, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "administrador" => UserRole::Administrador,
            "gestor" => UserRole::Gestor,
            _ => UserRole::Comum,
        },
        _ => UserRole::Comum,
    })
}

// Representa um usuário como o backend devolve (a senha nunca volta).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "role")]
    pub role: UserRole,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Administrador
    }

    pub fn role_label(&self) -> &'static str {
        self.role.label()
    }

    /// Iniciais do primeiro e do último nome ("Maria da Silva" -> "MS").
    pub fn initials(&self) -> String {
        let names: Vec<&str> = self.full_name.split_whitespace().collect();
        let initials: String = match names.as_slice() {
            [] => String::new(),
            [only] => only.chars().take(2).collect(),
            [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
        };
        initials.to_uppercase()
    }

    pub fn formatted_created_at(&self) -> String {
        format_day(self.created_at.as_deref())
    }

    pub fn formatted_updated_at(&self) -> String {
        format_day(self.updated_at.as_deref())
    }
}

fn format_day(raw: Option<&str>) -> String {
    raw.and_then(dates::parse_date)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

// Dados do formulário de login
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "O e-mail é obrigatório."),
        email(message = "O e-mail fornecido é inválido.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    // Corpo `application/x-www-form-urlencoded` do fluxo OAuth2 "password"
    pub fn as_form(&self) -> [(&'static str, &str); 3] {
        [
            ("username", self.email.as_str()),
            ("password", self.password.as_str()),
            ("grant_type", "password"),
        ]
    }
}

// Resposta de `POST /auth/token`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    // Algumas versões do backend não devolvem o usuário junto com o token
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// Dados para criação de usuário (`POST /users/` e `POST /auth/register`)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UserCreate {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "O nome completo é obrigatório."))]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

// Atualização parcial: campos `None` não são enviados
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}
