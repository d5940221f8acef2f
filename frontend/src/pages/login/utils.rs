#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: leptos::RwSignal<String>,
    pub password: leptos::RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: leptos::create_rw_signal(String::new()),
            password: leptos::create_rw_signal(String::new()),
        }
    }
}

/// Returns the trimmed username on success.
pub fn validate_credentials(username: &str, password: &str) -> Result<String, String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Ingresa tu nombre de usuario".into());
    }
    if password.is_empty() {
        return Err("Ingresa tu contraseña".into());
    }
    Ok(username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(
            validate_credentials("  recepcion ", "x").as_deref(),
            Ok("recepcion")
        );
    }

    #[test]
    fn both_fields_are_required() {
        assert!(validate_credentials("   ", "secret").is_err());
        assert!(validate_credentials("admin", "").is_err());
    }

    #[test]
    fn password_is_not_trimmed_away() {
        assert!(validate_credentials("admin", " ").is_ok());
    }
}
