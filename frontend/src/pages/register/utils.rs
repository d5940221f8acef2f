use crate::api::{RegisterEmployeeRequest, Role};

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub username: String,
    pub full_name: String,
    pub national_id: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            full_name: String::new(),
            national_id: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::Employee,
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c.is_whitespace()
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        Some("La contraseña debe tener al menos 8 caracteres")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("La contraseña debe tener al menos una mayúscula")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("La contraseña debe tener al menos una minúscula")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("La contraseña debe tener al menos un número")
    } else if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        Some("La contraseña debe tener al menos un símbolo (!@#$%^&*...)")
    } else {
        None
    }
}

/// First failing check wins, in the order the form lists its fields.
pub fn validate_employee_form(form: &EmployeeForm) -> Result<RegisterEmployeeRequest, String> {
    let username = form.username.trim();
    let full_name = form.full_name.trim();
    let national_id = form.national_id.trim();
    let email = form.email.trim();

    if username.is_empty() {
        return Err("El nombre de usuario es obligatorio".into());
    }
    if full_name.is_empty() {
        return Err("El nombre completo es obligatorio".into());
    }
    if national_id.is_empty() {
        return Err("La cédula es obligatoria".into());
    }
    if email.is_empty() {
        return Err("El email es obligatorio (necesario para recuperar contraseña)".into());
    }
    if form.password.is_empty() {
        return Err("La contraseña es obligatoria".into());
    }
    if !full_name.chars().all(is_name_char) {
        return Err("El nombre completo solo puede contener letras y espacios".into());
    }
    if !(6..=12).contains(&national_id.len()) || !national_id.chars().all(|c| c.is_ascii_digit()) {
        return Err("La cédula debe contener solo números (6 a 12 dígitos)".into());
    }
    if !looks_like_email(email) {
        return Err("El email no tiene un formato válido (ej: ejemplo@dominio.com)".into());
    }
    if let Some(problem) = password_problem(&form.password) {
        return Err(problem.into());
    }
    if form.password != form.confirm_password {
        return Err("Las contraseñas no coinciden".into());
    }
    let squashed: String = full_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if username.to_lowercase() == squashed {
        return Err("El nombre de usuario no puede ser igual al nombre completo".into());
    }

    Ok(RegisterEmployeeRequest {
        username: username.to_string(),
        full_name: full_name.to_string(),
        national_id: national_id.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
        role: form.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EmployeeForm {
        EmployeeForm {
            username: "rquispe".into(),
            full_name: "Rosa Quispe".into(),
            national_id: "0102030405".into(),
            email: "rosa@sierra.test".into(),
            password: "Clave#2025".into(),
            confirm_password: "Clave#2025".into(),
            role: Role::Employee,
        }
    }

    fn error_for(edit: impl FnOnce(&mut EmployeeForm)) -> String {
        let mut form = valid();
        edit(&mut form);
        validate_employee_form(&form).unwrap_err()
    }

    #[test]
    fn valid_form_builds_request() {
        let request = validate_employee_form(&valid()).unwrap();
        assert_eq!(request.username, "rquispe");
        assert_eq!(request.role, Role::Employee);
    }

    #[test]
    fn all_fields_are_required() {
        assert_eq!(
            error_for(|f| f.username = " ".into()),
            "El nombre de usuario es obligatorio"
        );
        assert_eq!(error_for(|f| f.national_id.clear()), "La cédula es obligatoria");
        assert_eq!(error_for(|f| f.password.clear()), "La contraseña es obligatoria");
    }

    #[test]
    fn field_formats_are_checked() {
        assert_eq!(
            error_for(|f| f.full_name = "Rosa 2".into()),
            "El nombre completo solo puede contener letras y espacios"
        );
        assert!(error_for(|f| f.national_id = "12345".into()).starts_with("La cédula"));
        assert!(error_for(|f| f.national_id = "12345a7".into()).starts_with("La cédula"));
        assert!(error_for(|f| f.email = "rosa@sierra".into()).starts_with("El email"));
        assert!(validate_employee_form(&EmployeeForm {
            full_name: "Ñusta Álvarez".into(),
            ..valid()
        })
        .is_ok());
    }

    #[test]
    fn password_rules() {
        for weak in ["Cl#1", "clave#2025", "CLAVE#2025", "Clave#abcd", "Clave12025"] {
            let message = error_for(|f| {
                f.password = weak.into();
                f.confirm_password = weak.into();
            });
            assert!(message.starts_with("La contraseña"), "{}: {}", weak, message);
        }
    }

    #[test]
    fn passwords_must_match() {
        assert_eq!(
            error_for(|f| f.confirm_password = "Otra#2025".into()),
            "Las contraseñas no coinciden"
        );
    }

    #[test]
    fn username_differs_from_squashed_full_name() {
        assert_eq!(
            error_for(|f| f.username = "RosaQuispe".into()),
            "El nombre de usuario no puede ser igual al nombre completo"
        );
    }
}
