use crate::api::{Role, RoomUpdate};

pub const ROOM_STATES: [(&str, &str); 3] = [
    ("DISPONIBLE", "Disponible"),
    ("EN_LIMPIEZA", "En limpieza"),
    ("OCUPADA", "Ocupada"),
];

pub fn state_label(state: Option<&str>) -> &'static str {
    ROOM_STATES
        .iter()
        .find(|(wire, _)| Some(*wire) == state)
        .map(|(_, label)| *label)
        .unwrap_or("Sin estado")
}

pub fn state_badge_class(state: Option<&str>) -> &'static str {
    match state {
        Some("DISPONIBLE") => "badge bg-success",
        Some("EN_LIMPIEZA") => "badge bg-primary",
        Some("OCUPADA") => "badge bg-danger",
        _ => "badge bg-secondary",
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomForm {
    pub state: String,
    pub capacity: String,
    pub price: String,
    pub image_url: String,
}

/// Builds the patch body, keeping only what `role` may change.
pub fn build_room_update(form: &RoomForm, role: Role) -> Result<RoomUpdate, String> {
    if !ROOM_STATES.iter().any(|(wire, _)| *wire == form.state) {
        return Err("Selecciona un estado válido".into());
    }
    let mut update = RoomUpdate {
        state: Some(form.state.clone()),
        ..RoomUpdate::default()
    };
    if role.is_admin() {
        if !form.capacity.trim().is_empty() {
            let capacity = form
                .capacity
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or("La capacidad debe ser un número mayor a 0")?;
            update.capacity = Some(capacity);
        }
        if !form.price.trim().is_empty() {
            let price = form
                .price
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|price| *price > 0.0)
                .ok_or("El precio debe ser mayor a 0")?;
            update.price = Some(price);
        }
        let image_url = form.image_url.trim();
        if !image_url.is_empty() {
            update.image_url = Some(image_url.to_string());
        }
    }
    Ok(update.restricted_to(role))
}

pub fn validate_note(comment: &str) -> Result<String, String> {
    let comment = comment.trim();
    if comment.is_empty() {
        Err("La observación no puede estar vacía".into())
    } else {
        Ok(comment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RoomForm {
        RoomForm {
            state: "OCUPADA".into(),
            capacity: "3".into(),
            price: "45.5".into(),
            image_url: " https://img.test/1.jpg ".into(),
        }
    }

    #[test]
    fn employee_update_only_carries_state() {
        let update = build_room_update(&form(), Role::Employee).unwrap();
        assert_eq!(
            update,
            RoomUpdate {
                state: Some("OCUPADA".into()),
                ..RoomUpdate::default()
            }
        );
    }

    #[test]
    fn admin_update_carries_all_fields() {
        let update = build_room_update(&form(), Role::Admin).unwrap();
        assert_eq!(update.capacity, Some(3));
        assert_eq!(update.price, Some(45.5));
        assert_eq!(update.image_url.as_deref(), Some("https://img.test/1.jpg"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut bad = form();
        bad.state = "RESERVADA".into();
        assert!(build_room_update(&bad, Role::Employee).is_err());

        let mut bad = form();
        bad.price = "-1".into();
        assert!(build_room_update(&bad, Role::Admin).is_err());
        // employees never send the price, so its value does not matter
        assert!(build_room_update(&bad, Role::Employee).is_ok());
    }

    #[test]
    fn labels_and_badges() {
        assert_eq!(state_label(Some("EN_LIMPIEZA")), "En limpieza");
        assert_eq!(state_label(None), "Sin estado");
        assert_eq!(state_badge_class(Some("OCUPADA")), "badge bg-danger");
    }

    #[test]
    fn notes_are_trimmed() {
        assert_eq!(validate_note("  Toalla extra ").as_deref(), Ok("Toalla extra"));
        assert!(validate_note("   ").is_err());
    }
}
