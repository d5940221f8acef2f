use chrono::NaiveDate;

use crate::api::NewReservation;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationForm {
    pub first_names: String,
    pub last_names: String,
    pub national_id: String,
    pub entry: String,
    pub exit: String,
    pub companions: u32,
    pub room_id: Option<i64>,
}

fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Checks run before the reservation is sent, in the order the form shows them.
pub fn build_new_reservation(form: &ReservationForm) -> Result<NewReservation, String> {
    let first_names = form.first_names.trim();
    let last_names = form.last_names.trim();
    let national_id = form.national_id.trim();
    if first_names.is_empty() || last_names.is_empty() || national_id.is_empty() {
        return Err("Completa los datos del huésped".into());
    }

    let (Some(entry), Some(exit)) = (parse_form_date(&form.entry), parse_form_date(&form.exit))
    else {
        return Err("Selecciona fechas de ingreso y salida".into());
    };
    if exit <= entry {
        return Err("La fecha de salida debe ser posterior a la de ingreso".into());
    }

    let room_id = form
        .room_id
        .ok_or("Selecciona una habitación disponible")?;

    Ok(NewReservation {
        first_names: first_names.to_string(),
        last_names: last_names.to_string(),
        national_id: national_id.to_string(),
        entry,
        exit,
        companions: form.companions,
        room_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReservationForm {
        ReservationForm {
            first_names: " Ana ".into(),
            last_names: "Quispe".into(),
            national_id: "0102030405".into(),
            entry: "2025-05-01".into(),
            exit: "2025-05-03".into(),
            companions: 2,
            room_id: Some(7),
        }
    }

    #[test]
    fn complete_form_builds_reservation() {
        let reservation = build_new_reservation(&filled()).unwrap();
        assert_eq!(reservation.first_names, "Ana");
        assert_eq!(reservation.room_id, 7);
        assert_eq!(reservation.companions, 2);
        assert_eq!(reservation.exit.to_string(), "2025-05-03");
    }

    #[test]
    fn guest_data_is_required() {
        let mut form = filled();
        form.national_id = "  ".into();
        assert_eq!(
            build_new_reservation(&form).unwrap_err(),
            "Completa los datos del huésped"
        );
    }

    #[test]
    fn exit_must_follow_entry() {
        let mut form = filled();
        form.exit = form.entry.clone();
        assert_eq!(
            build_new_reservation(&form).unwrap_err(),
            "La fecha de salida debe ser posterior a la de ingreso"
        );
        form.exit = String::new();
        assert_eq!(
            build_new_reservation(&form).unwrap_err(),
            "Selecciona fechas de ingreso y salida"
        );
    }

    #[test]
    fn room_is_required() {
        let mut form = filled();
        form.room_id = None;
        assert!(build_new_reservation(&form).is_err());
    }
}
