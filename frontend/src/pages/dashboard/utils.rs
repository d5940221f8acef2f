use chrono::NaiveDate;

use crate::api::Reservation;

/// Reservations whose stay covers `day`. Rows with unreadable dates are left out.
pub fn reservations_active_on(reservations: &[Reservation], day: NaiveDate) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|reservation| reservation.is_active_on(day))
        .cloned()
        .collect()
}

pub fn parse_day_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: i64, entry: &str, exit: &str) -> Reservation {
        Reservation {
            id,
            entry: entry.into(),
            exit: exit.into(),
            companions: None,
            room_total: None,
            room: None,
            guest: None,
        }
    }

    fn day(raw: &str) -> NaiveDate {
        parse_day_input(raw).unwrap()
    }

    #[test]
    fn stay_bounds_are_inclusive() {
        let all = vec![reservation(1, "2025-03-10", "2025-03-12")];
        assert_eq!(reservations_active_on(&all, day("2025-03-10")).len(), 1);
        assert_eq!(reservations_active_on(&all, day("2025-03-12")).len(), 1);
        assert!(reservations_active_on(&all, day("2025-03-09")).is_empty());
        assert!(reservations_active_on(&all, day("2025-03-13")).is_empty());
    }

    #[test]
    fn time_part_is_ignored() {
        let all = vec![reservation(1, "2025-03-10T23:59:00", "2025-03-11T00:00:01Z")];
        let active = reservations_active_on(&all, day("2025-03-11"));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn unreadable_dates_are_excluded() {
        let all = vec![
            reservation(1, "mañana", "2025-03-12"),
            reservation(2, "2025-03-10", ""),
            reservation(3, "2025-03-01", "2025-03-31"),
        ];
        let active = reservations_active_on(&all, day("2025-03-11"));
        assert_eq!(active.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn day_input_requires_iso_date() {
        assert_eq!(parse_day_input(" 2025-01-31 "), Some(day("2025-01-31")));
        assert!(parse_day_input("31/01/2025").is_none());
    }
}
