//! CSV export of registration lists.
//!
//! Produces the participant list handed to instructors: one header line
//! plus one row per registration, every field double-quoted and embedded
//! quotes doubled, dates in DD.MM.YYYY form.

use chrono::NaiveDate;

use crate::models::Registration;

/// Column headers of the participant list, in order.
pub const CSV_HEADERS: [&str; 11] = [
    "Vorname",
    "Nachname",
    "Email",
    "Telefon",
    "Klasse",
    "AHV-Nummer",
    "Geburtsdatum",
    "Eltern",
    "Kontakt Eltern",
    "Bemerkungen",
    "Anmeldedatum",
];

/// Renders registrations as CSV, header line included.
///
/// Rows follow the order of the input slice; callers pass registrations
/// sorted by registration date.
pub fn registrations_to_csv(registrations: &[Registration]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADERS.join(","));
    out.push('\n');

    for reg in registrations {
        let birth_date = reg.birth_date.map(format_date).unwrap_or_default();
        let registered = format_date(reg.registered_at.date_naive());

        let row = [
            quote(&reg.first_name),
            quote(&reg.last_name),
            quote(&reg.email),
            quote(&reg.phone),
            quote(&reg.class),
            quote(reg.ahv_number.as_deref().unwrap_or("")),
            quote(&birth_date),
            quote(&reg.parent_name),
            quote(&reg.parent_contact),
            quote(reg.comments.as_deref().unwrap_or("")),
            quote(&registered),
        ];

        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// File name offered for a course's participant list download.
pub fn csv_file_name(course_title: &str) -> String {
    format!("{}_teilnehmer.csv", course_title)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_registration(comments: Option<&str>) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            first_name: "Anna".to_string(),
            last_name: "Muster".to_string(),
            email: "anna@example.com".to_string(),
            phone: "079 123 45 67".to_string(),
            class: "5a".to_string(),
            ahv_number: Some("756.1234.5678.97".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2014, 3, 9),
            parent_name: "Beat Muster".to_string(),
            parent_contact: "beat@example.com".to_string(),
            comments: comments.map(|c| c.to_string()),
            status: RegistrationStatus::Pending,
            registered_at: Utc::now(),
            attendance: vec![],
        }
    }

    #[test]
    fn test_header_only_for_empty_list() {
        let csv = registrations_to_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Vorname,Nachname,Email"));
    }

    #[test]
    fn test_n_plus_one_lines() {
        let regs = vec![
            sample_registration(None),
            sample_registration(Some("kommt später")),
            sample_registration(None),
        ];
        let csv = registrations_to_csv(&regs);
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_every_field_is_quoted() {
        let csv = registrations_to_csv(&[sample_registration(None)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Anna\",\"Muster\""));
        // 11 quoted fields per row
        assert_eq!(row.matches("\",\"").count(), 10);
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = registrations_to_csv(&[sample_registration(Some(r#"sagt "vielleicht""#))]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#""sagt ""vielleicht""""#));

        // The doubled quotes must not change the column count: splitting on
        // the quote-comma-quote separator still yields 11 columns.
        let columns = row.split("\",\"").count();
        assert_eq!(columns, 11);
    }

    #[test]
    fn test_dates_formatted_dd_mm_yyyy() {
        let csv = registrations_to_csv(&[sample_registration(None)]);
        assert!(csv.contains("\"09.03.2014\""));
    }

    #[test]
    fn test_missing_optional_fields_are_empty() {
        let mut reg = sample_registration(None);
        reg.ahv_number = None;
        reg.birth_date = None;
        let csv = registrations_to_csv(&[reg]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"5a\",\"\",\"\",\"Beat Muster\""));
    }

    #[test]
    fn test_csv_file_name() {
        assert_eq!(csv_file_name("TENNIS"), "TENNIS_teilnehmer.csv");
    }
}
