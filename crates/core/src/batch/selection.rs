//! Working set selection: which recipients this run will contact.

use std::collections::HashSet;

use crate::recipient::RecipientRecord;

/// Build the Working Set from a store snapshot.
///
/// Keeps rows with a pending status, applies the optional
/// municipality/region equality filters, and deduplicates by email
/// (case-insensitive) keeping the first occurrence. The result preserves
/// snapshot order with dense 0-based positions; provider rotation keys
/// off those positions.
pub fn build_working_set(
    rows: Vec<RecipientRecord>,
    municipality: Option<&str>,
    region: Option<&str>,
) -> Vec<RecipientRecord> {
    let mut seen: HashSet<String> = HashSet::new();

    rows.into_iter()
        .filter(|row| row.status.is_pending())
        .filter(|row| municipality.map_or(true, |m| row.municipality == m))
        .filter(|row| region.map_or(true, |r| row.region == r))
        .filter(|row| seen.insert(row.email.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipient::DeliveryStatus;
    use crate::testing::fixtures::pending_recipient;

    #[test]
    fn test_keeps_only_pending() {
        let mut sent = pending_recipient("done@example.com", "Springfield", "OR");
        sent.status = DeliveryStatus::sent("gmail");
        let rows = vec![
            pending_recipient("a@example.com", "Springfield", "OR"),
            sent,
            pending_recipient("b@example.com", "Springfield", "OR"),
        ];

        let set = build_working_set(rows, None, None);
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|r| r.status.is_pending()));
    }

    #[test]
    fn test_municipality_and_region_filters() {
        let rows = vec![
            pending_recipient("a@example.com", "Springfield", "OR"),
            pending_recipient("b@example.com", "Shelbyville", "OR"),
            pending_recipient("c@example.com", "Springfield", "WA"),
        ];

        let set = build_working_set(rows.clone(), Some("Springfield"), Some("OR"));
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].email, "a@example.com");

        // Region only
        let set = build_working_set(rows.clone(), None, Some("OR"));
        assert_eq!(set.len(), 2);

        // No filters: everything passes
        let set = build_working_set(rows, None, None);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_dedup_by_email_keeps_first() {
        let mut second = pending_recipient("a@example.com", "Shelbyville", "OR");
        second.display_name = Some("Second".to_string());
        let rows = vec![
            pending_recipient("a@example.com", "Springfield", "OR"),
            second,
            pending_recipient("a@example.com", "Springfield", "OR"),
        ];

        let set = build_working_set(rows, None, None);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].municipality, "Springfield");
        assert_ne!(set[0].display_name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let rows = vec![
            pending_recipient("Sales@Example.com", "Springfield", "OR"),
            pending_recipient("sales@example.com", "Springfield", "OR"),
        ];

        let set = build_working_set(rows, None, None);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].email, "Sales@Example.com");
    }

    #[test]
    fn test_no_duplicate_identities_in_result() {
        let rows: Vec<_> = (0..20)
            .map(|i| pending_recipient(&format!("user{}@example.com", i % 7), "Springfield", "OR"))
            .collect();

        let set = build_working_set(rows, None, None);
        let mut emails: Vec<_> = set.iter().map(|r| r.email.to_lowercase()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), set.len());
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(build_working_set(vec![], Some("X"), None).is_empty());
    }
}
