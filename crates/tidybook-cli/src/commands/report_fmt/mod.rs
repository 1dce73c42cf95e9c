use std::collections::HashMap;
use std::fmt::Write as _;
use tidybook_core::{Contact, ContactId, Report};

pub(crate) fn render_human(report: &Report, contacts: &[Contact]) -> String {
    let by_id: HashMap<&ContactId, &Contact> = contacts.iter().map(|c| (&c.id, c)).collect();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Analyzed {} contacts ({} pairs compared, similarity threshold {}).",
        report.contacts_analyzed, report.pairs_compared, report.similarity_threshold
    );
    if report.is_clean() {
        out.push_str("No problems found.\n");
        return out;
    }

    section(&mut out, "Duplicate phone numbers", report.duplicate_phones.is_empty());
    for group in &report.duplicate_phones {
        let _ = writeln!(out, "  Phone number: {}", group.phone);
        for id in &group.contact_ids {
            let _ = writeln!(out, "    {}", label_for_id(&by_id, id));
        }
    }

    section(&mut out, "Duplicate emails", report.duplicate_emails.is_empty());
    for group in &report.duplicate_emails {
        let _ = writeln!(out, "  Email: {}", group.email);
        for contact in &group.contacts {
            let _ = writeln!(out, "    {}", contact_label(contact));
        }
    }

    section(&mut out, "Duplicate names", report.duplicate_names.is_empty());
    for group in &report.duplicate_names {
        let _ = writeln!(out, "  Name: {}", group.name);
        for contact in &group.contacts {
            let _ = writeln!(out, "    {}", contact_label(contact));
        }
    }

    section(&mut out, "Invalid last names", report.invalid_last_names.is_empty());
    for contact in &report.invalid_last_names {
        let _ = writeln!(out, "  {}", contact_label(contact));
    }

    section(&mut out, "Similar names", report.similar_names.is_empty());
    for pair in &report.similar_names {
        let _ = writeln!(
            out,
            "  {} - {} [{:.2}]",
            contact_label(&pair.first),
            contact_label(&pair.second),
            pair.ratio
        );
    }

    section(&mut out, "Missing phone numbers", report.missing_phones.is_empty());
    for id in &report.missing_phones {
        let _ = writeln!(out, "  {}", label_for_id(&by_id, id));
    }

    section(&mut out, "Missing emails", report.missing_emails.is_empty());
    for id in &report.missing_emails {
        let _ = writeln!(out, "  {}", label_for_id(&by_id, id));
    }

    out
}

fn section(out: &mut String, title: &str, empty: bool) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}:");
    if empty {
        out.push_str("  none\n");
    }
}

fn contact_label(contact: &Contact) -> String {
    format!("{} (ID: {})", contact.full_name(), contact.id)
}

fn label_for_id(by_id: &HashMap<&ContactId, &Contact>, id: &ContactId) -> String {
    match by_id.get(id) {
        Some(contact) => contact_label(contact),
        None => format!("(ID: {id})"),
    }
}
