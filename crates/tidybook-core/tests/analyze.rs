use std::collections::{BTreeMap, BTreeSet};
use tidybook_core::{analyze, AnalysisOptions, Contact, Report};

fn scenario() -> Vec<Contact> {
    vec![
        Contact::new("1", "Jane", "Doe")
            .with_telephone("555-1234")
            .with_email("jane@x.com"),
        Contact::new("2", "Jane", "Doe")
            .with_telephone("555-1234")
            .with_email("JANE@X.com"),
        Contact::new("3", "Jon", "Doe")
            .with_telephone("")
            .with_email(""),
    ]
}

fn ids_of(contacts: &[Contact]) -> Vec<String> {
    contacts.iter().map(|c| c.id.to_string()).collect()
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

/// Order-insensitive view of a report's membership.
#[derive(Debug, PartialEq, Eq)]
struct Membership {
    phones: BTreeMap<String, BTreeSet<String>>,
    emails: BTreeMap<String, Vec<String>>,
    names: BTreeMap<String, Vec<String>>,
    similar: BTreeSet<(String, String)>,
    invalid_last_names: BTreeSet<String>,
    missing_phones: BTreeSet<String>,
    missing_emails: BTreeSet<String>,
}

fn membership(report: &Report) -> Membership {
    Membership {
        phones: report
            .duplicate_phones
            .iter()
            .map(|g| {
                let ids = g.contact_ids.iter().map(|id| id.to_string()).collect();
                (g.phone.clone(), ids)
            })
            .collect(),
        emails: report
            .duplicate_emails
            .iter()
            .map(|g| (g.email.clone(), sorted(ids_of(&g.contacts))))
            .collect(),
        names: report
            .duplicate_names
            .iter()
            .map(|g| (g.key.clone(), sorted(ids_of(&g.contacts))))
            .collect(),
        similar: report
            .similar_names
            .iter()
            .map(|pair| {
                let a = pair.first.id.to_string();
                let b = pair.second.id.to_string();
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            })
            .collect(),
        invalid_last_names: ids_of(&report.invalid_last_names).into_iter().collect(),
        missing_phones: report.missing_phones.iter().map(|id| id.to_string()).collect(),
        missing_emails: report.missing_emails.iter().map(|id| id.to_string()).collect(),
    }
}

#[test]
fn end_to_end_scenario_groups_duplicates_and_flags_missing_fields() {
    let report = analyze(&scenario(), &AnalysisOptions::default()).expect("analyze");

    assert_eq!(report.contacts_analyzed, 3);
    assert_eq!(report.pairs_compared, 3);

    assert_eq!(report.duplicate_phones.len(), 1);
    assert_eq!(report.duplicate_phones[0].phone, "555-1234");
    let phone_ids: Vec<&str> = report.duplicate_phones[0]
        .contact_ids
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(phone_ids, vec!["1", "2"]);

    assert_eq!(report.duplicate_emails.len(), 1);
    assert_eq!(report.duplicate_emails[0].email, "jane@x.com");
    assert_eq!(ids_of(&report.duplicate_emails[0].contacts), vec!["1", "2"]);

    assert_eq!(report.duplicate_names.len(), 1);
    assert_eq!(report.duplicate_names[0].name, "Jane Doe");
    assert_eq!(ids_of(&report.duplicate_names[0].contacts), vec!["1", "2"]);

    // "jane doe" vs "jon doe" scores exactly 0.8, under the default threshold.
    assert!(report.similar_names.is_empty());

    let missing_phones: Vec<&str> = report.missing_phones.iter().map(|id| id.as_str()).collect();
    let missing_emails: Vec<&str> = report.missing_emails.iter().map(|id| id.as_str()).collect();
    assert_eq!(missing_phones, vec!["3"]);
    assert_eq!(missing_emails, vec!["3"]);
    assert!(report.invalid_last_names.is_empty());
}

#[test]
fn end_to_end_scenario_reports_similar_names_with_a_near_spelling() {
    let mut contacts = scenario();
    contacts[2].first_name = "Janet".to_string();

    let report = analyze(&contacts, &AnalysisOptions::default()).expect("analyze");
    let pairs: Vec<(&str, &str)> = report
        .similar_names
        .iter()
        .map(|pair| (pair.first.id.as_str(), pair.second.id.as_str()))
        .collect();
    assert_eq!(pairs, vec![("1", "3"), ("2", "3")]);
    assert_eq!(report.duplicate_names.len(), 1);
}

#[test]
fn reversed_input_yields_same_membership() {
    let mut contacts = scenario();
    contacts.push(
        Contact::new("4", "John", "Doe")
            .with_telephone("555-1234")
            .with_email("jane@x.com"),
    );
    contacts.push(Contact::new("5", "Zoë", "Müller").with_email("zoe@x.com"));

    let forward = analyze(&contacts, &AnalysisOptions::default()).expect("forward");
    contacts.reverse();
    let backward = analyze(&contacts, &AnalysisOptions::default()).expect("backward");

    assert_eq!(membership(&forward), membership(&backward));
    assert_eq!(forward.pairs_compared, backward.pairs_compared);
}

#[test]
fn missing_fields_never_join_groups() {
    let contacts = vec![
        Contact::new("1", "Ann", "Lee"),
        Contact::new("2", "Bob", "Ray").with_telephone("   ").with_email(""),
        Contact::new("3", "Cat", "Fox").with_telephone("555").with_email("cat@x.com"),
        Contact::new("4", "Dan", "Orr").with_telephone("555").with_email("cat@x.com"),
    ];
    let report = analyze(&contacts, &AnalysisOptions::default()).expect("analyze");

    let grouped_by_phone: BTreeSet<String> = report
        .duplicate_phones
        .iter()
        .flat_map(|g| g.contact_ids.iter().map(|id| id.to_string()))
        .collect();
    let grouped_by_email: BTreeSet<String> = report
        .duplicate_emails
        .iter()
        .flat_map(|g| ids_of(&g.contacts))
        .collect();

    for id in &report.missing_phones {
        assert!(!grouped_by_phone.contains(id.as_str()));
    }
    for id in &report.missing_emails {
        assert!(!grouped_by_email.contains(id.as_str()));
    }
    assert_eq!(grouped_by_phone, BTreeSet::from(["3".to_string(), "4".to_string()]));
}

#[test]
fn whitespace_only_emails_are_present_and_grouped() {
    let contacts = vec![
        Contact::new("1", "Ann", "Lee").with_email(" "),
        Contact::new("2", "Bob", "Ray").with_email(" "),
    ];
    let report = analyze(&contacts, &AnalysisOptions::default()).expect("analyze");

    assert!(report.missing_emails.is_empty());
    assert_eq!(report.duplicate_emails.len(), 1);
    assert_eq!(report.duplicate_emails[0].email, " ");
    assert_eq!(ids_of(&report.duplicate_emails[0].contacts), vec!["1", "2"]);
}

#[test]
fn exact_and_similar_name_findings_are_disjoint() {
    let contacts = vec![
        Contact::new("1", "Jon", "Smith"),
        Contact::new("2", "JON", "SMITH"),
        Contact::new("3", "John", "Smith"),
        Contact::new("4", "Jonn", "Smith"),
    ];
    let report = analyze(&contacts, &AnalysisOptions::default()).expect("analyze");
    let view = membership(&report);

    let mut exact_pairs = BTreeSet::new();
    for group in &report.duplicate_names {
        for pair in group.contacts.chunks(2) {
            exact_pairs.insert((pair[0].id.to_string(), pair[1].id.to_string()));
        }
    }
    assert!(!exact_pairs.is_empty());
    assert!(!view.similar.is_empty());
    assert!(exact_pairs.is_disjoint(&view.similar));
}

#[test]
fn analysis_is_idempotent() {
    let contacts = scenario();
    let first = analyze(&contacts, &AnalysisOptions::default()).expect("first");
    let second = analyze(&contacts, &AnalysisOptions::default()).expect("second");
    assert_eq!(first, second);
}

#[test]
fn report_serializes_all_categories() {
    let report = analyze(&scenario(), &AnalysisOptions::default()).expect("analyze");
    let value = serde_json::to_value(&report).expect("serialize");
    for key in [
        "duplicate_phones",
        "duplicate_emails",
        "duplicate_names",
        "similar_names",
        "invalid_last_names",
        "missing_phones",
        "missing_emails",
    ] {
        assert!(value[key].is_array(), "missing {key}");
    }
    assert_eq!(value["missing_phones"][0], "3");
    assert_eq!(value["duplicate_names"][0]["name"], "Jane Doe");
}
