use crate::domain::{Contact, ContactId, NormalizedContact};
use crate::rules::similarity::{compare_name_keys, SimilarityThreshold};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneGroup {
    pub phone: String,
    // Each id appears once, in the order it was first matched.
    pub contact_ids: Vec<ContactId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailGroup {
    pub email: String,
    // Both sides of every matching pair, so a contact can repeat.
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameGroup {
    pub name: String,
    pub key: String,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarNamePair {
    pub first: Contact,
    pub second: Contact,
    pub ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DuplicateFindings {
    pub phones: Vec<PhoneGroup>,
    pub emails: Vec<EmailGroup>,
    pub names: Vec<NameGroup>,
    pub similar_names: Vec<SimilarNamePair>,
    pub pairs_compared: u64,
}

/// Number of unordered pairs the detector visits for `n` records.
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Accumulates findings one pair at a time. Groups are keyed by their literal
/// normalized value and keep first-seen order.
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    threshold: SimilarityThreshold,
    phones: Vec<PhoneGroup>,
    phone_index: HashMap<String, usize>,
    emails: Vec<EmailGroup>,
    email_index: HashMap<String, usize>,
    names: Vec<NameGroup>,
    name_index: HashMap<String, usize>,
    similar_names: Vec<SimilarNamePair>,
    pairs_compared: u64,
}

impl DuplicateDetector {
    pub fn new(threshold: SimilarityThreshold) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn observe_pair(&mut self, a: &NormalizedContact<'_>, b: &NormalizedContact<'_>) {
        if a.contact.id == b.contact.id {
            return;
        }
        self.pairs_compared += 1;

        if let (Some(phone_a), Some(phone_b)) = (a.phone.as_deref(), b.phone.as_deref()) {
            if phone_a == phone_b {
                self.record_phone(phone_a, &a.contact.id, &b.contact.id);
            }
        }

        if let (Some(email_a), Some(email_b)) = (a.email.as_deref(), b.email.as_deref()) {
            if email_a == email_b {
                let slot = group_slot(&mut self.emails, &mut self.email_index, email_a, || {
                    EmailGroup {
                        email: email_a.to_string(),
                        contacts: Vec::new(),
                    }
                });
                slot.contacts.push(a.contact.clone());
                slot.contacts.push(b.contact.clone());
            }
        }

        let comparison = compare_name_keys(&a.name_key, &b.name_key);
        if comparison.exact {
            let slot = group_slot(&mut self.names, &mut self.name_index, &a.name_key, || {
                NameGroup {
                    name: a.full_name.clone(),
                    key: a.name_key.clone(),
                    contacts: Vec::new(),
                }
            });
            slot.contacts.push(a.contact.clone());
            slot.contacts.push(b.contact.clone());
        } else if comparison.is_fuzzy_match(self.threshold) {
            self.similar_names.push(SimilarNamePair {
                first: a.contact.clone(),
                second: b.contact.clone(),
                ratio: comparison.ratio,
            });
        }
    }

    fn record_phone(&mut self, phone: &str, a: &ContactId, b: &ContactId) {
        let slot = group_slot(&mut self.phones, &mut self.phone_index, phone, || {
            PhoneGroup {
                phone: phone.to_string(),
                contact_ids: Vec::new(),
            }
        });
        for id in [a, b] {
            if !slot.contact_ids.contains(id) {
                slot.contact_ids.push(id.clone());
            }
        }
    }

    pub fn finish(self) -> DuplicateFindings {
        DuplicateFindings {
            phones: self.phones,
            emails: self.emails,
            names: self.names,
            similar_names: self.similar_names,
            pairs_compared: self.pairs_compared,
        }
    }
}

fn group_slot<'g, G>(
    groups: &'g mut Vec<G>,
    index: &mut HashMap<String, usize>,
    key: &str,
    make: impl FnOnce() -> G,
) -> &'g mut G {
    let position = match index.get(key) {
        Some(position) => *position,
        None => {
            groups.push(make());
            let position = groups.len() - 1;
            index.insert(key.to_string(), position);
            position
        }
    };
    &mut groups[position]
}

/// Visits every unordered pair `(i, j)` with `i < j` exactly once.
pub fn detect_duplicates(
    contacts: &[Contact],
    threshold: SimilarityThreshold,
) -> DuplicateFindings {
    let normalized: Vec<NormalizedContact<'_>> =
        contacts.iter().map(NormalizedContact::new).collect();
    let mut detector = DuplicateDetector::new(threshold);
    for (i, current) in normalized.iter().enumerate() {
        for other in &normalized[i + 1..] {
            detector.observe_pair(current, other);
        }
    }
    detector.finish()
}
