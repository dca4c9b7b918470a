use icu_core::{
    catalog::{
        extract_categories, sorted_categories, unknown_case, with_unknown_case, IndexCaseCatalog,
        UNKNOWN_INDUSTRY, UNKNOWN_REPRESENTATIVE,
    },
    model::{Category, Customer, IndexCase, IndexCaseType, RawElement, UpstreamType},
    types::UNKNOWN_INDEX_CASE_ID,
};

fn customer(id: u64, refs: &[u64]) -> Customer {
    let elements = refs
        .iter()
        .enumerate()
        .map(|(i, &ic)| RawElement::new(i as u64 + 1, ic, "s", UpstreamType::New))
        .collect();
    Customer::new(id, format!("customer-{id}"), elements)
}

fn ids(categories: &[Category]) -> Vec<u64> {
    categories.iter().map(|c| c.id).collect()
}

fn cases() -> Vec<IndexCase> {
    vec![
        IndexCase::new(101, "Kontostand abfragen", IndexCaseType::InfoRequest),
        IndexCase::new(102, "Karte sperren", IndexCaseType::ActionRequest),
        IndexCase::new(103, "Neue Karte bestellen", IndexCaseType::ActionRequest),
        IndexCase::new(101, "Duplicate definition", IndexCaseType::Complaint),
    ]
}

#[test]
fn categories_are_distinct_in_first_seen_order() {
    let customers = vec![customer(1, &[103, 101, 103]), customer(2, &[105, 101])];

    assert_eq!(ids(&extract_categories(&customers)), vec![103, 101, 105]);
    assert_eq!(ids(&sorted_categories(&customers)), vec![101, 103, 105]);
}

#[test]
fn categories_skip_elements_without_reference() {
    let mut c = customer(1, &[7]);
    c.icu_elements.push(RawElement {
        id: 2,
        index_case_id: None,
        surface: "x".into(),
        time_stamp: None,
        upstream_type: UpstreamType::New,
    });

    assert_eq!(ids(&extract_categories(&[c])), vec![7]);
    assert!(extract_categories(&[]).is_empty());
}

#[test]
fn unknown_case_is_appended_once() {
    let once = with_unknown_case(cases());
    assert_eq!(once.len(), 5);
    assert_eq!(once.last(), Some(&unknown_case()));

    let twice = with_unknown_case(once.clone());
    assert_eq!(twice, once, "a second append must be a no-op");

    let unknown = unknown_case();
    assert_eq!(unknown.id, UNKNOWN_INDEX_CASE_ID);
    assert_eq!(unknown.case_type, IndexCaseType::Unknown);
    assert_eq!(unknown.representative, UNKNOWN_REPRESENTATIVE);
    assert_eq!(unknown.industry.as_deref(), Some(UNKNOWN_INDUSTRY));
}

#[test]
fn existing_unknown_case_is_kept() {
    let custom = IndexCase::new(UNKNOWN_INDEX_CASE_ID, "Sonstiges", IndexCaseType::Unknown);

    let result = with_unknown_case(vec![custom.clone()]);

    assert_eq!(result, vec![custom]);
}

#[test]
fn catalog_lookup_uses_first_definition() {
    let list = cases();
    let catalog = IndexCaseCatalog::new(&list);

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.label(101), Some("Kontostand abfragen"));
    assert_eq!(catalog.get(102).map(|ic| ic.case_type), Some(IndexCaseType::ActionRequest));
    assert!(catalog.contains(103));
    assert!(!catalog.contains(999));
    assert_eq!(catalog.resolve(None), None);
    assert_eq!(catalog.resolve(Some(103)).map(|ic| ic.id), Some(103));
}

#[test]
fn search_returns_every_case_containing_the_term() {
    let list = cases();
    let catalog = IndexCaseCatalog::new(&list);

    let hits: Vec<u64> = catalog.search("Karte").iter().map(|ic| ic.id).collect();
    assert_eq!(hits, vec![102, 103]);
    assert!(catalog.search("karte sperren").is_empty(), "matching is case-sensitive");
    assert!(catalog.search("Überweisung").is_empty());
}
