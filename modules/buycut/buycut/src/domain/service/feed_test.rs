#![allow(clippy::unwrap_used, clippy::expect_used)]

use buycut_sdk::{
    BoycottedKind, Brand, BrandWithCompany, Company, KeywordMatch, PageRequest, PageWindow,
};
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::service::{ServiceConfig, brand_query_limit, merge_results};
use crate::domain::test_support::{FakeStore, RecordingImages, services, services_with};

fn company(id: i32, name: &str) -> Company {
    Company {
        id,
        name: name.to_owned(),
        slug: name.to_lowercase(),
        description: format!("why {name}"),
        proof: vec![format!("proof {name}")],
        image_url: String::new(),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn brand(id: i32, name: &str, parent: &Company) -> BrandWithCompany {
    BrandWithCompany {
        brand: Brand {
            id,
            name: name.to_owned(),
            slug: name.to_lowercase(),
            image_url: String::new(),
            company_id: parent.id,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        },
        company: parent.clone(),
    }
}

#[test]
fn brand_limit_grows_by_company_shortfall() {
    assert_eq!(brand_query_limit(10, 10), 10);
    assert_eq!(brand_query_limit(12, 10), 10);
    assert_eq!(brand_query_limit(7, 10), 13);
    assert_eq!(brand_query_limit(0, 10), 20);
    for limit in 1..20 {
        for rows in 0..30 {
            let expected = if rows >= limit { limit } else { 2 * limit - rows };
            assert_eq!(brand_query_limit(rows, limit), expected);
        }
    }
}

#[test]
fn merge_sorts_by_name_across_kinds() {
    let zeta = company(1, "Zeta");
    let alpha = company(2, "Alpha");
    let merged = merge_results(
        vec![alpha.clone(), zeta.clone()],
        vec![brand(10, "Mid Brand", &zeta), brand(11, "Beta Brand", &alpha)],
    );

    let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta Brand", "Mid Brand", "Zeta"]);
}

#[test]
fn merge_uses_ordinal_case_sensitive_order() {
    let merged = merge_results(vec![company(1, "apple"), company(2, "Banana")], Vec::new());
    let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Banana", "apple"]);
}

#[test]
fn brands_inherit_company_rationale() {
    let parent = company(1, "Parent");
    let merged = merge_results(Vec::new(), vec![brand(5, "Child", &parent)]);

    let child = &merged[0];
    assert_eq!(child.kind, BoycottedKind::Brand);
    assert_eq!(child.id, 5);
    assert_eq!(child.description, parent.description);
    assert_eq!(child.proof, parent.proof);
    assert_eq!(child.company.as_ref(), Some(&parent));
}

#[test]
fn companies_come_first_on_equal_names() {
    let parent = company(1, "Same");
    let merged = merge_results(vec![parent.clone()], vec![brand(2, "Same", &parent)]);
    assert_eq!(merged[0].kind, BoycottedKind::Company);
    assert!(merged[0].company.is_none());
    assert_eq!(merged[1].kind, BoycottedKind::Brand);
}

#[tokio::test]
async fn keyword_prefers_companies_over_brands() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    let acme = store.seed_company("Acme");
    let other = store.seed_company("Other");
    store.seed_brand("ACME", other.id);

    match svc.feed.find_by_keyword("acme").await.unwrap() {
        KeywordMatch::Companies(found) => {
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].company.id, acme.id);
        }
        KeywordMatch::Brands(_) => panic!("brands must not be returned when a company matches"),
    }
}

#[tokio::test]
async fn keyword_falls_back_to_brands() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    let acme = store.seed_company("Acme");
    store.seed_brand("Acme Shoes", acme.id);

    match svc.feed.find_by_keyword("ACME SHOES").await.unwrap() {
        KeywordMatch::Brands(found) => {
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].company.id, acme.id);
        }
        KeywordMatch::Companies(_) => panic!("expected brand match"),
    }
}

#[tokio::test]
async fn keyword_is_exact_not_substring() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    store.seed_company("Acme Corp");

    let err = svc.feed.find_by_keyword("Acme").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn blank_keyword_is_rejected() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());

    let err = svc.feed.find_by_keyword("  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn feed_merges_company_and_brand_matches() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    store.seed_company("Acme Corp");
    let other = store.seed_company("Globex");
    store.seed_brand("Acme Shoes", other.id);

    let page = svc
        .feed
        .feed("Acme", PageRequest { page: 1, limit: 2 })
        .await
        .unwrap();

    assert_eq!(page.pages.total, 2);
    assert_eq!(page.pages.last_page, 1);
    let entries: Vec<_> = page
        .items
        .iter()
        .map(|r| (r.name.as_str(), r.kind))
        .collect();
    assert_eq!(
        entries,
        [
            ("Acme Corp", BoycottedKind::Company),
            ("Acme Shoes", BoycottedKind::Brand)
        ]
    );
    assert_eq!(page.items[1].description, "Globex description");
}

#[tokio::test]
async fn underfilled_company_page_boosts_brand_limit() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    let parent = store.seed_company("Shoe Co");
    for name in ["Shoe A", "Shoe B", "Shoe C", "Shoe D", "Shoe E"] {
        store.seed_brand(name, parent.id);
    }

    let rows = svc
        .feed
        .find_all("shoe", PageWindow { offset: 0, limit: 4 })
        .await
        .unwrap();

    // one company row, so brands get 4 + 3
    assert_eq!(
        store.brand_windows.lock().unwrap().last(),
        Some(&PageWindow { offset: 0, limit: 7 })
    );
    assert_eq!(rows.len(), 6);
    assert!(rows.windows(2).all(|w| w[0].name <= w[1].name));
}

#[tokio::test]
async fn full_company_page_keeps_brand_limit() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    for name in ["Co A", "Co B", "Co C"] {
        store.seed_company(name);
    }

    svc.feed
        .find_all("co", PageWindow { offset: 0, limit: 2 })
        .await
        .unwrap();

    assert_eq!(
        store.brand_windows.lock().unwrap().last(),
        Some(&PageWindow { offset: 0, limit: 2 })
    );
}

#[tokio::test]
async fn count_sums_both_tables() {
    let store = FakeStore::new();
    let svc = services(&store, &RecordingImages::new());
    let a = store.seed_company("Nest One");
    store.seed_company("Nest Two");
    store.seed_brand("Nest Brand", a.id);
    store.seed_brand("Unrelated", a.id);

    assert_eq!(svc.feed.count_all("nest").await.unwrap(), 3);
    assert_eq!(svc.feed.count_all("").await.unwrap(), 4);
}

#[tokio::test]
async fn title_case_applies_after_sorting() {
    let store = FakeStore::new();
    let config = ServiceConfig {
        title_case_feed_names: true,
        ..ServiceConfig::default()
    };
    let svc = services_with(&store, &RecordingImages::new(), &config);
    store.seed_company("zeta foods");
    store.seed_company("Alpha foods");

    let page = svc
        .feed
        .feed("foods", PageRequest::default())
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|r| r.name.as_str()).collect();
    // raw order: "Alpha foods" < "zeta foods"
    assert_eq!(names, ["Alpha Foods", "Zeta Foods"]);
}
