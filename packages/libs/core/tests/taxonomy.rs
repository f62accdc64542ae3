//! 택소노미 서브시스템 테스트 (in-memory SQLite)
//!
//! Term 파사드의 2행 구조, 다대다 join row 관리, 슬러그 유니크 규칙을
//! 검증합니다.

use sea_orm::{ColumnTrait, ConnectOptions, EntityTrait, PaginatorTrait, QueryFilter};

use psk_core::entities::prelude::Terms;
use psk_core::entities::{post, term};
use psk_core::{Error, PressDb};

async fn test_db() -> PressDb {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1);
    let db = PressDb::connect_with_options(opts)
        .await
        .expect("connect in-memory sqlite");
    db.install_schema().await.expect("install schema");
    db
}

async fn fixture_posts(db: &PressDb, titles: &[&str]) -> Vec<post::Model> {
    let mut posts = Vec::with_capacity(titles.len());
    for title in titles {
        posts.push(db.create_post(None, title, "").await.unwrap());
    }
    posts
}

#[tokio::test]
async fn term_with_five_posts_returns_exactly_those_posts() {
    let db = test_db().await;
    let posts = fixture_posts(&db, &["sight", "hearing", "touch", "smell", "taste"]).await;

    let earth = db.create_term("Earth", "earth", "elements").await.unwrap();
    for p in &posts {
        assert!(db.attach_term(p.id, &earth).await.unwrap());
    }

    let linked = db.posts_for_term(&earth).await.unwrap();
    assert_eq!(linked.len(), 5);
    let mut expected: Vec<i64> = posts.iter().map(|p| p.id).collect();
    expected.sort_unstable();
    let got: Vec<i64> = linked.iter().map(|p| p.id).collect();
    assert_eq!(got, expected);

    let earth = db.get_term(earth.id()).await.unwrap().unwrap();
    assert_eq!(earth.count(), 5);
}

#[tokio::test]
async fn attach_is_visible_from_both_sides() {
    let db = test_db().await;
    let post = db.create_post(None, "sight", "").await.unwrap();
    let term = db.create_term("Fire", "fire", "elements").await.unwrap();

    db.attach_term(post.id, &term).await.unwrap();

    let from_term: Vec<i64> = db
        .posts_for_term(&term)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(from_term, vec![post.id]);

    let from_post = db.terms_for_post(post.id, None).await.unwrap();
    assert_eq!(from_post.len(), 1);
    assert_eq!(from_post[0].key(), term.key());
}

#[tokio::test]
async fn attach_never_duplicates_the_join_row() {
    let db = test_db().await;
    let post = db.create_post(None, "sight", "").await.unwrap();
    let term = db.create_term("Fire", "fire", "elements").await.unwrap();

    assert!(db.attach_term(post.id, &term).await.unwrap());
    assert!(!db.attach_term(post.id, &term).await.unwrap());

    assert_eq!(db.term_relationship_count(post.id).await.unwrap(), 1);
    let term = db.get_term(term.id()).await.unwrap().unwrap();
    assert_eq!(term.count(), 1);
}

#[tokio::test]
async fn term_with_no_posts_has_empty_collection() {
    let db = test_db().await;
    let term = db.create_term("Void", "void", "elements").await.unwrap();

    let posts = db.posts_for_term(&term).await.unwrap();
    assert!(posts.is_empty());
    assert_eq!(term.count(), 0);
}

#[tokio::test]
async fn same_slug_in_two_taxonomies_shares_the_terms_row() {
    let db = test_db().await;

    let in_elements = db.create_term("Earth", "earth", "elements").await.unwrap();
    let in_tags = db.create_term("Earth", "earth", "post_tag").await.unwrap();

    // wp_terms 행은 공유, wp_term_taxonomy 행은 taxonomy마다 하나
    assert_eq!(in_elements.term_id(), in_tags.term_id());
    assert_ne!(in_elements.id(), in_tags.id());
    assert_ne!(in_elements.key(), in_tags.key());

    let term_rows = Terms::find()
        .filter(term::Column::Slug.eq("earth"))
        .count(db.connection())
        .await
        .unwrap();
    assert_eq!(term_rows, 1);

    // 각 파사드는 자기 taxonomy 범위의 관계만 본다
    let post = db.create_post(None, "sight", "").await.unwrap();
    db.attach_term(post.id, &in_elements).await.unwrap();

    assert_eq!(db.posts_for_term(&in_elements).await.unwrap().len(), 1);
    assert!(db.posts_for_term(&in_tags).await.unwrap().is_empty());

    let scoped = db.terms_for_post(post.id, Some("post_tag")).await.unwrap();
    assert!(scoped.is_empty());
}

#[tokio::test]
async fn duplicate_term_in_same_taxonomy_fails_at_storage_layer() {
    let db = test_db().await;

    db.create_term("Earth", "earth", "elements").await.unwrap();
    let err = db.create_term("Earth", "earth", "elements").await;

    // (term_id, taxonomy) 유니크 제약 위반이 변환 없이 올라온다
    assert!(matches!(err, Err(Error::Db(_))));
}

#[tokio::test]
async fn find_term_joins_on_taxonomy_and_slug() {
    let db = test_db().await;
    db.create_term("Earth", "earth", "elements").await.unwrap();

    let found = db.find_term("elements", "earth").await.unwrap().unwrap();
    assert_eq!(found.name(), "Earth");
    assert_eq!(found.taxonomy(), "elements");

    assert!(db.find_term("post_tag", "earth").await.unwrap().is_none());
    assert!(db.find_term("elements", "fire").await.unwrap().is_none());

    let err = db.require_term("elements", "fire").await;
    assert!(matches!(err, Err(Error::TermNotFound { .. })));
}

#[tokio::test]
async fn overlapping_fixture_yields_one_join_row_per_linked_pair() {
    let db = test_db().await;
    let senses = fixture_posts(&db, &["sight", "hearing", "touch", "smell", "taste"]).await;

    let earth = db.create_term("Earth", "earth", "elements").await.unwrap();
    let fire = db.create_term("Fire", "fire", "elements").await.unwrap();

    // Earth: 다섯 포스트 전부, Fire: {sight, hearing, touch}
    for p in &senses {
        db.attach_term(p.id, &earth).await.unwrap();
    }
    for p in &senses[..3] {
        db.attach_term(p.id, &fire).await.unwrap();
    }

    assert_eq!(db.posts_for_term(&earth).await.unwrap().len(), 5);
    assert_eq!(db.posts_for_term(&fire).await.unwrap().len(), 3);

    let earth = db.get_term(earth.id()).await.unwrap().unwrap();
    let fire = db.get_term(fire.id()).await.unwrap().unwrap();
    assert_eq!(earth.count(), 5);
    assert_eq!(fire.count(), 3);

    // 포스트별 (post, term) 쌍: 겹치는 세 포스트는 2개, 나머지는 1개
    for p in &senses[..3] {
        assert_eq!(db.term_relationship_count(p.id).await.unwrap(), 2);
    }
    for p in &senses[3..] {
        assert_eq!(db.term_relationship_count(p.id).await.unwrap(), 1);
    }
}

#[tokio::test]
async fn detach_removes_the_join_row_and_updates_count() {
    let db = test_db().await;
    let posts = fixture_posts(&db, &["sight", "hearing"]).await;
    let term = db.create_term("Fire", "fire", "elements").await.unwrap();

    for p in &posts {
        db.attach_term(p.id, &term).await.unwrap();
    }
    assert!(db.detach_term(posts[0].id, &term).await.unwrap());
    assert!(!db.detach_term(posts[0].id, &term).await.unwrap());

    let remaining: Vec<i64> = db
        .posts_for_term(&term)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(remaining, vec![posts[1].id]);

    let term = db.get_term(term.id()).await.unwrap().unwrap();
    assert_eq!(term.count(), 1);
}

#[tokio::test]
async fn set_post_terms_replaces_the_set_within_a_taxonomy() {
    let db = test_db().await;
    let post = db.create_post(None, "sight", "").await.unwrap();

    let earth = db.create_term("Earth", "earth", "elements").await.unwrap();
    let fire = db.create_term("Fire", "fire", "elements").await.unwrap();
    let water = db.create_term("Water", "water", "elements").await.unwrap();
    let tag = db.create_term("Featured", "featured", "post_tag").await.unwrap();

    db.attach_term(post.id, &earth).await.unwrap();
    db.attach_term(post.id, &tag).await.unwrap();

    db.set_post_terms(post.id, "elements", &[fire.clone(), water.clone()])
        .await
        .unwrap();

    let elements: Vec<i64> = db
        .terms_for_post(post.id, Some("elements"))
        .await
        .unwrap()
        .iter()
        .map(|t| t.id())
        .collect();
    assert_eq!(elements, vec![fire.id(), water.id()]);

    // 다른 taxonomy의 연결은 그대로
    let tags = db.terms_for_post(post.id, Some("post_tag")).await.unwrap();
    assert_eq!(tags.len(), 1);

    let earth = db.get_term(earth.id()).await.unwrap().unwrap();
    let fire = db.get_term(fire.id()).await.unwrap().unwrap();
    assert_eq!(earth.count(), 0);
    assert_eq!(fire.count(), 1);
}

#[tokio::test]
async fn set_post_terms_rejects_terms_from_another_taxonomy() {
    let db = test_db().await;
    let post = db.create_post(None, "sight", "").await.unwrap();
    let tag = db.create_term("Featured", "featured", "post_tag").await.unwrap();

    let err = db.set_post_terms(post.id, "elements", &[tag]).await;
    assert!(matches!(err, Err(Error::TaxonomyMismatch { .. })));
}

#[tokio::test]
async fn term_accessors_write_through_to_both_rows() {
    let db = test_db().await;
    let mut term = db.create_term("Earth", "earth", "elements").await.unwrap();

    term.set_name("Dirt");
    term.set_description("soil and stone");
    db.update_term(&term).await.unwrap();

    let reloaded = db.get_term(term.id()).await.unwrap().unwrap();
    assert_eq!(reloaded.name(), "Dirt");
    assert_eq!(reloaded.slug(), "earth");
    assert_eq!(reloaded.description(), "soil and stone");
}

#[tokio::test]
async fn term_parent_defaults_to_root_sentinel() {
    let db = test_db().await;
    let parent = db.create_term("Elements", "all-elements", "elements").await.unwrap();
    let mut child = db.create_term("Earth", "earth", "elements").await.unwrap();

    assert_eq!(child.parent(), None);

    child.set_parent(Some(parent.id()));
    db.update_term(&child).await.unwrap();

    let child = db.get_term(child.id()).await.unwrap().unwrap();
    assert_eq!(child.parent(), Some(parent.id()));
    assert_eq!(child.taxonomy_row().parent, parent.id());
}

#[tokio::test]
async fn delete_term_keeps_the_shared_terms_row() {
    let db = test_db().await;
    let post = db.create_post(None, "sight", "").await.unwrap();
    let in_elements = db.create_term("Earth", "earth", "elements").await.unwrap();
    let in_tags = db.create_term("Earth", "earth", "post_tag").await.unwrap();

    db.attach_term(post.id, &in_elements).await.unwrap();
    db.delete_term(&in_elements).await.unwrap();

    assert!(db.get_term(in_elements.id()).await.unwrap().is_none());
    assert_eq!(db.term_relationship_count(post.id).await.unwrap(), 0);

    // 공유되던 wp_terms 행은 다른 taxonomy의 파사드를 통해 여전히 보인다
    let survivor = db.find_term("post_tag", "earth").await.unwrap().unwrap();
    assert_eq!(survivor.term_id(), in_tags.term_id());
}
