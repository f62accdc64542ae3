//! Term 파사드
//!
//! WordPress의 태그/카테고리는 wp_terms → wp_term_taxonomy →
//! wp_term_relationships 세 테이블 간접 구조입니다. 이 모듈은 `term_id`로
//! 조인되는 wp_terms 행과 wp_term_taxonomy 행 한 쌍을 하나의 논리적
//! [`Term`]으로 묶고, 포스트와의 다대다 관계를 join row로 관리합니다.
//!
//! 식별자는 `(term_id, term_taxonomy_id)` 쌍입니다. 관계 코드(조인 테이블
//! 외래키)가 사용하는 쪽은 `term_taxonomy_id`입니다. 같은 이름/슬러그의
//! 텀이 여러 taxonomy에서 쓰이면 wp_terms 행은 공유되고 Term 인스턴스는
//! taxonomy마다 하나씩 생깁니다.

use std::collections::BTreeSet;
use std::fmt;

use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{post, term, term_relationship, term_taxonomy};
use crate::error::{Error, Result};

/// Term의 복합 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermKey {
    pub term_id: i64,
    pub term_taxonomy_id: i64,
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term:{}/{}", self.term_id, self.term_taxonomy_id)
    }
}

/// 논리적 Term
///
/// wp_terms 행(name/slug/term_group)과 wp_term_taxonomy 행
/// (taxonomy/description/parent/count)을 함께 들고, 접근자가 각 필드를
/// 올바른 행으로 라우팅합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    term: term::Model,
    tax: term_taxonomy::Model,
}

impl Term {
    /// 조인 결과의 행 한 쌍으로 Term을 만듭니다. 두 행의 `term_id`가
    /// 일치하지 않으면 거부합니다.
    pub fn from_rows(term: term::Model, tax: term_taxonomy::Model) -> Result<Self> {
        if term.term_id != tax.term_id {
            return Err(Error::TermRowMismatch {
                term_id: term.term_id,
                taxonomy_term_id: tax.term_id,
            });
        }
        Ok(Self { term, tax })
    }

    pub fn key(&self) -> TermKey {
        TermKey {
            term_id: self.term.term_id,
            term_taxonomy_id: self.tax.term_taxonomy_id,
        }
    }

    /// 관계 코드가 사용하는 논리적 id (`term_taxonomy_id`)
    pub fn id(&self) -> i64 {
        self.tax.term_taxonomy_id
    }

    pub fn term_id(&self) -> i64 {
        self.term.term_id
    }

    // ── wp_terms 행에서 읽는 필드 ───────────────────────────────────

    pub fn name(&self) -> &str {
        &self.term.name
    }

    pub fn slug(&self) -> &str {
        &self.term.slug
    }

    pub fn term_group(&self) -> i64 {
        self.term.term_group
    }

    // ── wp_term_taxonomy 행에서 읽는 필드 ───────────────────────────

    pub fn taxonomy(&self) -> &str {
        &self.tax.taxonomy
    }

    pub fn description(&self) -> &str {
        &self.tax.description
    }

    /// 같은 taxonomy 안의 부모 텀. 센티널 0은 None.
    pub fn parent(&self) -> Option<i64> {
        self.tax.parent_id()
    }

    /// 이 텀이 연결된 오브젝트(포스트) 수
    pub fn count(&self) -> i64 {
        self.tax.count
    }

    // ── 쓰기 접근자 ────────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.term.name = name.into();
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.term.slug = slug.into();
    }

    pub fn set_term_group(&mut self, group: i64) {
        self.term.term_group = group;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.tax.description = description.into();
    }

    pub fn set_parent(&mut self, parent: Option<i64>) {
        self.tax.parent = parent.unwrap_or(0);
    }

    // ── 백킹 행 ────────────────────────────────────────────────────

    pub fn term_row(&self) -> &term::Model {
        &self.term
    }

    pub fn taxonomy_row(&self) -> &term_taxonomy::Model {
        &self.tax
    }

    pub fn into_rows(self) -> (term::Model, term_taxonomy::Model) {
        (self.term, self.tax)
    }

    /// 두 백킹 행을 모두 저장합니다. 원자성이 필요하면 트랜잭션 위에서
    /// 호출하세요.
    pub async fn save<C: ConnectionTrait>(&self, conn: &C) -> Result<()> {
        let term_update = term::ActiveModel {
            term_id: Unchanged(self.term.term_id),
            name: Set(self.term.name.clone()),
            slug: Set(self.term.slug.clone()),
            term_group: Set(self.term.term_group),
        };
        term::Entity::update(term_update).exec(conn).await?;

        let tax_update = term_taxonomy::ActiveModel {
            term_taxonomy_id: Unchanged(self.tax.term_taxonomy_id),
            term_id: Unchanged(self.tax.term_id),
            taxonomy: Set(self.tax.taxonomy.clone()),
            description: Set(self.tax.description.clone()),
            parent: Set(self.tax.parent),
            count: Unchanged(self.tax.count),
        };
        term_taxonomy::Entity::update(tax_update).exec(conn).await?;

        Ok(())
    }

    /// 이 텀에 연결된 포스트들. 연결이 없으면 빈 벡터입니다.
    pub async fn posts<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<post::Model>> {
        Ok(self
            .tax
            .find_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(conn)
            .await?)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Term(term_id={}, term_taxonomy_id={}, taxonomy={:?}, name={:?}, slug={:?}, \
             parent={}, count={})",
            self.term.term_id,
            self.tax.term_taxonomy_id,
            self.tax.taxonomy,
            self.term.name,
            self.term.slug,
            self.tax.parent,
            self.tax.count,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Term operations
// ─────────────────────────────────────────────────────────────────────────────

/// 텀을 만듭니다.
///
/// 슬러그는 taxonomy와 무관하게 전역 유니크이므로, 같은 슬러그의 wp_terms
/// 행이 이미 있으면 그 행을 공유하고 wp_term_taxonomy 행만 새로 만듭니다.
/// 같은 `(term_id, taxonomy)` 쌍을 두 번 만들면 유니크 제약 위반이
/// 스토리지 에러 그대로 올라옵니다.
pub async fn create_term<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    slug: &str,
    taxonomy: &str,
) -> Result<Term> {
    let existing = term::Entity::find()
        .filter(term::Column::Slug.eq(slug))
        .one(conn)
        .await?;

    let term_row = match existing {
        Some(row) => row,
        None => {
            term::ActiveModel {
                name: Set(name.to_owned()),
                slug: Set(slug.to_owned()),
                term_group: Set(0),
                ..Default::default()
            }
            .insert(conn)
            .await?
        }
    };

    let tax_row = term_taxonomy::ActiveModel {
        term_id: Set(term_row.term_id),
        taxonomy: Set(taxonomy.to_owned()),
        description: Set(String::new()),
        parent: Set(0),
        count: Set(0),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    tracing::debug!(slug, taxonomy, term_taxonomy_id = tax_row.term_taxonomy_id, "term created");
    Ok(Term {
        term: term_row,
        tax: tax_row,
    })
}

/// `(taxonomy, slug)`로 텀을 찾습니다. 두 물리 테이블을 `term_id`로
/// 등치 조인합니다.
pub async fn find_term<C: ConnectionTrait>(
    conn: &C,
    taxonomy: &str,
    slug: &str,
) -> Result<Option<Term>> {
    let found = term_taxonomy::Entity::find()
        .find_also_related(term::Entity)
        .filter(term_taxonomy::Column::Taxonomy.eq(taxonomy))
        .filter(term::Column::Slug.eq(slug))
        .one(conn)
        .await?;

    match found {
        Some((tax, Some(term))) => Ok(Some(Term { term, tax })),
        Some((tax, None)) => Err(Error::DanglingTaxonomy {
            term_taxonomy_id: tax.term_taxonomy_id,
        }),
        None => Ok(None),
    }
}

/// 논리적 id(`term_taxonomy_id`)로 텀을 읽습니다.
pub async fn get_term<C: ConnectionTrait>(conn: &C, term_taxonomy_id: i64) -> Result<Option<Term>> {
    let found = term_taxonomy::Entity::find_by_id(term_taxonomy_id)
        .find_also_related(term::Entity)
        .one(conn)
        .await?;

    match found {
        Some((tax, Some(term))) => Ok(Some(Term { term, tax })),
        Some((tax, None)) => Err(Error::DanglingTaxonomy {
            term_taxonomy_id: tax.term_taxonomy_id,
        }),
        None => Ok(None),
    }
}

/// 포스트에 텀을 연결합니다. 이미 연결돼 있으면 join row를 중복 생성하지
/// 않고 false를 돌려줍니다.
pub async fn attach_term<C: ConnectionTrait>(conn: &C, post_id: i64, term: &Term) -> Result<bool> {
    let existing = term_relationship::Entity::find_by_id((post_id, term.id()))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    term_relationship::Entity::insert(term_relationship::ActiveModel {
        object_id: Set(post_id),
        term_taxonomy_id: Set(term.id()),
    })
    .exec(conn)
    .await?;

    refresh_count(conn, term.id()).await?;
    tracing::debug!(post_id, term_taxonomy_id = term.id(), "term attached");
    Ok(true)
}

/// 포스트에서 텀 연결을 제거합니다. 연결이 없었으면 false.
pub async fn detach_term<C: ConnectionTrait>(conn: &C, post_id: i64, term: &Term) -> Result<bool> {
    let res = term_relationship::Entity::delete_by_id((post_id, term.id()))
        .exec(conn)
        .await?;
    if res.rows_affected == 0 {
        return Ok(false);
    }

    refresh_count(conn, term.id()).await?;
    tracing::debug!(post_id, term_taxonomy_id = term.id(), "term detached");
    Ok(true)
}

/// 한 taxonomy 안에서 포스트의 텀 집합을 통째로 교체합니다.
///
/// 주어진 집합에 없는 기존 연결은 제거되고, 없는 연결은 추가됩니다.
/// 다른 taxonomy의 연결은 건드리지 않습니다.
pub async fn set_post_terms<C: ConnectionTrait>(
    conn: &C,
    post_id: i64,
    taxonomy: &str,
    terms: &[Term],
) -> Result<()> {
    for t in terms {
        if t.taxonomy() != taxonomy {
            return Err(Error::TaxonomyMismatch {
                slug: t.slug().to_owned(),
                expected: taxonomy.to_owned(),
                found: t.taxonomy().to_owned(),
            });
        }
    }

    let current: Vec<i64> = term_taxonomy::Entity::find()
        .join_rev(
            JoinType::InnerJoin,
            term_relationship::Relation::TermTaxonomy.def(),
        )
        .filter(term_relationship::Column::ObjectId.eq(post_id))
        .filter(term_taxonomy::Column::Taxonomy.eq(taxonomy))
        .all(conn)
        .await?
        .into_iter()
        .map(|tax| tax.term_taxonomy_id)
        .collect();

    let desired: BTreeSet<i64> = terms.iter().map(Term::id).collect();
    let current: BTreeSet<i64> = current.into_iter().collect();

    let mut touched = BTreeSet::new();

    for &ttid in current.difference(&desired) {
        term_relationship::Entity::delete_by_id((post_id, ttid))
            .exec(conn)
            .await?;
        touched.insert(ttid);
    }

    for &ttid in desired.difference(&current) {
        term_relationship::Entity::insert(term_relationship::ActiveModel {
            object_id: Set(post_id),
            term_taxonomy_id: Set(ttid),
        })
        .exec(conn)
        .await?;
        touched.insert(ttid);
    }

    for ttid in touched {
        refresh_count(conn, ttid).await?;
    }

    Ok(())
}

/// 포스트에 연결된 텀들. `taxonomy`를 주면 그 taxonomy로 한정합니다.
pub async fn terms_for_post<C: ConnectionTrait>(
    conn: &C,
    post_id: i64,
    taxonomy: Option<&str>,
) -> Result<Vec<Term>> {
    let mut select = term_taxonomy::Entity::find()
        .join_rev(
            JoinType::InnerJoin,
            term_relationship::Relation::TermTaxonomy.def(),
        )
        .filter(term_relationship::Column::ObjectId.eq(post_id))
        .order_by_asc(term_taxonomy::Column::TermTaxonomyId);
    if let Some(tax) = taxonomy {
        select = select.filter(term_taxonomy::Column::Taxonomy.eq(tax));
    }

    let rows = select.find_also_related(term::Entity).all(conn).await?;
    rows.into_iter()
        .map(|(tax, term)| match term {
            Some(term) => Ok(Term { term, tax }),
            None => Err(Error::DanglingTaxonomy {
                term_taxonomy_id: tax.term_taxonomy_id,
            }),
        })
        .collect()
}

/// 전체 텀 목록. `taxonomy`를 주면 그 taxonomy로 한정합니다.
pub async fn list_terms<C: ConnectionTrait>(
    conn: &C,
    taxonomy: Option<&str>,
) -> Result<Vec<Term>> {
    let mut select = term_taxonomy::Entity::find()
        .order_by_asc(term_taxonomy::Column::TermTaxonomyId);
    if let Some(tax) = taxonomy {
        select = select.filter(term_taxonomy::Column::Taxonomy.eq(tax));
    }

    let rows = select.find_also_related(term::Entity).all(conn).await?;
    rows.into_iter()
        .map(|(tax, term)| match term {
            Some(term) => Ok(Term { term, tax }),
            None => Err(Error::DanglingTaxonomy {
                term_taxonomy_id: tax.term_taxonomy_id,
            }),
        })
        .collect()
}

/// 텀을 삭제합니다.
///
/// wp_term_taxonomy 행과 그 join row들을 지웁니다. 공유될 수 있는
/// wp_terms 행은 남습니다 (정리는 호출자 책임).
pub async fn delete_term<C: ConnectionTrait>(conn: &C, term: &Term) -> Result<()> {
    term_relationship::Entity::delete_many()
        .filter(term_relationship::Column::TermTaxonomyId.eq(term.id()))
        .exec(conn)
        .await?;
    term_taxonomy::Entity::delete_by_id(term.id())
        .exec(conn)
        .await?;
    tracing::debug!(term_taxonomy_id = term.id(), "term deleted");
    Ok(())
}

/// `count`를 join row 수로 다시 계산합니다. 변경과 같은 트랜잭션 안에서
/// 호출됩니다.
async fn refresh_count<C: ConnectionTrait>(conn: &C, term_taxonomy_id: i64) -> Result<()> {
    let n = term_relationship::Entity::find()
        .filter(term_relationship::Column::TermTaxonomyId.eq(term_taxonomy_id))
        .count(conn)
        .await?;

    term_taxonomy::Entity::update(term_taxonomy::ActiveModel {
        term_taxonomy_id: Unchanged(term_taxonomy_id),
        count: Set(n as i64),
        ..Default::default()
    })
    .exec(conn)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term_row(term_id: i64, slug: &str) -> term::Model {
        term::Model {
            term_id,
            name: slug.to_owned(),
            slug: slug.to_owned(),
            term_group: 0,
        }
    }

    fn tax_row(term_taxonomy_id: i64, term_id: i64, taxonomy: &str) -> term_taxonomy::Model {
        term_taxonomy::Model {
            term_taxonomy_id,
            term_id,
            taxonomy: taxonomy.to_owned(),
            description: String::new(),
            parent: 0,
            count: 0,
        }
    }

    #[test]
    fn test_from_rows_rejects_mismatched_term_ids() {
        let err = Term::from_rows(term_row(1, "earth"), tax_row(10, 2, "elements"));
        assert!(matches!(
            err,
            Err(Error::TermRowMismatch {
                term_id: 1,
                taxonomy_term_id: 2
            })
        ));
    }

    #[test]
    fn test_accessors_route_to_backing_rows() {
        let mut term = Term::from_rows(term_row(1, "earth"), tax_row(10, 1, "elements")).unwrap();

        assert_eq!(term.key(), TermKey { term_id: 1, term_taxonomy_id: 10 });
        assert_eq!(term.id(), 10);
        assert_eq!(term.slug(), "earth");
        assert_eq!(term.taxonomy(), "elements");
        assert_eq!(term.parent(), None);

        term.set_name("Earth");
        term.set_description("the element of earth");
        term.set_parent(Some(4));

        let (term_row, tax_row) = term.into_rows();
        assert_eq!(term_row.name, "Earth");
        assert_eq!(tax_row.description, "the element of earth");
        assert_eq!(tax_row.parent, 4);
    }

    #[test]
    fn test_term_key_display() {
        let key = TermKey { term_id: 3, term_taxonomy_id: 7 };
        assert_eq!(key.to_string(), "term:3/7");
    }
}
