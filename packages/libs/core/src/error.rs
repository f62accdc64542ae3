//! 공통 에러 타입
//!
//! Presskit 전체에서 사용되는 에러 타입을 정의합니다.
//! 제약 위반(unique, not-null)은 변환 없이 스토리지 에러 그대로 노출됩니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Presskit 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Storage Errors (passed through untranslated)
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    // ─────────────────────────────────────────────────────────────────────────────
    // Taxonomy Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("term not found: {taxonomy}/{slug}")]
    TermNotFound { taxonomy: String, slug: String },

    #[error("term_taxonomy row {term_taxonomy_id} has no matching wp_terms row")]
    DanglingTaxonomy { term_taxonomy_id: i64 },

    #[error("term rows do not share a term_id: wp_terms has {term_id}, wp_term_taxonomy refers to {taxonomy_term_id}")]
    TermRowMismatch { term_id: i64, taxonomy_term_id: i64 },

    #[error("term '{slug}' belongs to taxonomy '{found}', expected '{expected}'")]
    TaxonomyMismatch {
        slug: String,
        expected: String,
        found: String,
    },
}
