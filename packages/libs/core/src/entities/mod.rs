//! WordPress 테이블별 엔티티 정의
//!
//! 테이블/컬럼 이름은 기존 WordPress 데이터베이스와의 호환을 위해
//! 원래 스키마 그대로 유지합니다.

pub mod comment;
pub mod link;
pub mod option;
pub mod post;
pub mod postmeta;
pub mod term;
pub mod term_relationship;
pub mod term_taxonomy;
pub mod user;
pub mod usermeta;

pub mod prelude {
    pub use super::comment::Entity as Comments;
    pub use super::link::Entity as Links;
    pub use super::option::Entity as Options;
    pub use super::post::Entity as Posts;
    pub use super::postmeta::Entity as PostMeta;
    pub use super::term::Entity as Terms;
    pub use super::term_relationship::Entity as TermRelationships;
    pub use super::term_taxonomy::Entity as TermTaxonomies;
    pub use super::user::Entity as Users;
    pub use super::usermeta::Entity as UserMeta;
}
