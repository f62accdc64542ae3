use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wp_options")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub option_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub blog_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub option_name: String,
    pub option_value: String,
    pub autoload: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Option(option_id={}, blog_id={}, option_name={:?}, option_value={:?}, autoload={:?})",
            self.option_id, self.blog_id, self.option_name, self.option_value, self.autoload,
        )
    }
}
