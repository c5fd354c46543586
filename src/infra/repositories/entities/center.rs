//! Center database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::{Center, Charge, OperatingTime};

/// `img_list` JSONB column
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ImageList(pub Vec<String>);

/// `operating_time` JSONB column
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OperatingTimeList(pub Vec<OperatingTime>);

/// `charge` JSONB column
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ChargeList(pub Vec<Charge>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "centers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub img_list: ImageList,
    #[sea_orm(column_type = "JsonBinary")]
    pub operating_time: OperatingTimeList,
    pub facilities: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub charge: ChargeList,
    pub hold_info_img: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::center_review::Entity")]
    CenterReview,
}

impl Related<super::center_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CenterReview.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Center {
    fn from(model: Model) -> Self {
        Center {
            id: model.id,
            name: model.name,
            address: model.address,
            tel: model.tel,
            web_url: model.web_url,
            instagram_url: model.instagram_url,
            youtube_url: model.youtube_url,
            img_list: model.img_list.0,
            operating_time: model.operating_time.0,
            facilities: model.facilities,
            charge: model.charge.0,
            hold_info_img: model.hold_info_img,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
