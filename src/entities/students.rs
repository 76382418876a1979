use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Guardian
    pub user_id: i64,
    pub birth_date: Option<NaiveDate>,
    pub shift: Option<String>,
    pub reference_photo_url: Option<String>,
    /// "{school} - {class} ({shift})" as typed at registration
    pub school_course: Option<String>,
    pub class_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::photo_students::Entity")]
    PhotoStudents,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::photo_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhotoStudents.def()
    }
}

impl Related<super::photos::Entity> for Entity {
    fn to() -> RelationDef {
        super::photo_students::Relation::Photo.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::photo_students::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
