use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "amenity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::amenity_listing::Entity")]
    AmenityListing,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        super::amenity_listing::Relation::Listing.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::amenity_listing::Relation::Amenity.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
