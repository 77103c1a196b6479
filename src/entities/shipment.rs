use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of shipment lifecycle labels. Unknown values are rejected at the
/// input boundary during request deserialization.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShipmentStatus {
    #[sea_orm(string_value = "created")]
    Created,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "transit")]
    Transit,
    #[sea_orm(string_value = "in_transit")]
    InTransit,
    #[sea_orm(string_value = "inbound_scan")]
    InboundScan,
    #[sea_orm(string_value = "delivery")]
    Delivery,
    #[sea_orm(string_value = "scanned")]
    Scanned,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "canceled")]
    Canceled,
    #[sea_orm(string_value = "returned")]
    Returned,
    #[sea_orm(string_value = "lost")]
    Lost,
}

/// Shipment entity model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tracking_number: String,
    pub carrier: String,
    pub sender_address: String,
    pub receiver_address: String,
    pub status: ShipmentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article::Entity")]
    Articles,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Articles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_labels() {
        for (label, status) in [
            ("in_transit", ShipmentStatus::InTransit),
            ("inbound_scan", ShipmentStatus::InboundScan),
            ("canceled", ShipmentStatus::Canceled),
        ] {
            assert_eq!(label.parse::<ShipmentStatus>().unwrap(), status);
            assert_eq!(status.to_string(), label);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("teleported".parse::<ShipmentStatus>().is_err());
        assert!(serde_json::from_str::<ShipmentStatus>("\"teleported\"").is_err());
    }
}
