use crate::db::DbPool;
use crate::entities::shipment::ShipmentStatus;
use crate::entities::{article, shipment};
use crate::errors::ServiceError;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};

/// Input for a new shipment row
#[derive(Debug, Clone)]
pub struct NewShipment {
    pub tracking_number: String,
    pub carrier: String,
    pub sender_address: String,
    pub receiver_address: String,
    pub status: ShipmentStatus,
}

/// Input for a new article row, created only alongside its shipment
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub name: String,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub sku: String,
}

/// A shipment with its eagerly loaded articles
pub type ShipmentWithArticles = (shipment::Model, Vec<article::Model>);

/// Service for storing and reading shipments with their articles
#[derive(Clone)]
pub struct ShipmentService {
    db_pool: Arc<DbPool>,
}

impl ShipmentService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists shipments with articles, optionally filtered by exact carrier
    #[instrument(skip(self))]
    pub async fn list_shipments(
        &self,
        carrier: Option<&str>,
    ) -> Result<Vec<ShipmentWithArticles>, ServiceError> {
        let mut query = shipment::Entity::find();
        if let Some(carrier) = carrier {
            query = query.filter(shipment::Column::Carrier.eq(carrier));
        }

        let shipments = query
            .find_with_related(article::Entity)
            .all(&*self.db_pool)
            .await?;

        Ok(shipments)
    }

    /// Fetches one shipment with articles by exact tracking number
    #[instrument(skip(self))]
    pub async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<ShipmentWithArticles>, ServiceError> {
        let mut found = shipment::Entity::find()
            .filter(shipment::Column::TrackingNumber.eq(tracking_number))
            .find_with_related(article::Entity)
            .all(&*self.db_pool)
            .await?;

        Ok(found.pop())
    }

    /// Creates a shipment and its articles atomically. The parent row is
    /// inserted first so its generated id is available for the children;
    /// either all rows become visible or none do.
    #[instrument(skip(self, new_shipment, articles))]
    pub async fn create_shipment(
        &self,
        new_shipment: NewShipment,
        articles: Vec<NewArticle>,
    ) -> Result<ShipmentWithArticles, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let created = shipment::ActiveModel {
            tracking_number: Set(new_shipment.tracking_number),
            carrier: Set(new_shipment.carrier),
            sender_address: Set(new_shipment.sender_address),
            receiver_address: Set(new_shipment.receiver_address),
            status: Set(new_shipment.status),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut created_articles = Vec::with_capacity(articles.len());
        for new_article in articles {
            let created_article = article::ActiveModel {
                shipment_id: Set(created.id),
                name: Set(new_article.name),
                quantity: Set(new_article.quantity),
                price: Set(new_article.price),
                sku: Set(new_article.sku),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            created_articles.push(created_article);
        }

        txn.commit().await?;

        info!(
            shipment_id = created.id,
            tracking_number = %created.tracking_number,
            article_count = created_articles.len(),
            "created shipment"
        );

        Ok((created, created_articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn test_service() -> ShipmentService {
        // A single connection keeps every query on the same in-memory database.
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();
        crate::migrator::Migrator::up(&db, None).await.unwrap();
        ShipmentService::new(Arc::new(db))
    }

    fn sample_shipment(tracking_number: &str, carrier: &str) -> NewShipment {
        NewShipment {
            tracking_number: tracking_number.to_string(),
            carrier: carrier.to_string(),
            sender_address: "Street 10, 75001 Paris, France".to_string(),
            receiver_address: "Lisa-Fittko-Str 13, 10557 Berlin, Germany".to_string(),
            status: ShipmentStatus::InTransit,
        }
    }

    #[tokio::test]
    async fn create_then_find_returns_articles_in_order() {
        let svc = test_service().await;
        let articles = vec![
            NewArticle {
                name: "Laptop".into(),
                quantity: Some(1),
                price: Some(800.0),
                sku: "LP123".into(),
            },
            NewArticle {
                name: "Mouse".into(),
                quantity: Some(1),
                price: Some(25.0),
                sku: "MO456".into(),
            },
        ];

        let (created, created_articles) = svc
            .create_shipment(sample_shipment("TN12345678", "DHL"), articles)
            .await
            .unwrap();
        assert_eq!(created_articles.len(), 2);
        assert!(created_articles.iter().all(|a| a.shipment_id == created.id));

        let (found, found_articles) = svc
            .find_by_tracking_number("TN12345678")
            .await
            .unwrap()
            .expect("shipment should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found_articles.len(), 2);
        assert_eq!(found_articles[0].name, "Laptop");
        assert_eq!(found_articles[1].sku, "MO456");
    }

    #[tokio::test]
    async fn duplicate_tracking_number_is_a_database_error() {
        let svc = test_service().await;
        svc.create_shipment(sample_shipment("TN1", "DHL"), vec![])
            .await
            .unwrap();
        let err = svc
            .create_shipment(sample_shipment("TN1", "UPS"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn carrier_filter_matches_exactly() {
        let svc = test_service().await;
        svc.create_shipment(sample_shipment("TN1", "DHL"), vec![])
            .await
            .unwrap();
        svc.create_shipment(sample_shipment("TN2", "UPS"), vec![])
            .await
            .unwrap();

        let all = svc.list_shipments(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let dhl = svc.list_shipments(Some("DHL")).await.unwrap();
        assert_eq!(dhl.len(), 1);
        assert_eq!(dhl[0].0.tracking_number, "TN1");

        let none = svc.list_shipments(Some("dhl")).await.unwrap();
        assert!(none.is_empty());
    }
}
