use super::PropertyStore;
use crate::models::PropertyStats;
use crate::models::PropertyTypeCount;
use crate::Result;

impl PropertyStore {
    /// Aggregate statistics over all listings
    pub async fn stats(&self) -> Result<PropertyStats> {
        let total_properties = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;

        let average_price = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(price) FROM properties WHERE price IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let (min_price, max_price) = sqlx::query_as::<_, (Option<i64>, Option<i64>)>(
            "SELECT MIN(price), MAX(price) FROM properties WHERE price IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let property_types = sqlx::query_as::<_, (Option<String>, i64)>(
            r"
            SELECT property_type, COUNT(*) AS count
            FROM properties
            GROUP BY property_type
            ORDER BY count DESC, property_type ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(property_type, count)| PropertyTypeCount {
            property_type,
            count,
        })
        .collect();

        Ok(PropertyStats {
            total_properties,
            average_price: average_price.map(round_to_cents),
            min_price,
            max_price,
            property_types,
        })
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use crate::database::test_support::property;
    use crate::database::test_support::seeded_store;
    use crate::database::PropertyStore;

    #[tokio::test]
    async fn test_stats_over_seeded_store() {
        let store = seeded_store(&[
            property("A", "3BHK", Some(100)),
            property("B", "3BHK", Some(201)),
            property("C", "2BHK", Some(300)),
            property("D", "1BHK", None),
        ])
        .await;

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_properties, 4);
        assert_eq!(stats.min_price, Some(100));
        assert_eq!(stats.max_price, Some(300));
        assert_eq!(stats.average_price, Some(200.33));

        let types: Vec<_> = stats
            .property_types
            .iter()
            .map(|t| (t.property_type.as_deref(), t.count))
            .collect();
        assert_eq!(
            types,
            vec![(Some("3BHK"), 2), (Some("1BHK"), 1), (Some("2BHK"), 1)]
        );
    }

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let store = PropertyStore::in_memory().await.unwrap();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_properties, 0);
        assert_eq!(stats.average_price, None);
        assert_eq!(stats.min_price, None);
        assert!(stats.property_types.is_empty());
    }
}
