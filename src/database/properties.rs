use sqlx::QueryBuilder;
use sqlx::Sqlite;

use super::PropertyStore;
use super::PROPERTY_COLUMNS;
use crate::models::Property;
use crate::models::PropertyListQuery;
use crate::Result;

impl PropertyStore {
    /// Look up one property by its unique id
    pub async fn get_property(&self, property_id: &str) -> Result<Option<Property>> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE unique_property_id = ?");
        let property = sqlx::query_as::<_, Property>(&sql)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    /// Page through properties with optional price bounds.
    ///
    /// Returns the page and the total number of rows matching the bounds.
    pub async fn list_properties(&self, query: &PropertyListQuery) -> Result<(Vec<Property>, i64)> {
        let mut select = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE 1=1"
        ));
        push_price_bounds(&mut select, query.min_price, query.max_price);
        select
            .push(" ORDER BY rowid LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let properties = select
            .build_query_as::<Property>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM properties WHERE 1=1");
        push_price_bounds(&mut count, query.min_price, query.max_price);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((properties, total))
    }

    /// Insert or replace a property record
    pub async fn insert_property(&self, property: &Property) -> Result<()> {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO properties ({PROPERTY_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&property.unique_property_id)
        .bind(&property.project_name)
        .bind(&property.location)
        .bind(property.price)
        .bind(&property.area)
        .bind(&property.property_type)
        .bind(&property.pincode)
        .bind(&property.landmark)
        .bind(&property.amenities)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

pub(super) fn push_price_bounds(
    builder: &mut QueryBuilder<'_, Sqlite>,
    min_price: Option<i64>,
    max_price: Option<i64>,
) {
    if let Some(min) = min_price {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
}
