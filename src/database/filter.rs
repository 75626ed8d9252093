//! Relational post-filter applied to the ids the model matched

use std::collections::HashMap;

use sqlx::QueryBuilder;
use sqlx::Sqlite;

use super::properties::push_price_bounds;
use super::PropertyStore;
use super::PROPERTY_COLUMNS;
use crate::models::PriceFilter;
use crate::models::Property;
use crate::models::SortOrder;
use crate::Result;

impl PropertyStore {
    /// Keep the records among `ids` whose price satisfies `filter`.
    ///
    /// Ordered by price when a sort key is set, otherwise in the order of
    /// `ids`. Inverted bounds fail before any query runs.
    pub async fn filter_ids(&self, ids: &[String], filter: &PriceFilter) -> Result<Vec<Property>> {
        filter.check()?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE unique_property_id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        push_price_bounds(&mut builder, filter.min_price, filter.max_price);

        match filter.sort_by {
            Some(SortOrder::PriceAsc) => {
                builder.push(" ORDER BY price ASC, unique_property_id ASC");
            }
            Some(SortOrder::PriceDesc) => {
                builder.push(" ORDER BY price DESC, unique_property_id ASC");
            }
            None => {}
        }

        let mut rows = builder
            .build_query_as::<Property>()
            .fetch_all(&self.pool)
            .await?;

        if filter.sort_by.is_none() {
            let position: HashMap<&str, usize> = ids
                .iter()
                .enumerate()
                .rev()
                .map(|(idx, id)| (id.as_str(), idx))
                .collect();
            rows.sort_by_key(|p| {
                position
                    .get(p.unique_property_id.as_str())
                    .copied()
                    .unwrap_or(usize::MAX)
            });
        }

        tracing::debug!(
            "Relational filter kept {} of {} ids (min={:?}, max={:?}, sort={:?})",
            rows.len(),
            ids.len(),
            filter.min_price,
            filter.max_price,
            filter.sort_by
        );

        Ok(rows)
    }
}
