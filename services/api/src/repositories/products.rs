//! Product catalog repository

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewProduct, Product, UpdateProduct};

const PRODUCT_COLUMNS: &str =
    "id, name, price, description, image, stock, category, created_at, updated_at";

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
        description: row.get("description"),
        image: row.get("image"),
        stock: row.get("stock"),
        category: row.get("category"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Default catalog seeded by `POST /api/admin/seed-products`.
fn default_products() -> Vec<NewProduct> {
    let entries = [
        ("Sugar Thekua", 150.0, "Traditional sweet Thekua with sugar", "/sugar.jpeg", 100, "Traditional"),
        ("Flavoured Thekua", 180.0, "Thekua with various flavors", "/flavour.webp", 80, "Flavoured"),
        ("Mango Thekua", 200.0, "Delicious mango flavored Thekua", "/fruit.jpeg", 60, "Fruit"),
        ("Orange Thekua", 190.0, "Tangy orange essence Thekua", "/fruit.jpeg", 60, "Fruit"),
        ("Apple Thekua", 195.0, "Sweet apple flavor Thekua", "/fruit.jpeg", 60, "Fruit"),
        ("Banana Thekua", 185.0, "Creamy banana taste Thekua", "/fruit.jpeg", 60, "Fruit"),
        ("Dry Fruit Thekua", 250.0, "Rich dry fruits Thekua", "/dryfruit.jpg", 50, "Premium"),
        ("Cardamom Thekua", 170.0, "Aromatic cardamom Thekua", "/cardamom.jpeg", 70, "Spice"),
        ("Coconut Thekua", 160.0, "Tropical coconut Thekua", "/coconut.jpg", 70, "Tropical"),
    ];

    entries
        .into_iter()
        .map(|(name, price, description, image, stock, category)| NewProduct {
            name: name.to_string(),
            price,
            description: description.to_string(),
            image: image.to_string(),
            stock,
            category: category.to_string(),
        })
        .collect()
}

/// Product repository
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all products
    pub async fn list(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(product_from_row))
    }

    /// Create a new product
    pub async fn create(&self, payload: &NewProduct) -> Result<Product> {
        info!("Creating product: {}", payload.name);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (name, price, description, image, stock, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&payload.name)
        .bind(payload.price)
        .bind(&payload.description)
        .bind(&payload.image)
        .bind(payload.stock)
        .bind(&payload.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(product_from_row(&row))
    }

    /// Partially update a product; `None` when the product does not exist
    pub async fn update(&self, id: Uuid, payload: &UpdateProduct) -> Result<Option<Product>> {
        info!("Updating product: {}", id);

        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                stock = COALESCE($6, stock),
                category = COALESCE($7, category),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(payload.price)
        .bind(&payload.description)
        .bind(&payload.image)
        .bind(payload.stock)
        .bind(&payload.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(product_from_row))
    }

    /// Delete a product; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        info!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert the default catalog, skipping products whose name already
    /// exists. Returns the number of products created.
    pub async fn seed_defaults(&self) -> Result<u64> {
        let mut created = 0;

        for product in default_products() {
            let result = sqlx::query(
                r#"
                INSERT INTO products (name, price, description, image, stock, category)
                SELECT $1, $2, $3, $4, $5, $6
                WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
                "#,
            )
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.image)
            .bind(product.stock)
            .bind(&product.category)
            .execute(&self.pool)
            .await?;

            created += result.rows_affected();
        }

        info!("Seeded {} default products", created);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_nine_unique_products() {
        let products = default_products();
        assert_eq!(products.len(), 9);

        let mut names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 9);

        assert!(products.iter().all(|p| p.price > 0.0 && p.stock > 0));
    }
}
