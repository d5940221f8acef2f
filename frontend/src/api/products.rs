use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, Product, ProductInput},
};

impl ApiClient {
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let builder = self.request(Method::GET, "/api/productos").await;
        self.send_json(builder).await
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/api/productos").await.json(input);
        self.send_empty(builder).await
    }

    pub async fn update_product(&self, id: i64, input: &ProductInput) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/api/productos/{}", id))
            .await
            .json(input);
        self.send_empty(builder).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/api/productos/{}", id))
            .await;
        self.send_empty(builder).await
    }
}
