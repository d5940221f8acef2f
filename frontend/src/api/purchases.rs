use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, NewPurchaseDetail, Purchase, PurchaseDetail},
};

impl ApiClient {
    pub async fn purchase_for_reservation(&self, reservation_id: i64) -> Result<Purchase, ApiError> {
        let builder = self
            .request(
                Method::GET,
                &format!("/api/compras/por-reserva/{}", reservation_id),
            )
            .await;
        self.send_json(builder).await
    }

    pub async fn purchase_details(&self, purchase_id: i64) -> Result<Vec<PurchaseDetail>, ApiError> {
        let builder = self
            .request(Method::GET, &format!("/api/compras/detalles/{}", purchase_id))
            .await;
        self.send_json(builder).await
    }

    pub async fn add_purchase_detail(
        &self,
        purchase_id: i64,
        line: &NewPurchaseDetail,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, &format!("/api/compras/{}/detalles", purchase_id))
            .await
            .json(line);
        self.send_empty(builder).await
    }
}
