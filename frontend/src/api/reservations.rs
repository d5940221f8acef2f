use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, Guest, NewReservation, Reservation},
};

impl ApiClient {
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        let builder = self.request(Method::GET, "/api/reservas").await;
        self.send_json(builder).await
    }

    /// The backend registers the guest on the fly when the ID card is new.
    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/reservas")
            .await
            .json(reservation);
        self.send_empty(builder).await
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/api/reservas/{}", id))
            .await;
        self.send_empty(builder).await
    }

    pub async fn list_guests(&self) -> Result<Vec<Guest>, ApiError> {
        let builder = self.request(Method::GET, "/api/huespedes").await;
        self.send_json(builder).await
    }
}
