use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, NewRoomNote, Room, RoomNote, RoomUpdate},
};

impl ApiClient {
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let builder = self.request(Method::GET, "/api/habitaciones").await;
        self.send_json(builder).await
    }

    pub async fn list_available_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let builder = self.request(Method::GET, "/api/habitaciones/disponibles").await;
        self.send_json(builder).await
    }

    pub async fn update_room(&self, id: i64, update: &RoomUpdate) -> Result<Room, ApiError> {
        let builder = self
            .request(Method::PATCH, &format!("/api/habitaciones/{}", id))
            .await
            .json(update);
        self.send_json(builder).await
    }

    pub async fn list_room_notes(&self, room_id: i64) -> Result<Vec<RoomNote>, ApiError> {
        let builder = self
            .request(Method::GET, &format!("/api/observaciones/habitacion/{}", room_id))
            .await;
        self.send_json(builder).await
    }

    pub async fn create_room_note(&self, note: &NewRoomNote) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/observaciones")
            .await
            .json(note);
        self.send_empty(builder).await
    }

    pub async fn delete_room_note(&self, id: i64) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/api/observaciones/{}", id))
            .await;
        self.send_empty(builder).await
    }
}
