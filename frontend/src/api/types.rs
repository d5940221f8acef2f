use chrono::NaiveDate;
use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::time::parse_date_prefix;

/// The two roles the backend hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "EMPLEADO", alias = "EMPLOYEE")]
    Employee,
}

impl Role {
    /// Missing or unknown roles fall back to `Employee`, the least privileged.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_uppercase()) {
            Some(value) if value == "ADMIN" => Role::Admin,
            Some(value) if value == "EMPLEADO" || value == "EMPLOYEE" => Role::Employee,
            Some(other) => {
                log::warn!("unrecognised role {:?} from server, treating as EMPLEADO", other);
                Role::Employee
            }
            None => {
                log::warn!("server omitted the role, treating as EMPLEADO");
                Role::Employee
            }
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLEADO",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Accepts `"101"` as well as `101` for identifiers the backend is loose about.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/auth/login`. Every field is optional on the wire; a
/// response without `token` is treated as a failed login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "nombreCompleto")]
    pub full_name: Option<String>,
    #[serde(default, rename = "rol")]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "cedula")]
    pub national_id: Option<String>,
}

/// Body of `GET /api/auth/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, alias = "nombreUsuario")]
    pub username: Option<String>,
    #[serde(default, rename = "nombreCompleto")]
    pub full_name: Option<String>,
    #[serde(default, rename = "rol")]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "cedula")]
    pub national_id: Option<String>,
}

/// The authenticated principal as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub email: Option<String>,
    pub national_id: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| Some(self.username.as_str()).filter(|name| !name.is_empty()))
            .unwrap_or("admin")
    }
}

impl From<LoginResponse> for SessionUser {
    fn from(response: LoginResponse) -> Self {
        Self {
            role: Role::from_wire(response.role.as_deref()),
            username: response.username.unwrap_or_default(),
            full_name: response.full_name,
            email: response.email,
            national_id: response.national_id,
        }
    }
}

impl From<UserProfile> for SessionUser {
    fn from(profile: UserProfile) -> Self {
        Self {
            role: Role::from_wire(profile.role.as_deref()),
            username: profile.username.unwrap_or_default(),
            full_name: profile.full_name,
            email: profile.email,
            national_id: profile.national_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "idEmpleado")]
    pub id: i64,
    #[serde(rename = "nombreUsuario")]
    pub username: String,
    #[serde(default, rename = "nombreCompleto")]
    pub full_name: Option<String>,
    #[serde(default, rename = "cedula")]
    pub national_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "rol")]
    pub role: Option<String>,
}

impl Employee {
    pub fn role(&self) -> Role {
        Role::from_wire(self.role.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    #[serde(rename = "nombreUsuario")]
    pub username: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPasswordReset {
    pub id: i64,
    #[serde(rename = "nuevaPassword")]
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, rename = "idHabitacion")]
    pub id: i64,
    #[serde(default, rename = "numero", deserialize_with = "string_or_number")]
    pub number: Option<String>,
    #[serde(default, rename = "estado")]
    pub state: Option<String>,
    #[serde(default, rename = "personas")]
    pub capacity: Option<u32>,
    #[serde(default, rename = "precio")]
    pub price: Option<f64>,
    #[serde(default, rename = "imagenUrl")]
    pub image_url: Option<String>,
}

/// Body of `PATCH /api/habitaciones/{id}`; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "personas", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "imagenUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl RoomUpdate {
    /// Employees may only change the room state.
    pub fn restricted_to(self, role: Role) -> Self {
        if role.is_admin() {
            return self;
        }
        Self {
            state: self.state,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomNote {
    #[serde(rename = "idObservacion")]
    pub id: i64,
    #[serde(default, rename = "comentario")]
    pub comment: String,
    #[serde(default, rename = "fecha")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoomNote {
    #[serde(rename = "idHabitacion")]
    pub room_id: i64,
    #[serde(rename = "comentario")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "idProducto")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default, rename = "idHuesped")]
    pub id: i64,
    #[serde(default, rename = "nombres")]
    pub first_names: String,
    #[serde(default, rename = "apellidos")]
    pub last_names: Option<String>,
    #[serde(default, rename = "cedula")]
    pub national_id: Option<String>,
}

impl Guest {
    pub fn full_name(&self) -> String {
        match self.last_names.as_deref().filter(|s| !s.is_empty()) {
            Some(last) => format!("{} {}", self.first_names, last),
            None => self.first_names.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "idReserva")]
    pub id: i64,
    #[serde(rename = "fechaEntrada")]
    pub entry: String,
    #[serde(rename = "fechaSalida")]
    pub exit: String,
    #[serde(default, rename = "cantidadAcompanantes")]
    pub companions: Option<u32>,
    #[serde(default, rename = "precioTotalHabitacion")]
    pub room_total: Option<f64>,
    #[serde(default, rename = "habitacion")]
    pub room: Option<Room>,
    #[serde(default, rename = "huesped")]
    pub guest: Option<Guest>,
}

impl Reservation {
    pub fn entry_date(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.entry)
    }

    pub fn exit_date(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.exit)
    }

    /// Whether the stay covers `day`, both ends inclusive.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        match (self.entry_date(), self.exit_date()) {
            (Some(entry), Some(exit)) => entry <= day && day <= exit,
            _ => false,
        }
    }

    pub fn room_number(&self) -> &str {
        self.room
            .as_ref()
            .and_then(|room| room.number.as_deref())
            .unwrap_or("—")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "fechaEntrada")]
    pub entry: NaiveDate,
    #[serde(rename = "fechaSalida")]
    pub exit: NaiveDate,
    #[serde(rename = "cantidadAcompanantes")]
    pub companions: u32,
    #[serde(rename = "idHabitacion")]
    pub room_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(rename = "idCompra")]
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseDetail {
    #[serde(default, rename = "idDetalle")]
    pub id: i64,
    #[serde(default, rename = "nombreProducto")]
    pub product_name: String,
    #[serde(default, rename = "cantidad")]
    pub quantity: u32,
    #[serde(default)]
    pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchaseDetail {
    #[serde(rename = "idProducto")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// One row of `GET /api/reportes/dia`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReportItem {
    #[serde(default, rename = "idReserva")]
    pub reservation_id: Option<i64>,
    #[serde(default, rename = "idCompra")]
    pub purchase_id: Option<i64>,
    #[serde(default, rename = "huesped")]
    pub guest: Option<String>,
    #[serde(default, rename = "cedula")]
    pub national_id: Option<String>,
    #[serde(default, rename = "habitacion", deserialize_with = "string_or_number")]
    pub room: Option<String>,
    #[serde(default, rename = "fechaEntrada")]
    pub entry: Option<String>,
    #[serde(default, rename = "fechaSalida")]
    pub exit: Option<String>,
    #[serde(default, rename = "costoHabitacion")]
    pub room_cost: f64,
    #[serde(default, rename = "totalServicios")]
    pub services_total: f64,
    #[serde(default, rename = "totalFinal")]
    pub grand_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Products,
    Occupancy,
    Income,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Products,
        ReportKind::Occupancy,
        ReportKind::Income,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ReportKind::Products => "/api/reportes/pdf/productos",
            ReportKind::Occupancy => "/api/reportes/pdf/ocupacion",
            ReportKind::Income => "/api/reportes/pdf/ingresos",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Products => "Productos",
            ReportKind::Occupancy => "Ocupación",
            ReportKind::Income => "Ingresos",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::Products => "reporte-productos.pdf",
            ReportKind::Occupancy => "reporte-ocupacion.pdf",
            ReportKind::Income => "reporte-ingresos.pdf",
        }
    }
}

/// Every failure the client can report. Serializable so it can travel
/// through Leptos resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    #[error("Sesión expirada o no autorizada")]
    Unauthorized,
    #[error("{}", http_message(.status, .message))]
    Http { status: u16, message: Option<String> },
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),
    #[error("Respuesta inesperada del servidor: {0}")]
    Decode(String),
    #[error("Almacenamiento no disponible: {0}")]
    Storage(String),
}

fn http_message(status: &u16, message: &Option<String>) -> String {
    message
        .clone()
        .unwrap_or_else(|| format!("Error {}", status))
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.to_string().into_view()
    }
}
