//! Authorized calls for the marketplace data the application displays.
//!
//! These carry no session invariants of their own; they only read the
//! currently attached token at the moment the request is built.

use crate::{
    api::requests::NewBooking,
    session::{
        error::{Result as SessionResult, SessionError},
        manager::SessionManager,
    },
};

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const PROFESSIONALS_PATH: &str = "/profiles/professionals/";
const BOOKINGS_PATH: &str = "/bookings/";
const PROFESSIONAL_BOOKINGS_PATH: &str = "/bookings/professional/";
const CUSTOMER_DASHBOARD_PATH: &str = "/bookings/customer/dashboard/";
const PROFESSIONAL_DASHBOARD_PATH: &str = "/bookings/dashboard/";
const PRODUCTS_PATH: &str = "/marketplace/products/";
const SERVICES_PATH: &str = "/marketplace/services/";

const MSG_REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        })
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "accepted" | "accept" => Ok(BookingStatus::Accepted),
            "rejected" | "reject" => Ok(BookingStatus::Rejected),
            other => Err(format!(
                "unknown booking status '{other}' (expected pending, accepted or rejected)"
            )),
        }
    }
}

impl SessionManager {
    async fn authorized_get(&self, path: &str) -> SessionResult<Value> {
        let access = self.access_token();
        self.api
            .get(path, access.as_deref())
            .await
            .map_err(|e| SessionError::from_client(e, MSG_REQUEST_FAILED))
    }

    async fn authorized_send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> SessionResult<Value> {
        let access = self.access_token();
        self.api
            .send_json(method, path, access.as_deref(), body)
            .await
            .map_err(|e| SessionError::from_client(e, MSG_REQUEST_FAILED))
    }

    // =========================================================================
    // Professionals
    // =========================================================================

    /// Tailors and fashion designers open for bookings
    pub async fn list_professionals(&self) -> SessionResult<Value> {
        self.authorized_get(PROFESSIONALS_PATH).await
    }

    // =========================================================================
    // Bookings
    // =========================================================================

    /// Bookings the current user made as a customer
    pub async fn list_bookings(&self) -> SessionResult<Value> {
        self.authorized_get(BOOKINGS_PATH).await
    }

    /// Bookings addressed to the current user as a professional
    pub async fn list_professional_bookings(&self) -> SessionResult<Value> {
        self.authorized_get(PROFESSIONAL_BOOKINGS_PATH).await
    }

    pub async fn get_booking(&self, id: u64) -> SessionResult<Value> {
        self.authorized_get(&format!("{BOOKINGS_PATH}{id}/")).await
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> SessionResult<Value> {
        self.authorized_send(Method::POST, BOOKINGS_PATH, booking)
            .await
    }

    pub async fn update_booking_status(
        &self,
        id: u64,
        status: BookingStatus,
    ) -> SessionResult<Value> {
        #[derive(Serialize)]
        struct StatusUpdate {
            status: BookingStatus,
        }

        self.authorized_send(
            Method::PATCH,
            &format!("{BOOKINGS_PATH}{id}/update-status/"),
            &StatusUpdate { status },
        )
        .await
    }

    pub async fn cancel_booking(&self, id: u64) -> SessionResult<Value> {
        let access = self.access_token();
        self.api
            .delete(&format!("{BOOKINGS_PATH}{id}/"), access.as_deref())
            .await
            .map_err(|e| SessionError::from_client(e, MSG_REQUEST_FAILED))
    }

    /// Booking counters; professionals and customers get different views
    pub async fn booking_summary(&self, as_professional: bool) -> SessionResult<Value> {
        let path = if as_professional {
            PROFESSIONAL_DASHBOARD_PATH
        } else {
            CUSTOMER_DASHBOARD_PATH
        };
        self.authorized_get(path).await
    }

    // =========================================================================
    // Marketplace
    // =========================================================================

    pub async fn list_products(&self) -> SessionResult<Value> {
        self.authorized_get(PRODUCTS_PATH).await
    }

    pub async fn list_services(&self) -> SessionResult<Value> {
        self.authorized_get(SERVICES_PATH).await
    }
}
