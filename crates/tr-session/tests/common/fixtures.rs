use serde_json::{Value, json};

/// Identity payload as the dashboard endpoint returns it
pub fn user_json(id: u64) -> Value {
    json!({
        "id": id,
        "first_name": "Ada",
        "last_name": "Obi",
        "email": "ada@example.com",
        "phone_number": "08012345678",
        "role": "Tailor",
        "location": "Lagos",
        "about_me": "Bespoke suits",
        "date_joined": "2024-01-01T00:00:00Z"
    })
}

/// Login / OTP verify response body
pub fn auth_body(access: &str, refresh: &str, user_id: u64) -> Value {
    json!({
        "message": "User logged in successfully",
        "access": access,
        "refresh": refresh,
        "user": {
            "id": user_id,
            "email": "a@b.com",
            "phone_number": null,
            "role": "Customer"
        }
    })
}
