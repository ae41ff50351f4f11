use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An employee of the business. The email doubles as the identity key of the
/// employee document and of the availability document; it never changes after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "name": "Alice Example",
        "email": "alice@example.com",
        "address": "1 Main Street, Springfield",
        "date_of_birth": "1993-04-12",
        "emergency_contact": "+4712345678"
    })
)]
pub struct Employee {
    #[schema(example = "Alice Example")]
    pub name: String,

    #[schema(example = "alice@example.com")]
    pub email: String,

    #[schema(example = "1 Main Street, Springfield")]
    pub address: String,

    #[schema(example = "1993-04-12", value_type = String, format = "date")]
    pub date_of_birth: NaiveDate,

    #[schema(example = "+4712345678")]
    pub emergency_contact: String,
}
