use serde::Deserialize;
use validator::Validate;

/// Checkout details. Validated only; nothing persists or processes orders.
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct OrderForm {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 15))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    #[validate(length(min = 1, max = 10))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 50))]
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> OrderForm {
        OrderForm {
            first_name: "Sara".into(),
            last_name: "Karimi".into(),
            email: "sara@example.com".into(),
            phone: "+989121234567".into(),
            address: "12 Valiasr St".into(),
            city: "Tehran".into(),
            postal_code: "1234567890".into(),
            country: "Iran".into(),
        }
    }

    #[test]
    fn test_valid_order_form() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_order_form_rejects_bad_fields() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        form.postal_code = "12345678901".into();
        form.phone = "0".repeat(16);

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("postal_code"));
        assert!(fields.contains_key("phone"));
        assert!(!fields.contains_key("city"));
    }

    #[test]
    fn test_order_form_requires_address() {
        let mut form = valid_form();
        form.address = String::new();
        assert!(form.validate().is_err());
    }
}
