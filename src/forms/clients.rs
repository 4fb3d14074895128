use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::client::ClientDetails;
use crate::domain::types::{
    ClientName, EmailAddress, PhoneNumber, TypeConstraintError, WebsiteUrl, is_phone_like,
};
use crate::forms::FormError;

/// Form data for creating or editing a client of the signed-in principal.
/// Optional inputs arrive as empty strings and are only checked when filled.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateClientForm {
    #[validate(length(min = 1, message = "Full name is required"), custom(function = not_blank))]
    pub full_name: String,
    pub company: String,
    #[validate(custom(function = optional_website))]
    pub website: String,
    #[validate(custom(function = optional_email))]
    pub office_email: String,
    #[validate(custom(function = optional_phone))]
    pub office_phone: String,
    #[validate(custom(function = optional_phone))]
    pub mobile_phone: String,
    pub address: String,
}

fn optional<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    let value = value.trim();
    if value.is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Full name is required".into()));
    }
    Ok(())
}

fn optional_website(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || WebsiteUrl::new(value).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message("Please enter a valid website URL".into()))
}

fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message("Please enter a valid email address".into()))
}

fn optional_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || is_phone_like(value.trim()) {
        return Ok(());
    }
    Err(ValidationError::new("phone").with_message(
        "Phone may only contain digits, spaces, hyphens, parentheses and plus".into(),
    ))
}

impl CreateClientForm {
    /// Validates the form and converts it into domain client details.
    pub fn to_details(&self) -> Result<ClientDetails, FormError> {
        self.validate()?;

        let mut details = ClientDetails::new(ClientName::new(self.full_name.as_str())?)
            .company(self.company.as_str())
            .address(self.address.as_str());
        details.website = optional(&self.website, |v| WebsiteUrl::new(v))?;
        details.office_email = optional(&self.office_email, |v| EmailAddress::new(v))?;
        details.office_phone = optional(&self.office_phone, |v| PhoneNumber::new(v))?;
        details.mobile_phone = optional(&self.mobile_phone, |v| PhoneNumber::new(v))?;
        Ok(details)
    }

    /// First message per invalid field, keyed by the camelCase field name.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let mut messages: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let message = errs.first()?.message.as_ref()?.to_string();
                Some((camel_case(&field), message))
            })
            .collect();
        messages.sort();
        messages
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
