//! Input validation for API requests.
//!
//! Request bodies arrive as arbitrary JSON. Each `validate_*` function reads
//! the fields of one insert shape, records every rule that fails, and either
//! returns the normalized shape or a single validation error naming all the
//! failing fields. Keys outside the insert shape (ids, timestamps, server
//! defaults) are ignored.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::db::{
    Id, LoginRequest, NewBooking, NewContactMessage, NewReview, NewServiceProvider,
    RegisterRequest, ServiceProviderUpdate, UserType,
};

use super::error::{ApiError, ValidationErrorBuilder};

lazy_static! {
    /// Regex for validating email addresses (local@domain.tld)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$"
    ).unwrap();
}

const MIN_PASSWORD_LENGTH: usize = 6;
const MIN_PHONE_LENGTH: usize = 10;

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 254 || !EMAIL_REGEX.is_match(email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

/// Require at least `min` characters
pub fn validate_min_length(value: &str, min: usize, label: &str) -> Result<(), String> {
    if value.chars().count() < min {
        return Err(format!("{} must be at least {} characters", label, min));
    }
    Ok(())
}

/// Require a non-blank value
pub fn validate_required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(())
}

/// Validate a phone number (digits may be formatted)
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.chars().count() < MIN_PHONE_LENGTH {
        return Err(format!(
            "Phone number must be at least {} digits",
            MIN_PHONE_LENGTH
        ));
    }
    Ok(())
}

/// Validate a star rating
pub fn validate_rating(rating: i64) -> Result<u8, String> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5".to_string());
    }
    Ok(rating as u8)
}

/// Parse a path identifier, e.g. `/services/:id`
pub fn parse_id(raw: &str, entity: &str) -> Result<Id, ApiError> {
    raw.trim()
        .parse::<Id>()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", entity)))
}

/// Reads typed fields out of a JSON object, collecting every failure
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: ValidationErrorBuilder,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Value) -> Self {
        let mut errors = ValidationErrorBuilder::new();
        let object = body.as_object();
        if object.is_none() {
            errors.add("body", "Expected a JSON object");
        }
        Self { object, errors }
    }

    /// Raw value, with `null` kept
    fn raw(&self, field: &str) -> Option<&'a Value> {
        self.object.and_then(|o| o.get(field))
    }

    /// Value with `null` treated as absent
    fn value(&self, field: &str) -> Option<&'a Value> {
        self.raw(field).filter(|v| !v.is_null())
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    fn string_or_fail(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.fail(field, "Expected a string");
                None
            }
        }
    }

    fn int_or_fail(&mut self, field: &str, value: &Value) -> Option<i64> {
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                self.fail(field, "Expected an integer");
                None
            }
        }
    }

    fn list_or_fail(&mut self, field: &str, value: &Value) -> Option<Vec<String>> {
        let items = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
        });
        if items.is_none() {
            self.fail(field, "Expected a list of strings");
        }
        items
    }

    pub fn required_string(&mut self, field: &str) -> String {
        match self.value(field) {
            Some(value) => self.string_or_fail(field, value).unwrap_or_default(),
            None => {
                self.fail(field, "Required");
                String::new()
            }
        }
    }

    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        let value = self.value(field)?;
        self.string_or_fail(field, value)
    }

    /// Tri-state for patches: absent, explicit `null`, or a new value
    pub fn nullable_string(&mut self, field: &str) -> Option<Option<String>> {
        match self.raw(field)? {
            Value::Null => Some(None),
            value => self.string_or_fail(field, value).map(Some),
        }
    }

    pub fn required_int(&mut self, field: &str) -> Option<i64> {
        match self.value(field) {
            Some(value) => self.int_or_fail(field, value),
            None => {
                self.fail(field, "Required");
                None
            }
        }
    }

    pub fn optional_int(&mut self, field: &str) -> Option<i64> {
        let value = self.value(field)?;
        self.int_or_fail(field, value)
    }

    /// Missing lists default to empty
    pub fn string_list(&mut self, field: &str) -> Vec<String> {
        self.optional_string_list(field).unwrap_or_default()
    }

    pub fn optional_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        let value = self.value(field)?;
        self.list_or_fail(field, value)
    }

    /// Record a rule failure, unless the field already failed to read
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            if !self.errors.has(field) {
                self.fail(field, message);
            }
        }
    }

    /// Convert an integer into the id type
    pub fn id(&mut self, field: &str, value: Option<i64>) -> Option<Id> {
        let value = value?;
        match Id::try_from(value) {
            Ok(id) => Some(id),
            Err(_) => {
                self.fail(field, "Value is out of range");
                None
            }
        }
    }

    /// Return `value` if no rule failed
    pub fn finish<T>(self, value: T) -> Result<T, ApiError> {
        self.errors.finish()?;
        Ok(value)
    }
}

/// Validate a booking request
pub fn validate_booking(body: &Value) -> Result<NewBooking, ApiError> {
    let mut r = FieldReader::new(body);

    let first_name = r.required_string("firstName");
    let last_name = r.required_string("lastName");
    let email = r.required_string("email");
    let phone = r.required_string("phone");
    let address = r.required_string("address");
    let service_category = r.required_string("serviceCategory");
    let specific_service = r.optional_string("specificService");
    let description = r.optional_string("description");
    let date = r.required_string("date");
    let time = r.required_string("time");
    let provider_id = r.optional_int("providerId");
    let provider_id = r.id("providerId", provider_id);

    r.check("firstName", validate_required(&first_name, "First name"));
    r.check("lastName", validate_required(&last_name, "Last name"));
    r.check("email", validate_email(&email));
    r.check("phone", validate_phone(&phone));
    r.check("address", validate_required(&address, "Address"));
    r.check("serviceCategory", validate_required(&service_category, "Service category"));
    r.check("date", validate_required(&date, "Date"));
    r.check("time", validate_required(&time, "Time"));

    r.finish(NewBooking {
        first_name,
        last_name,
        email,
        phone,
        address,
        service_category,
        specific_service,
        description,
        date,
        time,
        provider_id,
    })
}

/// Validate a review submission
pub fn validate_review(body: &Value) -> Result<NewReview, ApiError> {
    let mut r = FieldReader::new(body);

    let name = r.required_string("name");
    let service_id = r.required_int("serviceId");
    let service_id = r.id("serviceId", service_id);
    let rating = r.required_int("rating");
    let comment = r.required_string("comment");
    let avatar_url = r.optional_string("avatarUrl");

    r.check("name", validate_min_length(&name, 2, "Name"));
    let rating = match rating.map(validate_rating) {
        Some(Ok(rating)) => rating,
        Some(Err(message)) => {
            r.check("rating", Err(message));
            0
        }
        None => 0,
    };
    r.check("comment", validate_min_length(&comment, 10, "Comment"));

    r.finish(NewReview {
        name,
        service_id: service_id.unwrap_or_default(),
        rating,
        comment,
        avatar_url,
    })
}

/// Validate a contact form message
pub fn validate_contact(body: &Value) -> Result<NewContactMessage, ApiError> {
    let mut r = FieldReader::new(body);

    let first_name = r.required_string("firstName");
    let last_name = r.required_string("lastName");
    let email = r.required_string("email");
    let phone = r.required_string("phone");
    let service_interest = r.optional_string("serviceInterest");
    let message = r.required_string("message");

    r.check("firstName", validate_min_length(&first_name, 2, "First name"));
    r.check("lastName", validate_min_length(&last_name, 2, "Last name"));
    r.check("email", validate_email(&email));
    r.check("phone", validate_phone(&phone));
    r.check("message", validate_min_length(&message, 10, "Message"));

    r.finish(NewContactMessage {
        first_name,
        last_name,
        email,
        phone,
        service_interest,
        message,
    })
}

/// Validate an account registration
pub fn validate_registration(body: &Value) -> Result<RegisterRequest, ApiError> {
    let mut r = FieldReader::new(body);

    let username = r.required_string("username");
    let password = r.required_string("password");
    let confirm_password = r.required_string("confirmPassword");
    let email = r.required_string("email");
    let user_type = r.required_string("userType");
    let first_name = r.required_string("firstName");
    let last_name = r.required_string("lastName");
    let phone = r.optional_string("phone");

    r.check("username", validate_required(&username, "Username"));
    r.check("email", validate_email(&email));
    r.check(
        "password",
        validate_min_length(&password, MIN_PASSWORD_LENGTH, "Password"),
    );
    r.check(
        "confirmPassword",
        validate_min_length(&confirm_password, MIN_PASSWORD_LENGTH, "Password"),
    );
    if password != confirm_password {
        r.check("confirmPassword", Err("Passwords do not match".to_string()));
    }
    let user_type = match user_type.parse::<UserType>() {
        Ok(user_type) => user_type,
        Err(_) => {
            r.check("userType", Err("Please select a valid user type".to_string()));
            UserType::Client
        }
    };
    r.check("firstName", validate_required(&first_name, "First name"));
    r.check("lastName", validate_required(&last_name, "Last name"));

    r.finish(RegisterRequest {
        username,
        password,
        email,
        user_type,
        first_name,
        last_name,
        phone,
    })
}

/// Validate a login body; credential checks happen in the handler
pub fn validate_login(body: &Value) -> Result<LoginRequest, ApiError> {
    let mut r = FieldReader::new(body);
    let email = r.required_string("email");
    let password = r.required_string("password");
    r.finish(LoginRequest { email, password })
}

fn experience_years(r: &mut FieldReader<'_>, years: Option<i64>) -> Option<i32> {
    let years = years?;
    match i32::try_from(years) {
        Ok(years) if years >= 0 => Some(years),
        _ => {
            r.check(
                "experienceYears",
                Err("Experience must be a non-negative number of years".to_string()),
            );
            None
        }
    }
}

/// Validate a new service provider profile
pub fn validate_provider_profile(body: &Value) -> Result<NewServiceProvider, ApiError> {
    let mut r = FieldReader::new(body);

    let bio = r.required_string("bio");
    let years = r.required_int("experienceYears");
    let experience_years = experience_years(&mut r, years);
    let hourly_rate = r.required_string("hourlyRate");
    let skills = r.string_list("skills");
    let service_categories = r.string_list("serviceCategories");
    let availability = r.required_string("availability");
    let certifications = r.string_list("certifications");
    let portfolio_images = r.string_list("portfolioImages");
    let address = r.optional_string("address");
    let city = r.required_string("city");
    let state = r.required_string("state");
    let zip_code = r.optional_string("zipCode");

    r.check("bio", validate_required(&bio, "Bio"));
    r.check("hourlyRate", validate_required(&hourly_rate, "Hourly rate"));
    r.check("availability", validate_required(&availability, "Availability"));
    r.check("city", validate_required(&city, "City"));
    r.check("state", validate_required(&state, "State"));

    r.finish(NewServiceProvider {
        bio,
        experience_years: experience_years.unwrap_or_default(),
        hourly_rate,
        skills,
        service_categories,
        availability,
        certifications,
        portfolio_images,
        address,
        city,
        state,
        zip_code,
    })
}

/// Validate a partial profile update; only supplied fields are checked
pub fn validate_provider_update(body: &Value) -> Result<ServiceProviderUpdate, ApiError> {
    let mut r = FieldReader::new(body);

    let bio = r.optional_string("bio");
    let years = r.optional_int("experienceYears");
    let experience_years = experience_years(&mut r, years);
    let hourly_rate = r.optional_string("hourlyRate");
    let skills = r.optional_string_list("skills");
    let service_categories = r.optional_string_list("serviceCategories");
    let availability = r.optional_string("availability");
    let certifications = r.optional_string_list("certifications");
    let portfolio_images = r.optional_string_list("portfolioImages");
    let address = r.nullable_string("address");
    let city = r.optional_string("city");
    let state = r.optional_string("state");
    let zip_code = r.nullable_string("zipCode");

    let required = [
        ("bio", "Bio", &bio),
        ("hourlyRate", "Hourly rate", &hourly_rate),
        ("availability", "Availability", &availability),
        ("city", "City", &city),
        ("state", "State", &state),
    ];
    for (field, label, value) in required {
        if let Some(value) = value {
            r.check(field, validate_required(value, label));
        }
    }

    r.finish(ServiceProviderUpdate {
        bio,
        experience_years,
        hourly_rate,
        skills,
        service_categories,
        availability,
        certifications,
        portfolio_images,
        address,
        city,
        state,
        zip_code,
    })
}
