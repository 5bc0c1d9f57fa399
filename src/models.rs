use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// ============ Address ============

/// A mailing address, either supplied by a caller or produced by a provider as a candidate.
///
/// `street1` and `zip_code` are the fields a backend needs; everything else is optional.
/// No validation happens here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Address {
    /// Primary street line.
    pub street1: Option<String>,
    /// Secondary line (apartment, suite...).
    pub street2: Option<String>,
    pub city: Option<String>,
    /// State name or abbreviation.
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub place_name: Option<String>,
    /// Ordering hint when the address is part of a result set.
    pub index: i64,
}

impl Address {
    /// Creates an empty address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an address from a US formatted line: `street, city, state, zip`.
    ///
    /// Tokens are split on `,` and trimmed. Missing or blank tokens stay absent and
    /// anything after the fourth token is ignored.
    pub fn parse(us_formatted: &str) -> Self {
        let mut tokens = us_formatted.split(',').map(str::trim);
        let mut next = || {
            tokens
                .next()
                .filter(|token| !token.is_empty())
                .map(str::to_string)
        };

        let street1 = next();
        let city = next();
        let state = next();
        let zip_code = next();

        Self {
            street1,
            city,
            state,
            zip_code,
            ..Self::default()
        }
    }

    pub fn with_street1(mut self, street1: impl Into<String>) -> Self {
        self.street1 = Some(street1.into());
        self
    }

    pub fn with_street2(mut self, street2: impl Into<String>) -> Self {
        self.street2 = Some(street2.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_place_name(mut self, place_name: impl Into<String>) -> Self {
        self.place_name = Some(place_name.into());
        self
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = index;
        self
    }

    /// Joins `street1, street2, city, state, zip_code` with `", "`, skipping absent
    /// and empty fields.
    pub fn address_as_string(&self) -> String {
        [
            &self.street1,
            &self.street2,
            &self.city,
            &self.state,
            &self.zip_code,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Compares zip code, city and street1 case-insensitively.
    ///
    /// The state is left out: it may come back as `WI` for an input of `Wisconsin`.
    pub fn is_equals_to(&self, other: Option<&Address>) -> bool {
        let Some(other) = other else {
            return false;
        };

        fn folded(field: &Option<String>) -> String {
            field.as_deref().unwrap_or_default().to_lowercase()
        }

        folded(&self.zip_code) == folded(&other.zip_code)
            && folded(&self.city) == folded(&other.city)
            && folded(&self.street1) == folded(&other.street1)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.is_equals_to(Some(other))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address_as_string())
    }
}

// ============ AddressResult ============

/// Outcome of one validation attempt.
///
/// Valid means "no error and at least one candidate". `is_error` is about the
/// transport (or any other processing failure) and says nothing about whether
/// the address itself matched.
#[derive(Debug, Clone, Serialize)]
pub struct AddressResult {
    /// Candidates in the order the backend ranked them; the first one is the primary.
    addresses: Vec<Address>,
    http_headers: HashMap<String, Vec<String>>,
    http_status_code: u16,
    http_raw_body: String,
    error: bool,
    message: String,
}

impl Default for AddressResult {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            http_headers: HashMap::new(),
            http_status_code: 200,
            http_raw_body: String::new(),
            error: false,
            message: String::new(),
        }
    }
}

impl AddressResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result holding the given candidates.
    pub fn with_addresses(addresses: Vec<Address>) -> Self {
        Self {
            addresses,
            ..Self::default()
        }
    }

    /// Appends one candidate.
    pub fn add(&mut self, address: Address) -> &mut Self {
        self.addresses.push(address);
        self
    }

    /// Replaces every candidate.
    pub fn set_addresses(&mut self, addresses: impl IntoIterator<Item = Address>) -> &mut Self {
        self.addresses = addresses.into_iter().collect();
        self
    }

    pub fn set_error(&mut self, error: bool) -> &mut Self {
        self.error = error;
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = message.into();
        self
    }

    pub fn set_http_headers(&mut self, http_headers: HashMap<String, Vec<String>>) -> &mut Self {
        self.http_headers = http_headers;
        self
    }

    pub fn set_http_status_code(&mut self, http_status_code: u16) -> &mut Self {
        self.http_status_code = http_status_code;
        self
    }

    pub fn set_http_raw_body(&mut self, http_raw_body: impl Into<String>) -> &mut Self {
        self.http_raw_body = http_raw_body.into();
        self
    }

    /// First (most accurate) candidate, if any.
    pub fn primary_address(&self) -> Option<&Address> {
        self.addresses.first()
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }

    pub fn count_of_candidates(&self) -> usize {
        self.addresses.len()
    }

    pub fn has_candidates(&self) -> bool {
        self.count_of_candidates() > 0
    }

    pub fn is_unique_candidate(&self) -> bool {
        self.count_of_candidates() == 1
    }

    pub fn is_valid(&self) -> bool {
        !self.error && self.has_candidates()
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn http_headers(&self) -> &HashMap<String, Vec<String>> {
        &self.http_headers
    }

    pub fn http_status_code(&self) -> u16 {
        self.http_status_code
    }

    pub fn http_raw_body(&self) -> &str {
        &self.http_raw_body
    }
}

/// Log-oriented summary; not meant to be parsed back.
impl fmt::Display for AddressResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http_code={}", self.http_status_code)?;
        if self.error {
            write!(f, ", error=true, message={}", self.message)?;
        }
        write!(
            f,
            ", valid={}, candidates={}",
            self.is_valid(),
            self.count_of_candidates()
        )?;

        if self.has_candidates() {
            f.write_str(", data=[")?;
            for (i, address) in self.addresses.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}={{{}}}", i, address)?;
            }
            f.write_str("]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_us_formatted_line() {
        let a = Address::parse("Street name A1, City name, State Name,000000");

        assert_eq!(a.street1.as_deref(), Some("Street name A1"));
        assert_eq!(a.city.as_deref(), Some("City name"));
        assert_eq!(a.state.as_deref(), Some("State Name"));
        assert_eq!(a.zip_code.as_deref(), Some("000000"));
        assert!(a.country.is_none());
        assert!(a.place_name.is_none());
        assert!(a.street2.is_none());

        assert_eq!(
            a.to_string(),
            "Street name A1, City name, State Name, 000000"
        );

        let a = a.with_street2("Second str");
        assert_eq!(
            a.address_as_string(),
            "Street name A1, Second str, City name, State Name, 000000"
        );
    }

    #[test]
    fn test_parse_short_line_leaves_missing_tokens_absent() {
        let a = Address::parse("Test");
        assert_eq!(a.street1.as_deref(), Some("Test"));
        assert!(a.city.is_none());
        assert!(a.zip_code.is_none());
        assert_eq!(a.address_as_string(), "Test");
    }

    #[test]
    fn test_incremental_composition() {
        let mut a = Address::new();
        assert_eq!(a.address_as_string(), "");

        a.street1 = Some("Street name A1".into());
        assert_eq!(a.address_as_string(), "Street name A1");

        a.street2 = Some("Second str".into());
        assert_eq!(a.address_as_string(), "Street name A1, Second str");

        a.city = Some("City name".into());
        assert_eq!(a.address_as_string(), "Street name A1, Second str, City name");

        a.state = Some("State Name".into());
        assert_eq!(
            a.address_as_string(),
            "Street name A1, Second str, City name, State Name"
        );

        a.zip_code = Some("000000".into());
        assert_eq!(
            a.address_as_string(),
            "Street name A1, Second str, City name, State Name, 000000"
        );
        assert!(a.country.is_none());
        assert!(a.place_name.is_none());
    }

    #[test]
    fn test_composition_skips_gaps() {
        let a = Address::new().with_city("Madison").with_zip_code("53703");
        assert_eq!(a.address_as_string(), "Madison, 53703");

        let a = Address::new().with_street1("").with_city("Madison");
        assert_eq!(a.address_as_string(), "Madison");
    }

    #[test]
    fn test_equality_ignores_state_and_case() {
        let a = Address::parse("1 Main St, Madison, WI, 53703");
        let b = Address::parse("1 MAIN ST, madison, Wisconsin, 53703");
        assert!(a.is_equals_to(Some(&b)));
        assert_eq!(a, b);

        let c = Address::parse("1 Main St, Madison, WI, 53704");
        assert!(!a.is_equals_to(Some(&c)));
        assert!(!a.is_equals_to(None));
    }

    #[test]
    fn test_empty_result() {
        let result = AddressResult::new();
        assert_eq!(result.count_of_candidates(), 0);
        assert!(result.addresses().is_empty());
        assert!(!result.is_valid(), "An empty list should not be considered valid");
        assert!(!result.has_candidates());
        assert!(!result.is_unique_candidate());
        assert!(!result.is_error());
        assert!(result.primary_address().is_none());
        assert_eq!(result.http_status_code(), 200);
    }

    #[test]
    fn test_result_collection_of_candidates() {
        let mut result = AddressResult::new();

        result.add(Address::parse("Street name A1, City name, State Name,000000").with_index(0));
        assert_eq!(result.count_of_candidates(), 1);
        assert_eq!(result.addresses()[0].index, 0);
        assert!(result.is_unique_candidate());
        assert!(result.is_valid());

        result.add(Address::parse("Street name A2, City name, State Name, 000001").with_index(33));
        assert_eq!(result.count_of_candidates(), 2);
        assert_eq!(result.addresses().last().map(|a| a.index), Some(33));
        assert!(!result.is_unique_candidate());
        assert!(result.is_valid());
        assert_eq!(
            result.primary_address().and_then(|a| a.street1.as_deref()),
            Some("Street name A1")
        );

        result.set_error(true);
        assert!(result.is_error());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_set_addresses_replaces_sequence() {
        let mut result = AddressResult::with_addresses(vec![Address::parse("a, b, c, d")]);
        result.set_addresses(vec![Address::parse("x, y, z, 1"), Address::parse("q, r, s, 2")]);
        assert_eq!(result.count_of_candidates(), 2);
        assert_eq!(
            result.primary_address().and_then(|a| a.street1.as_deref()),
            Some("x")
        );
    }

    #[test]
    fn test_display_without_error() {
        let mut result = AddressResult::new();
        result.add(Address::parse("1 Main St, Madison, WI, 53703"));

        assert_eq!(
            result.to_string(),
            "http_code=200, valid=true, candidates=1, data=[0={1 Main St, Madison, WI, 53703}]"
        );
    }

    #[test]
    fn test_display_with_error() {
        let mut result = AddressResult::new();
        result
            .set_error(true)
            .set_http_status_code(401)
            .set_message("Authentication required");

        let text = result.to_string();
        assert_eq!(
            text,
            "http_code=401, error=true, message=Authentication required, valid=false, candidates=0"
        );
        assert!(!text.contains("data="));
    }
}
