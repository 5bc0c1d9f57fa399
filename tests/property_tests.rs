/// Property-based tests using proptest
/// Tests invariants of the address model that should hold for all inputs
use address_validator::{Address, AddressResult};
use proptest::prelude::*;

fn optional_field() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z0-9 ]{0,12}")
}

fn any_address() -> impl Strategy<Value = Address> {
    (
        optional_field(),
        optional_field(),
        optional_field(),
        optional_field(),
        optional_field(),
    )
        .prop_map(|(street1, street2, city, state, zip_code)| Address {
            street1,
            street2,
            city,
            state,
            zip_code,
            ..Address::default()
        })
}

// Property: composed string never has dangling or doubled separators
proptest! {
    #[test]
    fn composed_string_has_no_gaps(address in any_address()) {
        let composed = address.address_as_string();
        prop_assert!(!composed.starts_with(", "));
        prop_assert!(!composed.ends_with(", "));
        prop_assert!(!composed.contains(", , "));
    }

    #[test]
    fn composed_string_keeps_non_empty_fields_in_order(address in any_address()) {
        let expected: Vec<String> = [
            &address.street1,
            &address.street2,
            &address.city,
            &address.state,
            &address.zip_code,
        ]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .cloned()
        .collect();

        prop_assert_eq!(address.address_as_string(), expected.join(", "));
    }

    #[test]
    fn parse_never_panics(line in "\\PC*") {
        let _ = Address::parse(&line);
    }
}

// Property: equality is case-insensitive and ignores the state
proptest! {
    #[test]
    fn equality_ignores_case_and_state(
        street in "[a-z0-9 ]{1,20}",
        city in "[a-z ]{1,15}",
        zip in "[0-9]{5}",
        state_a in "[A-Z]{2}",
        state_b in "[A-Za-z ]{3,15}"
    ) {
        let a = Address::new()
            .with_street1(street.clone())
            .with_city(city.clone())
            .with_state(state_a)
            .with_zip_code(zip.clone());
        let b = Address::new()
            .with_street1(street.to_uppercase())
            .with_city(city.to_uppercase())
            .with_state(state_b)
            .with_zip_code(zip);

        prop_assert!(a.is_equals_to(Some(&b)));
        prop_assert!(b.is_equals_to(Some(&a)));
        prop_assert!(!a.is_equals_to(None));
    }

    #[test]
    fn different_zip_codes_are_not_equal(
        street in "[a-z0-9 ]{1,20}",
        zip_a in "[0-9]{5}",
        zip_b in "[0-9]{5}"
    ) {
        prop_assume!(zip_a != zip_b);
        let a = Address::new().with_street1(street.clone()).with_zip_code(zip_a);
        let b = Address::new().with_street1(street).with_zip_code(zip_b);
        prop_assert!(!a.is_equals_to(Some(&b)));
    }
}

// Property: validity follows error flag and candidate count
proptest! {
    #[test]
    fn validity_invariant(count in 0usize..5, error in proptest::bool::ANY) {
        let mut result = AddressResult::new();
        for i in 0..count {
            result.add(Address::parse(&format!("{} Main St, Madison, WI, 53703", i)));
        }
        result.set_error(error);

        prop_assert_eq!(result.is_valid(), !error && count > 0);
        prop_assert_eq!(result.is_error(), error);
        prop_assert_eq!(result.is_unique_candidate(), count == 1);
        prop_assert_eq!(result.has_candidates(), count > 0);
        prop_assert_eq!(result.primary_address().is_some(), count > 0);
    }
}
