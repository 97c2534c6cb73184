use imprint::{assign_value, from_value, record};
use imprint_testhelpers::{IPanic, test};
use serde_json::json;

use crate::source;

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Scalars {
        text: String,
        signed: i64,
        unsigned: u64,
        small: i8,
        port: u16,
        float: f64,
        single: f32,
        flag: bool,
    }
}

#[test]
fn identical_kinds_are_copied() -> Result<(), IPanic> {
    let scalars: Scalars = from_value(&source(json!({
        "text": "héllo",
        "signed": -42,
        "unsigned": 18446744073709551615u64,
        "float": 2.5,
        "flag": true,
    })))?;

    assert_eq!(
        scalars,
        Scalars {
            text: "héllo".into(),
            signed: -42,
            unsigned: u64::MAX,
            float: 2.5,
            flag: true,
            ..Scalars::default()
        }
    );
    Ok(())
}

#[test]
fn zero_values_leave_fields_alone() -> Result<(), IPanic> {
    let mut scalars = Scalars {
        text: "keep".into(),
        signed: 1,
        unsigned: 2,
        small: 3,
        port: 4,
        float: 5.5,
        single: 6.5,
        flag: true,
    };
    let before = format!("{scalars:?}");

    assign_value(
        &mut scalars,
        &source(json!({
            "text": "",
            "signed": 0,
            "unsigned": 0,
            "small": null,
            "port": [],
            "float": 0.0,
            "single": {},
            "flag": false,
        })),
    )?;

    assert_eq!(format!("{scalars:?}"), before);
    Ok(())
}

#[test]
fn integer_into_string() -> Result<(), IPanic> {
    let scalars: Scalars = from_value(&source(json!({ "text": 123 })))?;
    assert_eq!(scalars.text, "123");

    let scalars: Scalars = from_value(&source(json!({ "text": -7 })))?;
    assert_eq!(scalars.text, "-7");
    Ok(())
}

#[test]
fn string_into_integer() -> Result<(), IPanic> {
    let scalars: Scalars = from_value(&source(json!({
        "signed": "123",
        "unsigned": "456",
        "port": "8080",
    })))?;
    assert_eq!(scalars.signed, 123);
    assert_eq!(scalars.unsigned, 456);
    assert_eq!(scalars.port, 8080);
    Ok(())
}

#[test]
fn malformed_integer_text_fails() {
    let err = from_value::<Scalars>(&source(json!({ "signed": "abc" }))).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"at .signed: invalid i64 literal: "abc""#);

    let err = from_value::<Scalars>(&source(json!({ "port": "-1" }))).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"at .port: invalid u16 literal: "-1""#);
}

#[test]
fn integer_into_float_keeps_the_value() -> Result<(), IPanic> {
    let scalars: Scalars = from_value(&source(json!({ "float": 7, "single": -3 })))?;
    assert_eq!(scalars.float, 7.0);
    assert_eq!(scalars.single, -3.0);
    Ok(())
}

#[test]
fn integers_are_narrowed_to_the_field_width() -> Result<(), IPanic> {
    let scalars: Scalars = from_value(&source(json!({ "small": -128, "port": 65535 })))?;
    assert_eq!(scalars.small, -128);
    assert_eq!(scalars.port, 65535);
    Ok(())
}

#[test]
fn integers_that_do_not_fit_leave_the_field_alone() -> Result<(), IPanic> {
    let mut scalars = Scalars {
        small: 7,
        signed: 8,
        port: 9,
        ..Scalars::default()
    };

    assign_value(
        &mut scalars,
        &source(json!({
            "small": 300,
            "signed": 18446744073709551615u64,
            "port": -1,
            "flag": true,
        })),
    )?;

    assert_eq!(scalars.small, 7);
    assert_eq!(scalars.signed, 8);
    assert_eq!(scalars.port, 9);
    // the call carried on past them
    assert!(scalars.flag);
    Ok(())
}

#[test]
fn float_into_string_and_back() -> Result<(), IPanic> {
    for original in [25.01, 0.1, -1234.5678, 6.02214076e23, 1e-9] {
        let formatted: Scalars = from_value(&source(json!({ "text": original })))?;
        let parsed: Scalars = from_value(&source(json!({ "float": formatted.text })))?;
        assert_eq!(parsed.float, original, "via {}", formatted.text);
    }

    let scalars: Scalars = from_value(&source(json!({ "text": 25.01 })))?;
    assert_eq!(scalars.text, "2.501E+01");
    Ok(())
}

#[test]
fn malformed_float_text_fails() {
    let err = from_value::<Scalars>(&source(json!({ "float": "two" }))).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"at .float: invalid f64 literal: "two""#);
}

#[test]
fn float_narrows_into_f32() -> Result<(), IPanic> {
    let scalars: Scalars = from_value(&source(json!({ "single": 0.25 })))?;
    assert_eq!(scalars.single, 0.25);
    Ok(())
}

#[test]
fn unsupported_pairs_are_no_ops() -> Result<(), IPanic> {
    let mut scalars = Scalars {
        signed: 5,
        flag: false,
        text: "kept".into(),
        ..Scalars::default()
    };

    assign_value(
        &mut scalars,
        &source(json!({
            "signed": true,
            "flag": "true",
            "text": ["not", "a", "string"],
            "small": 1.5,
        })),
    )?;

    assert_eq!(scalars.signed, 5);
    assert!(!scalars.flag);
    assert_eq!(scalars.text, "kept");
    assert_eq!(scalars.small, 0);
    Ok(())
}

#[test]
fn earlier_fields_stay_written_after_a_failure() {
    let mut scalars = Scalars::default();
    let err = assign_value(
        &mut scalars,
        &source(json!({
            "text": "written",
            "signed": "oops",
            "flag": true,
        })),
    )
    .unwrap_err();

    assert_eq!(err.path_string(), ".signed");
    assert_eq!(scalars.text, "written");
    assert_eq!(scalars.signed, 0);
    // declared after the failing field
    assert!(!scalars.flag);
}
