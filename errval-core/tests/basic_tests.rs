//! Basic tests for errval-core

use errval_core::*;
use proptest::prelude::*;
use std::any::Any;
use std::num::ParseIntError;

type Lookup = std::result::Result<String, ErrorValue>;

fn lookup(args: &[&dyn Any]) -> Lookup {
    let key = args
        .first()
        .and_then(|arg| arg.downcast_ref::<&str>())
        .copied()
        .unwrap_or("<none>");
    Ok(format!("value for {key}"))
}

fn reject_ints() -> ErrorValue {
    ErrorValue::new(
        ExpectationTable::new().with_type::<i32>(0),
        TypeTag::error::<ParseIntError>(),
        "keys must be text",
    )
    .unwrap()
}

#[test]
fn test_listed_argument_returns_same_error_value() {
    let error = reject_ints();
    let guarded = guard(&error, lookup);

    let outcome = guarded.call(&[&5i32]).unwrap().unwrap();
    let returned = outcome.unwrap_err();
    assert!(returned.ptr_eq(&error));
    assert_eq!(returned.kind().name(), "ParseIntError");
}

#[test]
fn test_unlisted_argument_invokes_target() {
    let guarded = guard(&reject_ints(), lookup);
    let outcome = guarded.call(&[&"x"]).unwrap();
    assert_eq!(outcome, Some(Ok("value for x".to_string())));
}

#[test]
fn test_empty_table_zero_args_invokes_target() {
    let error = ErrorValue::for_error::<ParseIntError>(ExpectationTable::new(), "unused");
    let outcome = error.guard(lookup).call(&[]).unwrap();
    assert_eq!(outcome, Some(Ok("value for <none>".to_string())));
}

#[test]
fn test_empty_table_with_args_is_arity_mismatch() {
    let error = ErrorValue::for_error::<ParseIntError>(ExpectationTable::new(), "unused");
    match error.guard(lookup).call(&[&"x"]) {
        Err(ContractError::ArityMismatch { expected, found }) => {
            assert_eq!(expected, 0);
            assert_eq!(found, 1);
        }
        other => panic!("Expected ArityMismatch, got {other:?}"),
    }
}

#[test]
fn test_too_few_args_is_arity_mismatch() {
    let error = ErrorValue::for_error::<ParseIntError>(
        ExpectationTable::new()
            .with_type::<i32>(0)
            .with_type::<i32>(1)
            .with_type::<i32>(2),
        "three guarded positions",
    );
    let err = error.guard(lookup).call(&[&"a", &"b"]).unwrap_err();
    assert!(err.to_string().contains("equal length"));
}

#[test]
fn test_multiple_types_at_one_position() {
    let error = ErrorValue::for_error::<ParseIntError>(
        ExpectationTable::new().with(0, [TypeTag::of::<i32>(), TypeTag::of::<f64>()]),
        "numbers rejected",
    );
    let guarded = error.guard(lookup);

    assert!(matches!(guarded.call(&[&1i32]), Ok(Some(Err(_)))));
    assert!(matches!(guarded.call(&[&1.5f64]), Ok(Some(Err(_)))));
    assert!(matches!(guarded.call(&[&1u64]), Ok(Some(Ok(_)))));
}

#[test]
fn test_owned_arguments() {
    let error = ErrorValue::for_error::<ParseIntError>(
        ExpectationTable::new().with_type::<String>(0),
        "owned strings rejected",
    );
    let owned = String::from("key");
    let outcome = error.guard(lookup).call(&[&owned]).unwrap();
    assert!(matches!(outcome, Some(Err(_))));
}

#[test]
fn test_non_throwable_kind() {
    let err = ErrorValue::new(ExpectationTable::new(), TypeTag::of::<String>(), "x").unwrap_err();
    assert!(matches!(err, ContractError::Violation(_)));
}

#[test]
fn test_display_contains_kind_and_cause() {
    let text = reject_ints().to_string();
    assert!(text.contains("ParseIntError"));
    assert!(text.contains("keys must be text"));
    assert!(text.contains("0: 'i32'"));
}

#[test]
fn test_error_value_propagates_with_question_mark() {
    fn run(guarded: &Guarded<fn(&[&dyn Any]) -> Lookup>) -> std::result::Result<String, Box<dyn std::error::Error>> {
        let outcome = guarded.call(&[&3i32])?.ok_or("no target")?;
        Ok(outcome?)
    }

    let guarded = guard(&reject_ints(), lookup as fn(&[&dyn Any]) -> Lookup);
    let err = run(&guarded).unwrap_err();
    assert!(err.to_string().starts_with("ErrorValue(expect="));
}

#[test]
fn test_error_value_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ErrorValue>();
}

fn tag_pool() -> Vec<TypeTag> {
    vec![
        TypeTag::of::<i32>(),
        TypeTag::of::<u8>(),
        TypeTag::of::<f64>(),
        TypeTag::of::<bool>(),
        TypeTag::of::<String>(),
        TypeTag::of::<&str>(),
    ]
}

proptest! {
    #[test]
    fn prop_well_formed_tables_construct(
        entries in prop::collection::btree_map(
            0i64..64,
            prop::collection::vec(0usize..6, 0..4),
            0..8,
        ),
        cause in ".*"
    ) {
        let pool = tag_pool();
        let table = ExpectationTable::try_from_entries(
            entries
                .iter()
                .map(|(key, picks)| (*key, picks.iter().map(|i| pool[*i]).collect::<Vec<_>>())),
        )
        .unwrap();

        let value = ErrorValue::new(table.clone(), TypeTag::error::<ParseIntError>(), cause.clone())
            .unwrap();

        prop_assert_eq!(value.expectation(), &table);
        prop_assert_eq!(value.expectation().len(), entries.len());
        prop_assert_eq!(value.kind(), TypeTag::of::<ParseIntError>());
        prop_assert_eq!(value.cause(), cause.as_str());
    }

    #[test]
    fn prop_negative_keys_are_out_of_range(key in i64::MIN..0) {
        let result = ExpectationTable::try_from_entries([(key, vec![TypeTag::of::<i32>()])]);
        prop_assert!(matches!(result, Err(ContractError::OutOfRange(_))));
    }

    #[test]
    fn prop_guard_substitutes_only_on_listed_type(flags in prop::collection::vec(any::<bool>(), 1..8)) {
        let table = (0..flags.len())
            .fold(ExpectationTable::new(), |table, position| table.with_type::<i32>(position));
        let error = ErrorValue::for_error::<ParseIntError>(table, "ints rejected");
        let guarded = error.guard(lookup);

        let ints: Vec<i32> = (0..flags.len() as i32).collect();
        let texts: Vec<&str> = vec!["text"; flags.len()];
        let args: Vec<&dyn Any> = flags
            .iter()
            .enumerate()
            .map(|(i, listed)| if *listed { &ints[i] as &dyn Any } else { &texts[i] as &dyn Any })
            .collect();

        let outcome = guarded.call(&args).unwrap().unwrap();
        prop_assert_eq!(outcome.is_err(), flags.iter().any(|listed| *listed));
    }
}
