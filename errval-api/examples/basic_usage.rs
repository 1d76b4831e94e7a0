//! Basic usage example for errval
//!
//! Run with `RUST_LOG=debug` to see the interception decisions.

use errval_api::{builder, default_registry, Catalog, ErrorValue, ExpectationTable};
use std::any::Any;
use std::num::ParseIntError;

type Parsed = Result<u16, ErrorValue>;

fn parse_port(args: &[&dyn Any]) -> Parsed {
    let text = args
        .first()
        .and_then(|arg| arg.downcast_ref::<&str>())
        .copied()
        .unwrap_or("0");
    Ok(text.parse().unwrap_or(0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Method 1: Typed construction
    println!("=== Method 1: Typed Construction ===");
    let already_numeric = ErrorValue::for_error::<ParseIntError>(
        ExpectationTable::new().with_type::<u16>(0),
        "port is already numeric",
    );
    println!("{already_numeric}");

    let guarded = already_numeric.guard(parse_port);
    println!("parse_port(\"8080\") -> {:?}", guarded.call(&[&"8080"])?);
    println!("parse_port(8080u16) -> {:?}\n", guarded.call(&[&8080u16])?);

    // Method 2: Builder
    println!("=== Method 2: Builder ===");
    let error = builder()
        .expect::<u16>(0)
        .expect::<i32>(0)
        .error::<ParseIntError>()
        .cause("numbers are not parsed twice")
        .build()?;
    println!("{error}\n");

    // Method 3: Catalog from TOML
    println!("=== Method 3: Catalog ===");
    let catalog = Catalog::from_toml_str(
        r#"
        [errors.numeric_port]
        error = "ParseIntError"
        cause = "port is already numeric"
        expect = { 0 = ["u16", "i32"] }
        "#,
        &default_registry(),
    )?;

    for name in catalog.names() {
        println!("{name}: {:?}", catalog.get(name));
    }

    if let Some(error) = catalog.get("numeric_port") {
        match error.guard(parse_port).call(&[&443i32])? {
            Some(Err(returned)) => println!("raised later: {}", returned.raise()),
            Some(Ok(port)) => println!("parsed port {port}"),
            None => println!("no target"),
        }
    }

    Ok(())
}
