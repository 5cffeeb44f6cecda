//! Encoding a flat record.
//!
//! Run with: cargo run --example simple

use membertext::{deserialize, record, serialize, to_string};
use std::error::Error;

record! {
    #[derive(Debug)]
    struct User {
        id: u32,
        name: String,
        email: String,
        score: f64,
        active: bool,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        email: "alice@example.com".to_string(),
        score: 97.25,
        active: true,
    };

    // Members come out grouped by kind, not in declaration order
    let text = to_string(&user)?;
    println!("Encoded:\n{}", text);

    let bytes = serialize(&user)?;
    println!("{} bytes", bytes.len());

    // The format is write-only
    match deserialize::<User>(&bytes) {
        Ok(_) => println!("decoded"),
        Err(e) => println!("Decoding refused: {}", e),
    }

    Ok(())
}
