//! Customizing output with EncoderOptions.
//!
//! Run with: cargo run --example custom_options

use membertext::{record, to_string, to_string_with_options, ContainerPolicy, EncoderOptions};
use std::collections::BTreeMap;
use std::error::Error;

record! {
    #[derive(Debug)]
    struct Config {
        name: String,
        @[version_range(1, 1)] legacy_port: u16,
        @[version(2)] port: u16,
        debug: bool,
        limits: BTreeMap<String, u32>,
        hosts: Vec<String>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        legacy_port: 8080,
        port: 443,
        debug: true,
        limits: [("connections".to_string(), 64), ("requests".to_string(), 1000)]
            .into_iter()
            .collect(),
        hosts: vec!["a.example".to_string(), "b.example".to_string()],
    };

    println!("Default (no indentation, maps skipped):");
    println!("{}", to_string(&config)?);

    println!("Indented by 4:");
    let indented = EncoderOptions::new().with_indent(4);
    println!("{}", to_string_with_options(&config, indented)?);

    println!("Version 2 only:");
    let v2 = EncoderOptions::new().with_version(2);
    println!("{}", to_string_with_options(&config, v2)?);

    println!("With maps expanded:");
    let expanded = EncoderOptions::pretty().with_containers(ContainerPolicy::Expand);
    println!("{}", to_string_with_options(&config, expanded)?);

    Ok(())
}
