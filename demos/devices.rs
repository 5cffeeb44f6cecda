//! A device / storage / directory / file hierarchy.
//!
//! Run with: cargo run --example devices

use membertext::{enumeration, record, schema_of, to_string_pretty};
use std::error::Error;

enumeration! {
    #[derive(Debug, Clone, Copy)]
    enum FileType {
        Image,
        Text,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct Device {
        values: Vec<i32>,
        id: i32,
        name: String,
        @[rename("IP")] ip: String,
        storage_id: String,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct Storage {
        id: i32,
        all_files_ids: Vec<String>,
        all_directories_ids: Vec<String>,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct Directory {
        id: i32,
        name: String,
        children_directories_ids: Vec<String>,
        files_ids: Vec<String>,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct File {
        file_type: FileType,
        @[rename("ID_DOIDO")] id: i32,
        name: String,
        real_file_path: String,
        @[ignore] open_handles: u32,
        directory_id: i32,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct DeviceData {
        all_devices: Vec<Device>,
        all_storages: Vec<Storage>,
        all_files: Vec<File>,
        all_directories: Vec<Directory>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let data = DeviceData {
        all_devices: vec![Device {
            values: vec![3, 1, 4],
            id: 1,
            name: "laptop".to_string(),
            ip: "192.168.0.12".to_string(),
            storage_id: "1".to_string(),
        }],
        all_storages: vec![Storage {
            id: 1,
            all_files_ids: vec!["10".to_string(), "11".to_string()],
            all_directories_ids: vec!["100".to_string()],
        }],
        all_files: vec![
            File {
                file_type: FileType::Text,
                id: 10,
                name: "notes.txt".to_string(),
                real_file_path: "/home/alice/notes.txt".to_string(),
                open_handles: 2,
                directory_id: 100,
            },
            File {
                file_type: FileType::Image,
                id: 11,
                name: "cat.png".to_string(),
                real_file_path: "/home/alice/cat.png".to_string(),
                open_handles: 0,
                directory_id: 100,
            },
        ],
        all_directories: vec![Directory {
            id: 100,
            name: "home".to_string(),
            children_directories_ids: vec![],
            files_ids: vec!["10".to_string(), "11".to_string()],
        }],
    };

    println!("{}", to_string_pretty(&data)?);

    let schema = schema_of::<File>();
    println!("Schema of {}:", schema.type_name());
    for member in schema.members() {
        println!(
            "  {} -> {} ({}){}",
            member.source_name,
            member.emitted_name,
            member.kind,
            if member.included() { "" } else { " [excluded]" }
        );
    }

    Ok(())
}
